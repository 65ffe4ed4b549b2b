//! Segment allocator
//!
//! Owns the [`SegmentTable`] and the stack pointer, and enforces every
//! bound the simulator has:
//! - byte allocation only succeeds while a segment's cursor is below
//!   its limit
//! - push/pop move the stack pointer in 2-byte units, downward for
//!   push, and keep it within `[0x0000, STACK_POINTER_INIT]`
//!
//! [`peek_next`] is the non-mutating twin of [`allocate_byte`]: it
//! reports the same (base, offset) pair and fails identically, which
//! lets the trace show the "about to allocate" address before the
//! write step commits.
//!
//! [`peek_next`]: SegmentAllocator::peek_next
//! [`allocate_byte`]: SegmentAllocator::allocate_byte

use super::constants::STACK_POINTER_INIT;
use super::errors::AllocError;
use crate::memory::segment::{SegmentTable, SegmentTag};
use tracing::debug;

/// The segment allocator: four segment cursors plus the stack pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentAllocator {
    table: SegmentTable,
    stack_pointer: u16,
}

impl SegmentAllocator {
    pub fn new() -> Self {
        SegmentAllocator {
            table: SegmentTable::new(),
            stack_pointer: STACK_POINTER_INIT,
        }
    }

    /// Allocate the next byte in a segment, returning its (base, offset)
    pub fn allocate_byte(&mut self, tag: SegmentTag) -> Result<(u16, u16), AllocError> {
        let seg = self.table.get_mut(tag);
        if seg.is_full() {
            debug!(segment = %tag, limit = seg.limit, "allocation refused, segment full");
            return Err(AllocError::OutOfMemory(tag));
        }
        let offset = seg.next_offset;
        seg.next_offset += 1;
        Ok((seg.base, offset))
    }

    /// Preview the next allocation without committing it
    pub fn peek_next(&self, tag: SegmentTag) -> Result<(u16, u16), AllocError> {
        let seg = self.table.get(tag);
        if seg.is_full() {
            return Err(AllocError::OutOfMemory(tag));
        }
        Ok((seg.base, seg.next_offset))
    }

    /// Push one word: decrement SP by 2, returning the pre-decrement SP
    pub fn push_value(&mut self) -> Result<u16, AllocError> {
        if self.stack_pointer < 2 {
            debug!(sp = self.stack_pointer, "push refused at stack floor");
            return Err(AllocError::StackOverflow);
        }
        let old_sp = self.stack_pointer;
        self.stack_pointer -= 2;
        Ok(old_sp)
    }

    /// Pop one word: increment SP by 2, returning the pre-increment SP
    pub fn pop_value(&mut self) -> Result<u16, AllocError> {
        if self.stack_pointer >= STACK_POINTER_INIT {
            debug!(sp = self.stack_pointer, "pop refused at stack ceiling");
            return Err(AllocError::StackUnderflow);
        }
        let old_sp = self.stack_pointer;
        self.stack_pointer += 2;
        Ok(old_sp)
    }

    /// Current stack pointer (an offset within SS)
    pub fn stack_pointer(&self) -> u16 {
        self.stack_pointer
    }

    /// Read-only view of the segment table
    pub fn segments(&self) -> &SegmentTable {
        &self.table
    }

    /// Reinitialize all four segments and the stack pointer.
    /// The external memory map is the session's to clear, not ours.
    pub fn reset(&mut self) {
        self.table.reset();
        self.stack_pointer = STACK_POINTER_INIT;
    }
}

impl Default for SegmentAllocator {
    fn default() -> Self {
        Self::new()
    }
}
