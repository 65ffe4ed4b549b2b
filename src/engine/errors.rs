//! Error conditions of the allocation engine
//!
//! All of these are local, recoverable conditions.  They are reported
//! to the caller as values; nothing in the engine panics or aborts a
//! run over them.  An allocation failure during preview aborts only
//! that byte's trace, and a stack underflow during a write step is
//! logged without discarding the remaining queued steps.

use crate::memory::segment::SegmentTag;
use thiserror::Error;

/// Allocator-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// A segment's allocation cursor reached its limit
    #[error("{0} out of memory")]
    OutOfMemory(SegmentTag),

    /// A push would move the stack pointer below the stack floor
    #[error("Stack overflow")]
    StackOverflow,

    /// A pop was attempted with the stack pointer at its ceiling
    #[error("Stack underflow")]
    StackUnderflow,
}

/// Rejected input, surfaced before any step queue is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// Input was empty (or all separators) after trimming
    #[error("no data to allocate")]
    Empty,
}
