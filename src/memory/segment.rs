//! Segment table
//!
//! This module provides the fixed segment metadata:
//! - [`SegmentTag`]: which of the four 8086 segments a byte belongs to
//! - [`Segment`]: one segment's base, allocation cursor, and limit
//! - [`SegmentTable`]: all four segments, keyed by tag
//!
//! # Invariants
//!
//! For every segment, `0 <= next_offset <= limit` holds at all times;
//! allocation only succeeds while `next_offset < limit`.  Bases are
//! fixed at construction and chosen so the four segments occupy
//! non-overlapping physical windows by convention.

use crate::engine::constants::{
    CS_BASE, DS_BASE, ES_BASE, SEGMENT_LIMIT, SS_BASE,
};
use std::fmt;

/// The four 8086 segment registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentTag {
    /// Code segment
    Cs,
    /// Data segment
    Ds,
    /// Stack segment
    Ss,
    /// Extra segment
    Es,
}

impl SegmentTag {
    /// All tags, in display order
    pub const ALL: [SegmentTag; 4] =
        [SegmentTag::Cs, SegmentTag::Ds, SegmentTag::Ss, SegmentTag::Es];

    pub fn as_str(self) -> &'static str {
        match self {
            SegmentTag::Cs => "CS",
            SegmentTag::Ds => "DS",
            SegmentTag::Ss => "SS",
            SegmentTag::Es => "ES",
        }
    }
}

impl fmt::Display for SegmentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment: fixed base, allocation cursor, and limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub base: u16,
    pub next_offset: u16,
    pub limit: u16,
}

impl Segment {
    pub fn new(base: u16, limit: u16) -> Self {
        Segment {
            base,
            next_offset: 0,
            limit,
        }
    }

    /// Whether the allocation cursor has reached the limit
    pub fn is_full(&self) -> bool {
        self.next_offset >= self.limit
    }

    /// Bytes still allocatable in this segment
    pub fn remaining(&self) -> u16 {
        self.limit - self.next_offset
    }
}

/// The four fixed segments, keyed by [`SegmentTag`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTable {
    cs: Segment,
    ds: Segment,
    ss: Segment,
    es: Segment,
}

impl SegmentTable {
    /// Create the table with the dashboard's fixed bases and limits
    pub fn new() -> Self {
        SegmentTable {
            cs: Segment::new(CS_BASE, SEGMENT_LIMIT),
            ds: Segment::new(DS_BASE, SEGMENT_LIMIT),
            ss: Segment::new(SS_BASE, SEGMENT_LIMIT),
            es: Segment::new(ES_BASE, SEGMENT_LIMIT),
        }
    }

    pub fn get(&self, tag: SegmentTag) -> &Segment {
        match tag {
            SegmentTag::Cs => &self.cs,
            SegmentTag::Ds => &self.ds,
            SegmentTag::Ss => &self.ss,
            SegmentTag::Es => &self.es,
        }
    }

    pub fn get_mut(&mut self, tag: SegmentTag) -> &mut Segment {
        match tag {
            SegmentTag::Cs => &mut self.cs,
            SegmentTag::Ds => &mut self.ds,
            SegmentTag::Ss => &mut self.ss,
            SegmentTag::Es => &mut self.es,
        }
    }

    /// Reset every segment's cursor to its construction default
    pub fn reset(&mut self) {
        *self = SegmentTable::new();
    }
}

impl Default for SegmentTable {
    fn default() -> Self {
        Self::new()
    }
}
