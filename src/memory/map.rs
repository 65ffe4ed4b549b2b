//! Simulated memory map
//!
//! Sparse mapping from 20-bit physical addresses to byte values.
//! Keys are unique and the last write wins; there is no aliasing
//! resolution beyond plain overwrite.  The map is passive state:
//! only the executor's write step mutates it, and a reset clears it
//! wholesale.

use super::PhysicalAddress;
use rustc_hash::FxHashMap;

/// Physical address → byte cells written by the executor
#[derive(Debug, Clone, Default)]
pub struct MemoryMap {
    cells: FxHashMap<PhysicalAddress, u8>,
}

impl MemoryMap {
    pub fn new() -> Self {
        MemoryMap {
            cells: FxHashMap::default(),
        }
    }

    /// Write a byte at a physical address (overwrites any previous value)
    pub fn write(&mut self, addr: PhysicalAddress, value: u8) {
        self.cells.insert(addr, value);
    }

    /// Read the byte at a physical address, if one was ever written
    pub fn read(&self, addr: PhysicalAddress) -> Option<u8> {
        self.cells.get(&addr).copied()
    }

    /// Number of distinct addresses written
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells sorted by physical address (for display)
    pub fn entries(&self) -> Vec<(PhysicalAddress, u8)> {
        let mut out: Vec<_> = self.cells.iter().map(|(&a, &v)| (a, v)).collect();
        out.sort_unstable_by_key(|&(a, _)| a);
        out
    }

    /// Drop every cell
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
