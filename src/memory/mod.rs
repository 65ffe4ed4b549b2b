//! Memory model for the segment simulator
//!
//! This module provides the passive memory abstractions:
//! - [`segment`]: The four fixed segments (CS, DS, SS, ES) and their table
//! - [`map`]: The physical-address → byte memory map
//! - [`registers`]: The AX/BX/CX/DX/SP register snapshot
//!
//! # Addressing
//!
//! The simulator uses real-mode 8086 addressing: a 16-bit segment base
//! shifted left by 4 bits plus a 16-bit offset yields a 20-bit physical
//! address:
//!
//! ```text
//! physical = (base << 4) + offset
//! ```
//!
//! Helper functions below format addresses in the classic assembler
//! style (`3000H`, `30001H`), shared by the log and the display records.

pub mod map;
pub mod registers;
pub mod segment;

/// Physical memory address type (20-bit, stored as u32)
pub type PhysicalAddress = u32;

/// Compute the 20-bit physical address for a segment base and offset
pub fn physical(base: u16, offset: u16) -> PhysicalAddress {
    ((base as u32) << 4) + offset as u32
}

/// Format a segment base as `XXXXH`
pub fn fmt_seg(base: u16) -> String {
    format!("{:04X}H", base)
}

/// Format an offset as `XXXXH`
pub fn fmt_off(offset: u16) -> String {
    format!("{:04X}H", offset)
}

/// Format the physical address of a base:offset pair as `XXXXXH`
pub fn fmt_phys(base: u16, offset: u16) -> String {
    format!("{:05X}H", physical(base, offset))
}

/// Format a physical address together with the arithmetic that produced it
pub fn fmt_phys_calc(base: u16, offset: u16) -> String {
    format!(
        "{:05X}H = ({:04X}H × 10H) + {:04X}H",
        physical(base, offset),
        base,
        offset
    )
}
