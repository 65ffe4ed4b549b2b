//! Register snapshot
//!
//! A small fixed set of 16-bit registers (AX, BX, CX, DX, SP) that the
//! executor mutates as observational side effects of PUSH/POP steps.
//! SP mirrors the allocator's stack pointer; the general registers
//! only ever receive the fixed demonstration value.

use crate::engine::constants::STACK_POINTER_INIT;
use std::fmt;

/// Register names, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Ax,
    Bx,
    Cx,
    Dx,
    Sp,
}

impl Register {
    pub const ALL: [Register; 5] = [
        Register::Ax,
        Register::Bx,
        Register::Cx,
        Register::Dx,
        Register::Sp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Register::Ax => "AX",
            Register::Bx => "BX",
            Register::Cx => "CX",
            Register::Dx => "DX",
            Register::Sp => "SP",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The observable register file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFile {
    ax: u16,
    bx: u16,
    cx: u16,
    dx: u16,
    sp: u16,
}

impl RegisterFile {
    /// Fresh register file: general registers zero, SP at its ceiling
    pub fn new() -> Self {
        RegisterFile {
            ax: 0,
            bx: 0,
            cx: 0,
            dx: 0,
            sp: STACK_POINTER_INIT,
        }
    }

    pub fn get(&self, reg: Register) -> u16 {
        match reg {
            Register::Ax => self.ax,
            Register::Bx => self.bx,
            Register::Cx => self.cx,
            Register::Dx => self.dx,
            Register::Sp => self.sp,
        }
    }

    pub fn set(&mut self, reg: Register, value: u16) {
        match reg {
            Register::Ax => self.ax = value,
            Register::Bx => self.bx = value,
            Register::Cx => self.cx = value,
            Register::Dx => self.dx = value,
            Register::Sp => self.sp = value,
        }
    }

    /// Restore construction defaults
    pub fn reset(&mut self) {
        *self = RegisterFile::new();
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_file_has_sp_at_ceiling() {
        let regs = RegisterFile::new();
        assert_eq!(regs.get(Register::Sp), STACK_POINTER_INIT);
        for reg in [Register::Ax, Register::Bx, Register::Cx, Register::Dx] {
            assert_eq!(regs.get(reg), 0);
        }
    }

    #[test]
    fn reset_clears_general_registers() {
        let mut regs = RegisterFile::new();
        regs.set(Register::Ax, 0x1234);
        regs.set(Register::Sp, 0xFFFC);
        regs.reset();
        assert_eq!(regs.get(Register::Ax), 0);
        assert_eq!(regs.get(Register::Sp), STACK_POINTER_INIT);
    }
}
