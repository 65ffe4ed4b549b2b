// Fixed layout and pacing constants for the simulator

/// Code segment base
pub const CS_BASE: u16 = 0x1000;

/// Data segment base
pub const DS_BASE: u16 = 0x2000;

/// Stack segment base
pub const SS_BASE: u16 = 0x3000;

/// Extra segment base
pub const ES_BASE: u16 = 0x4000;

/// Allocation limit shared by all four segments
pub const SEGMENT_LIMIT: u16 = 0x0FFF;

/// Initial stack pointer, also the ceiling pops may not reach.
/// The stack pointer is an offset within SS and stays 2-aligned.
pub const STACK_POINTER_INIT: u16 = 0xFFFE;

/// Demonstration value loaded into AX/BX by PUSH/POP steps
pub const DEMO_REGISTER_VALUE: u16 = 0x1234;

/// Lowest accepted continuous-mode delay in milliseconds
pub const MIN_STEP_DELAY_MS: u64 = 50;

/// Continuous-mode delay used when the configured value is invalid
pub const DEFAULT_STEP_DELAY_MS: u64 = 700;

/// Parse a delay string, clamping to the floor and falling back to
/// the default on non-numeric input
pub fn parse_delay(input: &str) -> u64 {
    match input.trim().parse::<u64>() {
        Ok(ms) => ms.max(MIN_STEP_DELAY_MS),
        Err(_) => DEFAULT_STEP_DELAY_MS,
    }
}
