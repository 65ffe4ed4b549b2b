//! Allocation engine
//!
//! This module provides the active core of the simulator:
//! - [`allocator`]: the segment allocator with bounds-checked byte
//!   allocation and stack push/pop
//! - [`plan`]: expansion of (byte, token) pairs into four-phase steps
//! - [`session`]: the execution context that drains the step queue,
//!   continuously or one step at a time
//! - [`errors`]: the recoverable error conditions
//! - [`constants`]: fixed bases, limits, and pacing defaults
//!
//! # Execution model
//!
//! Steps execute one at a time, synchronously.  The continuous drain
//! mode only paces execution; it never runs two steps concurrently,
//! so the preview taken at select-segment time is still valid when
//! the write step commits.

pub mod allocator;
pub mod constants;
pub mod errors;
pub mod plan;
pub mod session;
