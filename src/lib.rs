//! # Introduction
//!
//! segsim models the 8086 segmented addressing scheme as a small,
//! observable allocator: four fixed segments (CS, DS, SS, ES), each
//! with a base and an allocation cursor, and physical addresses
//! computed as `(base << 4) + offset`.  Free-form input is tokenized
//! into bytes, each byte is classified into a target segment, and its
//! allocation is replayed as a four-phase trace that can be drained
//! continuously or one step at a time.
//!
//! ## Execution pipeline
//!
//! ```text
//! Input text → Tokenizer → Classifier → StepPlanner → Executor → MemoryMap/Registers/Log
//! ```
//!
//! 1. [`parser`] — splits input into tokens, expands each token into
//!    bytes, and classifies tokens into segments.
//! 2. [`engine`] — the segment allocator, the step planner, and the
//!    [`engine::session::Session`] that executes queued steps.
//! 3. [`memory`] — passive state: the [`memory::segment::SegmentTable`],
//!    the physical-address [`memory::map::MemoryMap`], and the
//!    [`memory::registers::RegisterFile`] snapshot.
//! 4. [`trace`] — the [`trace::ExecutionLog`] phase log and per-write
//!    [`trace::WriteRecord`]s read by the presentation layer.
//!
//! ## Trace phases
//!
//! Every byte is allocated through the same four steps, in order:
//! select-segment, show-offset, compute-physical, write.  Only the
//! write step mutates allocator, memory, or register state.

pub mod engine;
pub mod memory;
pub mod parser;
pub mod trace;
