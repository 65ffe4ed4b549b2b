//! Step planning
//!
//! Expands each (byte, token) pair into the four atomic steps of its
//! allocation trace.  A [`Step`] is a plain value carrying everything
//! known at planning time (byte index, byte value, source token,
//! target segment) plus a phase tag; the executor pattern-matches on
//! the phase.  The (base, offset) pair is not part of the step: it is
//! established when the select-segment step executes and carried in
//! the session's active-allocation slot for the remaining phases of
//! the same byte.

use crate::memory::segment::SegmentTag;
use crate::parser::classify::classify;
use crate::parser::tokens::InputByte;
use std::collections::VecDeque;

/// The four phases of one byte's allocation trace, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    SelectSegment,
    ShowOffset,
    ComputePhysical,
    Write,
}

impl StepPhase {
    /// All phases, in execution order
    pub const ORDER: [StepPhase; 4] = [
        StepPhase::SelectSegment,
        StepPhase::ShowOffset,
        StepPhase::ComputePhysical,
        StepPhase::Write,
    ];
}

/// One atomic unit of the allocation trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub phase: StepPhase,
    /// Zero-based index of the byte this step belongs to
    pub index: usize,
    pub value: u8,
    pub token: String,
    pub segment: SegmentTag,
}

/// Plan the full step queue for a parsed byte sequence.
/// Each token is classified exactly once, at planning time.
pub fn plan_steps(bytes: &[InputByte]) -> VecDeque<Step> {
    let mut queue = VecDeque::with_capacity(bytes.len() * StepPhase::ORDER.len());
    for (index, byte) in bytes.iter().enumerate() {
        let segment = classify(&byte.token);
        for phase in StepPhase::ORDER {
            queue.push_back(Step {
                phase,
                index,
                value: byte.value,
                token: byte.token.clone(),
                segment,
            });
        }
    }
    queue
}
