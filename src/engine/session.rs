// Execution session: the explicit context object that owns all
// mutable simulator state and drains the step queue

use super::allocator::SegmentAllocator;
use super::constants::DEMO_REGISTER_VALUE;
use super::errors::InputError;
use super::plan::{plan_steps, Step, StepPhase};
use crate::memory::map::MemoryMap;
use crate::memory::registers::{Register, RegisterFile};
use crate::memory::segment::SegmentTag;
use crate::memory::{fmt_off, fmt_phys_calc, fmt_seg, physical};
use crate::parser::tokens::{parse_input, InputByte};
use crate::trace::{ExecutionLog, WriteRecord};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

/// What a paced [`Session::tick`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Not playing, or the delay has not elapsed yet
    Idle,
    /// One step was executed
    Stepped,
    /// The queue drained; continuous mode stopped
    Finished,
}

/// Result of preparing an input string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub bytes: usize,
    pub steps: usize,
}

/// The allocation context captured by a select-segment step and
/// consumed by the remaining phases of the same byte
#[derive(Debug, Clone, Copy)]
struct ActiveAlloc {
    segment: SegmentTag,
    base: u16,
    offset: u16,
    value: u8,
}

/// Pacing state for the continuous drain mode
#[derive(Debug, Clone, Copy)]
struct AutoPlay {
    playing: bool,
    delay: Duration,
    /// None while playing means the next step is due immediately
    last_step: Option<Instant>,
}

/// The execution session
///
/// Owns the allocator, the memory map, the register file, the
/// execution log, the write history, and the step queue.  The
/// presentation layer holds a `Session` and threads it through every
/// operation; there is no process-wide state.
///
/// Both drain modes go through [`execute_next`]: continuous mode via
/// [`tick`] (the delay is pacing only), single-step via [`next_step`],
/// which cancels any pending continuous run first so the two modes
/// never interleave.
///
/// [`execute_next`]: Session::execute_next
/// [`tick`]: Session::tick
/// [`next_step`]: Session::next_step
#[derive(Debug, Clone)]
pub struct Session {
    allocator: SegmentAllocator,
    memory: MemoryMap,
    registers: RegisterFile,
    log: ExecutionLog,
    history: Vec<WriteRecord>,
    queue: VecDeque<Step>,
    active: Option<ActiveAlloc>,
    auto: AutoPlay,
}

impl Session {
    pub fn new() -> Self {
        Session {
            allocator: SegmentAllocator::new(),
            memory: MemoryMap::new(),
            registers: RegisterFile::new(),
            log: ExecutionLog::new(),
            history: Vec::new(),
            queue: VecDeque::new(),
            active: None,
            auto: AutoPlay {
                playing: false,
                delay: Duration::from_millis(super::constants::DEFAULT_STEP_DELAY_MS),
                last_step: None,
            },
        }
    }

    /// Tokenize, classify, and queue the steps for an input string.
    /// Empty input (after trimming) is rejected and builds no queue.
    /// Any previous queue is replaced; committed state stays intact.
    pub fn prepare(&mut self, input: &str) -> Result<PlanSummary, InputError> {
        self.prepare_bytes(parse_input(input))
    }

    /// Queue the steps for pre-parsed (byte, token) pairs.  This is
    /// the core-facing seam: any tokenizer producing such pairs can
    /// drive the engine through it.
    pub fn prepare_bytes(&mut self, bytes: Vec<InputByte>) -> Result<PlanSummary, InputError> {
        if bytes.is_empty() {
            return Err(InputError::Empty);
        }
        self.cancel_auto();
        self.queue = plan_steps(&bytes);
        self.active = None;
        let summary = PlanSummary {
            bytes: bytes.len(),
            steps: self.queue.len(),
        };
        debug!(bytes = summary.bytes, steps = summary.steps, "plan built");
        self.log.log(format!(
            "Prepared {} byte(s) for allocation ({} steps)",
            summary.bytes, summary.steps
        ));
        Ok(summary)
    }

    /// Execute the head step, if any.  The shared primitive behind
    /// both drain modes.
    pub fn execute_next(&mut self) -> Option<StepPhase> {
        let step = self.queue.pop_front()?;
        let phase = step.phase;
        self.execute(step);
        Some(phase)
    }

    /// Execute exactly one step on demand, cancelling any pending
    /// continuous run first.  Logs when nothing is queued.
    pub fn next_step(&mut self) -> Option<StepPhase> {
        self.cancel_auto();
        let executed = self.execute_next();
        if executed.is_none() {
            self.log
                .log("No more steps. Allocation finished or nothing prepared.");
        }
        executed
    }

    /// Start the continuous drain with the given per-step delay.
    /// The first step is due on the next [`Session::tick`].
    pub fn start_auto(&mut self, delay_ms: u64) {
        self.auto.delay = Duration::from_millis(delay_ms);
        self.auto.playing = true;
        self.auto.last_step = None;
        self.log.log("Starting automatic allocation...");
    }

    /// Advance the continuous drain if its delay has elapsed.
    /// `now` is passed in so callers (and tests) control pacing.
    pub fn tick(&mut self, now: Instant) -> TickStatus {
        if !self.auto.playing {
            return TickStatus::Idle;
        }
        let due = match self.auto.last_step {
            None => true,
            Some(last) => now.duration_since(last) >= self.auto.delay,
        };
        if !due {
            return TickStatus::Idle;
        }
        if self.execute_next().is_some() {
            self.auto.last_step = Some(now);
            TickStatus::Stepped
        } else {
            self.auto.playing = false;
            self.log.log("Allocation complete.");
            TickStatus::Finished
        }
    }

    /// Stop the continuous drain, leaving the queue and all committed
    /// state intact and resumable.
    pub fn cancel_auto(&mut self) {
        self.auto.playing = false;
        self.auto.last_step = None;
    }

    pub fn is_playing(&self) -> bool {
        self.auto.playing
    }

    /// Configured continuous-mode delay
    pub fn delay(&self) -> Duration {
        self.auto.delay
    }

    /// Drain the whole queue synchronously, ignoring pacing
    pub fn run_to_end(&mut self) {
        while self.execute_next().is_some() {}
    }

    pub fn steps_remaining(&self) -> usize {
        self.queue.len()
    }

    /// Full reinitialization: allocator, registers, memory map, log,
    /// history, and queue.  Cancels any active continuous run first.
    pub fn reset(&mut self) {
        self.cancel_auto();
        self.allocator.reset();
        self.registers.reset();
        self.memory.clear();
        self.history.clear();
        self.queue.clear();
        self.active = None;
        self.log.clear();
        self.log.log("Memory and allocator reset");
        debug!("session reset");
    }

    pub fn allocator(&self) -> &SegmentAllocator {
        &self.allocator
    }

    pub fn memory(&self) -> &MemoryMap {
        &self.memory
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }

    /// Committed writes, in commit order
    pub fn history(&self) -> &[WriteRecord] {
        &self.history
    }

    fn execute(&mut self, step: Step) {
        match step.phase {
            StepPhase::SelectSegment => self.execute_select(&step),
            StepPhase::ShowOffset => {
                if let Some(active) = &self.active {
                    self.log.log(format!(
                        "[Byte {}] Next free offset in {} = {}",
                        step.index + 1,
                        active.segment,
                        fmt_off(active.offset)
                    ));
                }
            }
            StepPhase::ComputePhysical => {
                if let Some(active) = &self.active {
                    self.log.log(format!(
                        "[Byte {}] Physical Address = {}",
                        step.index + 1,
                        fmt_phys_calc(active.base, active.offset)
                    ));
                }
            }
            StepPhase::Write => self.execute_write(&step),
        }
    }

    fn execute_select(&mut self, step: &Step) {
        match self.allocator.peek_next(step.segment) {
            Ok((base, offset)) => {
                self.active = Some(ActiveAlloc {
                    segment: step.segment,
                    base,
                    offset,
                    value: step.value,
                });
                self.log.log(format!(
                    "[Byte {}] Input '{}' classified → {}",
                    step.index + 1,
                    step.token,
                    step.segment
                ));
                self.log
                    .log(format!("    {} = {}", step.segment, fmt_seg(base)));
            }
            Err(err) => {
                // Only this byte's allocation attempt is aborted: drop
                // its remaining phases and carry on with the next byte.
                self.active = None;
                self.log
                    .log(format!("[Byte {}] ERROR: {}", step.index + 1, err));
                while self.queue.front().is_some_and(|s| s.index == step.index) {
                    self.queue.pop_front();
                }
            }
        }
    }

    fn execute_write(&mut self, step: &Step) {
        let Some(active) = self.active.take() else {
            return;
        };
        // Commit point.  The preview at select time guarantees room in
        // this single-actor model, but the commit re-validates and
        // fails soft rather than trusting it.
        let (base, offset) = match self.allocator.allocate_byte(active.segment) {
            Ok(pair) => pair,
            Err(err) => {
                self.log
                    .log(format!("[Byte {}] ERROR: {}", step.index + 1, err));
                return;
            }
        };
        let addr = physical(base, offset);
        self.memory.write(addr, active.value);
        self.apply_register_effects(step);
        self.history.push(WriteRecord {
            segment: active.segment,
            base,
            offset,
            physical: addr,
            value: active.value,
        });
        self.log.log(format!(
            "[Byte {}] Written {:02X}H at {} {}:{}",
            step.index + 1,
            active.value,
            active.segment,
            fmt_seg(base),
            fmt_off(offset)
        ));
    }

    /// PUSH/POP register side effects, evaluated only at write time
    fn apply_register_effects(&mut self, step: &Step) {
        if step.segment != SegmentTag::Ss {
            return;
        }
        if step.token.eq_ignore_ascii_case("PUSH") {
            match self.allocator.push_value() {
                Ok(_) => {
                    self.registers.set(Register::Ax, DEMO_REGISTER_VALUE);
                    self.registers
                        .set(Register::Sp, self.allocator.stack_pointer());
                    self.log.log(format!(
                        "    → Register: AX = {:04X}H",
                        DEMO_REGISTER_VALUE
                    ));
                    self.log.log(format!(
                        "    → Stack Pointer: SP = {:04X}H",
                        self.allocator.stack_pointer()
                    ));
                }
                Err(err) => self.log.log(format!("    → ERROR: {}", err)),
            }
        } else if step.token.eq_ignore_ascii_case("POP") {
            match self.allocator.pop_value() {
                Ok(old_sp) => {
                    self.registers.set(Register::Bx, DEMO_REGISTER_VALUE);
                    self.registers
                        .set(Register::Sp, self.allocator.stack_pointer());
                    self.log.log(format!(
                        "    → Stack: Popped value {:04X}H from SS:{:04X}H to BX",
                        DEMO_REGISTER_VALUE, old_sp
                    ));
                    self.log.log(format!(
                        "    → Stack Pointer: SP = {:04X}H",
                        self.allocator.stack_pointer()
                    ));
                }
                Err(err) => self.log.log(format!("    → ERROR: {}", err)),
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
