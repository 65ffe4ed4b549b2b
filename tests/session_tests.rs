// End-to-end session tests: step ordering, drain modes, register
// side effects, and reset

use std::time::{Duration, Instant};

use segsim::engine::errors::InputError;
use segsim::engine::plan::StepPhase;
use segsim::engine::session::{Session, TickStatus};
use segsim::memory::physical;
use segsim::memory::registers::Register;
use segsim::memory::segment::SegmentTag;
use segsim::parser::tokens::InputByte;

fn pairs(items: &[(u8, &str)]) -> Vec<InputByte> {
    items
        .iter()
        .map(|&(value, token)| InputByte {
            value,
            token: token.to_string(),
        })
        .collect()
}

fn log_contains(session: &Session, needle: &str) -> bool {
    session.log().lines().iter().any(|l| l.contains(needle))
}

#[test]
fn push_then_pop_end_to_end() {
    let mut session = Session::new();
    session
        .prepare_bytes(pairs(&[(0x50, "PUSH"), (0x42, "POP")]))
        .unwrap();
    session.run_to_end();

    // both bytes landed in SS, sequentially
    assert_eq!(session.memory().read(physical(0x3000, 0)), Some(0x50));
    assert_eq!(session.memory().read(physical(0x3000, 1)), Some(0x42));
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history()[0].segment, SegmentTag::Ss);
    assert_eq!(session.history()[0].offset, 0x0000);
    assert_eq!(session.history()[1].offset, 0x0001);

    // PUSH set AX and moved SP down; POP set BX and restored it
    assert_eq!(session.registers().get(Register::Ax), 0x1234);
    assert_eq!(session.registers().get(Register::Bx), 0x1234);
    assert_eq!(session.registers().get(Register::Sp), 0xFFFE);
    assert_eq!(session.allocator().stack_pointer(), 0xFFFE);

    // the pop reported the pre-increment pointer
    assert!(log_contains(
        &session,
        "Popped value 1234H from SS:FFFCH to BX"
    ));
    assert!(log_contains(&session, "Stack Pointer: SP = FFFCH"));
    assert!(log_contains(&session, "Stack Pointer: SP = FFFEH"));
}

#[test]
fn four_phases_execute_in_order_and_only_write_mutates() {
    let mut session = Session::new();
    session.prepare_bytes(pairs(&[(0x41, "AX")])).unwrap();

    assert_eq!(session.next_step(), Some(StepPhase::SelectSegment));
    assert!(session.memory().is_empty());
    assert_eq!(session.next_step(), Some(StepPhase::ShowOffset));
    assert!(session.memory().is_empty());
    assert_eq!(session.next_step(), Some(StepPhase::ComputePhysical));
    assert!(session.memory().is_empty());
    // cursor untouched until the write commits
    assert_eq!(session.allocator().peek_next(SegmentTag::Ds), Ok((0x2000, 0)));

    assert_eq!(session.next_step(), Some(StepPhase::Write));
    assert_eq!(session.memory().read(physical(0x2000, 0)), Some(0x41));
    assert_eq!(session.allocator().peek_next(SegmentTag::Ds), Ok((0x2000, 1)));

    assert_eq!(session.next_step(), None);
    assert!(log_contains(&session, "No more steps"));
}

#[test]
fn no_step_of_the_next_byte_runs_before_the_previous_write() {
    let mut session = Session::new();
    session
        .prepare_bytes(pairs(&[(0x01, "AA"), (0x02, "BB")]))
        .unwrap();

    for _ in 0..4 {
        session.next_step();
    }
    // byte 1 committed, byte 2 untouched
    assert_eq!(session.history().len(), 1);
    assert!(session.log().lines().iter().all(|l| !l.contains("[Byte 2]")));

    for _ in 0..4 {
        session.next_step();
    }
    assert_eq!(session.history().len(), 2);
}

#[test]
fn empty_input_builds_no_queue() {
    let mut session = Session::new();
    assert_eq!(session.prepare("   ;;  ,, "), Err(InputError::Empty));
    assert_eq!(session.steps_remaining(), 0);
    assert_eq!(session.prepare(""), Err(InputError::Empty));
}

#[test]
fn free_form_input_expands_every_token_byte() {
    let mut session = Session::new();
    // PUSH(4) + AX(2) + POP(3) + BX(2) = 11 bytes, 4 steps each
    let summary = session.prepare("PUSH AX; POP BX").unwrap();
    assert_eq!(summary.bytes, 11);
    assert_eq!(summary.steps, 44);
    assert!(log_contains(
        &session,
        "Prepared 11 byte(s) for allocation (44 steps)"
    ));
}

#[test]
fn classification_routes_bytes_to_their_segments() {
    let mut session = Session::new();
    session.prepare("ES:DATA").unwrap();
    session.run_to_end();
    assert!(!session.history().is_empty());
    for record in session.history() {
        assert_eq!(record.segment, SegmentTag::Es);
        assert_eq!(record.base, 0x4000);
    }
    assert!(log_contains(&session, "classified → ES"));
}

#[test]
fn pop_underflow_is_logged_and_the_run_continues() {
    let mut session = Session::new();
    session
        .prepare_bytes(pairs(&[(0x01, "POP"), (0x02, "AX")]))
        .unwrap();
    session.run_to_end();

    assert!(log_contains(&session, "ERROR: Stack underflow"));
    // the failed pop left registers alone but both bytes still landed
    assert_eq!(session.registers().get(Register::Bx), 0);
    assert_eq!(session.registers().get(Register::Sp), 0xFFFE);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn out_of_memory_skips_only_the_exhausted_byte() {
    let mut session = Session::new();
    // one byte more than DS can hold, then one CS byte that must
    // still be allocated after the failure
    let mut bytes = vec![(0xAA_u8, "DATA"); 0x1000];
    bytes.push((0xBB, "MOV"));
    session.prepare_bytes(pairs(&bytes)).unwrap();
    session.run_to_end();

    assert!(log_contains(&session, "ERROR: DS out of memory"));
    let ds_writes = session
        .history()
        .iter()
        .filter(|r| r.segment == SegmentTag::Ds)
        .count();
    let cs_writes = session
        .history()
        .iter()
        .filter(|r| r.segment == SegmentTag::Cs)
        .count();
    assert_eq!(ds_writes, 0x0FFF);
    assert_eq!(cs_writes, 1);
    assert_eq!(session.steps_remaining(), 0);
}

#[test]
fn continuous_mode_paces_steps_and_cancels_cleanly() {
    let mut session = Session::new();
    session.prepare_bytes(pairs(&[(0x41, "AX")])).unwrap();
    assert_eq!(session.steps_remaining(), 4);

    let t0 = Instant::now();
    session.start_auto(50);
    assert!(session.is_playing());

    // first step is due immediately, the next only after the delay
    assert_eq!(session.tick(t0), TickStatus::Stepped);
    assert_eq!(session.tick(t0), TickStatus::Idle);
    assert_eq!(session.tick(t0 + Duration::from_millis(49)), TickStatus::Idle);
    assert_eq!(session.tick(t0 + Duration::from_millis(50)), TickStatus::Stepped);
    assert_eq!(session.steps_remaining(), 2);

    // cancellation keeps the queue and committed state intact
    session.cancel_auto();
    assert!(!session.is_playing());
    assert_eq!(session.tick(t0 + Duration::from_secs(10)), TickStatus::Idle);
    assert_eq!(session.steps_remaining(), 2);

    // resumable via single-step
    assert_eq!(session.next_step(), Some(StepPhase::ComputePhysical));
    assert_eq!(session.next_step(), Some(StepPhase::Write));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn continuous_mode_finishes_and_reports_completion() {
    let mut session = Session::new();
    session.prepare_bytes(pairs(&[(0x41, "AX")])).unwrap();
    session.start_auto(50);

    let mut now = Instant::now();
    loop {
        match session.tick(now) {
            TickStatus::Finished => break,
            _ => now += Duration::from_millis(50),
        }
    }
    assert!(!session.is_playing());
    assert_eq!(session.steps_remaining(), 0);
    assert_eq!(
        session.log().lines().last().map(String::as_str),
        Some("Allocation complete.")
    );
}

#[test]
fn single_step_cancels_a_pending_continuous_run() {
    let mut session = Session::new();
    session
        .prepare_bytes(pairs(&[(0x41, "AX"), (0x42, "BX")]))
        .unwrap();
    session.start_auto(50);
    assert!(session.is_playing());

    session.next_step();
    assert!(!session.is_playing());
}

#[test]
fn reset_reinitializes_everything() {
    let mut session = Session::new();
    session
        .prepare_bytes(pairs(&[(0x50, "PUSH"), (0x42, "POP"), (0x41, "AX")]))
        .unwrap();
    session.start_auto(50);
    session.run_to_end();
    assert!(!session.memory().is_empty());

    session.reset();

    assert!(!session.is_playing());
    assert!(session.memory().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(session.steps_remaining(), 0);
    for tag in SegmentTag::ALL {
        let (_, offset) = session.allocator().peek_next(tag).unwrap();
        assert_eq!(offset, 0);
    }
    assert_eq!(session.allocator().stack_pointer(), 0xFFFE);
    for reg in [Register::Ax, Register::Bx, Register::Cx, Register::Dx] {
        assert_eq!(session.registers().get(reg), 0);
    }
    assert_eq!(session.registers().get(Register::Sp), 0xFFFE);
    assert_eq!(
        session.log().lines(),
        &["Memory and allocator reset".to_string()]
    );
}
