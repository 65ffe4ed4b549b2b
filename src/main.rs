// segsim: step-by-step 8086 segmented-memory allocation simulator

use std::process;
use std::thread;
use std::time::{Duration, Instant};

use segsim::engine::constants::{parse_delay, DEFAULT_STEP_DELAY_MS};
use segsim::engine::session::{Session, TickStatus};
use segsim::memory::fmt_off;
use segsim::memory::registers::Register;
use segsim::memory::segment::SegmentTag;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("segsim");
        eprintln!("Error: No input provided");
        eprintln!();
        eprintln!("Usage: {} \"<input>\" [delay-ms]", program_name);
        eprintln!();
        eprintln!("Examples:");
        eprintln!(
            "  {} \"PUSH AX; POP BX; ES:DATA; MOV CX; 1234; 'HELLO'\"",
            program_name
        );
        eprintln!(
            "  {} \"MOV AX, 0x12\" 100      # pace the trace at 100 ms per step",
            program_name
        );
        eprintln!();
        eprintln!(
            "Tokens are split on commas/whitespace/semicolons; quoted strings,"
        );
        eprintln!("hex (0x12, 34H) and decimal literals expand to bytes.");
        process::exit(1);
    }

    let input = &args[1];
    let delay_ms = match args.get(2) {
        Some(raw) => parse_delay(raw),
        None => DEFAULT_STEP_DELAY_MS,
    };

    let mut session = Session::new();

    let summary = match session.prepare(input) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("Warning: {}. Please enter valid data to allocate.", err);
            process::exit(1);
        }
    };
    eprintln!(
        "Prepared {} byte(s), {} steps, {} ms per step.",
        summary.bytes, summary.steps, delay_ms
    );

    // Continuous drain, printing log lines as each step emits them
    let mut printed = 0;
    session.start_auto(delay_ms);
    loop {
        let status = session.tick(Instant::now());
        for line in &session.log().lines()[printed..] {
            println!("{}", line);
        }
        printed = session.log().len();
        match status {
            TickStatus::Finished => break,
            TickStatus::Stepped | TickStatus::Idle => thread::sleep(Duration::from_millis(10)),
        }
    }

    // Final state, dashboard style: memory map newest-first, then
    // segment cursors and registers
    println!();
    println!("Memory Map (All Segments)");
    println!(
        "{:<14} {:<16} {:<8} {:<8}",
        "Segment:Offset", "Physical", "Value", "Segment"
    );
    for record in session.history().iter().rev() {
        println!(
            "{:<14} {:<16} {:<8} {:<8}",
            record.location_label(),
            record.physical_label(),
            record.value_label(),
            record.segment
        );
    }

    println!();
    println!("Segment Registers");
    for tag in SegmentTag::ALL {
        match session.allocator().peek_next(tag) {
            Ok((_, next_offset)) => println!("{}: {}", tag, fmt_off(next_offset)),
            Err(_) => println!("{}: FULL", tag),
        }
    }

    println!();
    println!("Registers");
    for reg in Register::ALL {
        println!("{}: {:04X}H", reg, session.registers().get(reg));
    }
}
