//! Stand-in for the SP1 memory game prover.
//!
//! Prints the same report as the SP1 host script, including the
//! `FINAL_SCORE=` line and the verification marker, but performs no proving.
//! The guest program scores an incomplete board as zero, and so does this
//! stub.
//!
//! ```bash
//! memory-prove-stub 10 80 8
//! memory-prove-stub --fail 10 80 8
//! memory-prove-stub --final-score 42 10 80 8
//! ```

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use memory_core::{TIME_LIMIT, Telemetry};
use memory_zk::VERIFICATION_MARKER;

const PROOF_FILE: &str = "memory_game_proof.bin";

/// Memory game proof generator (stub, no cryptography)
#[derive(Parser, Debug)]
#[command(name = "memory-prove-stub", version, allow_negative_numbers = true)]
struct Args {
    /// Number of moves made
    moves: i64,

    /// Elapsed time in seconds
    time: i64,

    /// Number of matched pairs
    matched_pairs: i64,

    /// Exit with status 1 after printing an error to stderr
    #[arg(long)]
    fail: bool,

    /// Finish successfully without printing the verification marker
    #[arg(long)]
    unverified: bool,

    /// Report this score instead of the computed one
    #[arg(long)]
    final_score: Option<u32>,

    /// Sleep before proving, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Write a placeholder proof file into the working directory
    #[arg(long)]
    save_proof: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let telemetry = match Telemetry::new(args.moves, args.time, args.matched_pairs) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("Error: invalid game data: {}", e);
            return ExitCode::from(2);
        }
    };

    println!("Memory Game SP1 Proof Generator");
    println!("-------------------------------");
    println!(
        "Game data: Moves={}, Time={}, Matched Pairs={}",
        telemetry.moves(),
        telemetry.elapsed_seconds(),
        telemetry.matched_pairs()
    );

    println!("Executing program...");
    let local = telemetry.score();
    let committed_score = if telemetry.is_complete() { local.score } else { 0 };
    let final_score = args.final_score.unwrap_or(committed_score);

    println!("Execution results:");
    println!("- Moves: {}", telemetry.moves());
    println!("- Time: {}", telemetry.elapsed_seconds());
    println!("- Matched Pairs: {}", telemetry.matched_pairs());
    println!("- Score (Remaining Time - Moves): {}", final_score);
    println!("- Game Complete: {}", telemetry.is_complete());
    println!(
        "TIME_LIMIT={}, REMAINING_TIME={}",
        TIME_LIMIT, local.remaining_time
    );
    println!("FINAL_SCORE={}", final_score);

    if args.delay_ms > 0 {
        thread::sleep(Duration::from_millis(args.delay_ms));
    }

    println!("\nGenerating proof (stub, no cryptography)...");
    if args.fail {
        eprintln!("Error: proof generation failed (stub --fail)");
        return ExitCode::FAILURE;
    }
    println!("Proof generated successfully!");

    if args.unverified {
        println!("Skipping verification (stub --unverified)");
        return ExitCode::SUCCESS;
    }

    println!("Verifying proof...");
    println!("{}!", VERIFICATION_MARKER);

    if args.save_proof {
        if let Err(e) = std::fs::write(PROOF_FILE, b"memory-prove-stub") {
            eprintln!("Error: failed to save proof: {}", e);
            return ExitCode::FAILURE;
        }
        println!("Proof saved to: {}", PROOF_FILE);
    }

    println!("\nSP1 ZK Proof generation complete!");
    ExitCode::SUCCESS
}
