//! Settle sweep - drop many seeded balls headlessly and report how they come to rest
//!
//! Usage:
//!   cargo run --bin simulate -- --count 500 --seed 7
//!   cargo run --bin simulate -- --ticks 20000 --threads 4 --output sweep.json
//!   cargo run --bin simulate -- --quiet

use std::fs;

use ballthrow::simulation::{SweepConfig, run_sweep, sweep::init_parallel};
use ballthrow::tuning::load_ball_tuning;

fn main() {
    let config = match SweepConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: simulate [--count N] [--ticks N] [--seed N] [--threads N] [--output FILE] [--quiet]");
            std::process::exit(2);
        }
    };

    if let Err(e) = init_parallel(config.threads) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let tuning = load_ball_tuning();
    if !config.quiet {
        println!(
            "Sweeping {} balls from seed {} (limit {} ticks)",
            config.count, config.seed, config.max_ticks
        );
    }

    let report = run_sweep(&config, &tuning);

    if !config.quiet {
        let s = &report.summary;
        println!(
            "Settled {}/{}  avg {:.1} ticks  max {} ticks  avg {:.1} bounces",
            s.settled, s.runs, s.avg_ticks_to_rest, s.max_ticks_to_rest, s.avg_bounces
        );
    }

    let json = match serde_json::to_string_pretty(&report) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialize report: {}", e);
            std::process::exit(1);
        }
    };

    match &config.output_file {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                eprintln!("Failed to write {}: {}", path, e);
                std::process::exit(1);
            }
            if !config.quiet {
                println!("Wrote {}", path);
            }
        }
        None => println!("{}", json),
    }
}
