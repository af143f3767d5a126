//! Settle sweep: drop many seeded balls and measure how long they take to rest
//!
//! Uses Rayon to run balls concurrently; each ball is its own independent
//! single-threaded simulation.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ball::Bounds;
use crate::constants::{REST_SPEED, REST_TICKS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::events::EventBus;
use crate::tuning::BallTuning;

use super::state::BallSimulation;

/// Configuration for a sweep run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of balls to simulate
    pub count: u32,
    /// Tick limit per ball
    pub max_ticks: u64,
    /// First seed; ball i uses seed + i
    pub seed: u64,
    /// Rayon threads (0 = auto)
    pub threads: usize,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            count: 100,
            max_ticks: 10_000,
            seed: 0,
            threads: 0,
            output_file: None,
            quiet: false,
        }
    }
}

impl SweepConfig {
    /// Parse configuration from command line arguments
    pub fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        Self::parse(&args[1..])
    }

    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut config = Self::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = args.get(i + 1);
            match flag {
                "--count" => config.count = parse_value(flag, value)?,
                "--ticks" => config.max_ticks = parse_value(flag, value)?,
                "--seed" => config.seed = parse_value(flag, value)?,
                "--threads" => config.threads = parse_value(flag, value)?,
                "--output" => {
                    config.output_file = Some(
                        value
                            .cloned()
                            .ok_or_else(|| format!("Missing value for {}", flag))?,
                    )
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                    i += 1;
                    continue;
                }
                other => return Err(format!("Unknown argument: {}", other)),
            }
            i += 2;
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

/// Outcome for one seeded ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleResult {
    pub seed: u64,
    pub initial_vx: f64,
    pub initial_vy: f64,
    /// Tick the ball came to rest (None = still moving at the tick limit)
    pub ticks_to_rest: Option<u64>,
    pub bounces: u32,
    pub final_x: f64,
    pub final_y: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepSummary {
    pub runs: u32,
    pub settled: u32,
    pub avg_ticks_to_rest: f64,
    pub max_ticks_to_rest: u64,
    pub avg_bounces: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub tuning: BallTuning,
    pub summary: SweepSummary,
    pub results: Vec<SettleResult>,
}

/// Initialize the global Rayon pool. Call once before sweeping.
pub fn init_parallel(threads: usize) -> Result<(), String> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to initialize Rayon thread pool: {}", e))?;
    }
    Ok(())
}

/// Simulate one seeded ball until it rests or hits the tick limit
pub fn settle_ball(seed: u64, bounds: Bounds, tuning: &BallTuning, max_ticks: u64) -> SettleResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sim =
        BallSimulation::spawn(bounds, tuning.clone(), &mut rng).with_bus(EventBus::disabled());
    let initial = sim.ball().velocity;

    let mut bounces = 0;
    let mut still_ticks = 0;
    let mut ticks_to_rest = None;

    while sim.tick_count() < max_ticks {
        if sim.tick(&[], Vec2::ZERO).is_some() {
            bounces += 1;
        }

        if sim.ball().is_resting(&bounds, tuning, REST_SPEED) {
            still_ticks += 1;
            if still_ticks >= REST_TICKS {
                ticks_to_rest = Some(sim.tick_count() + 1 - u64::from(REST_TICKS));
                break;
            }
        } else {
            still_ticks = 0;
        }
    }

    SettleResult {
        seed,
        initial_vx: initial.x,
        initial_vy: initial.y,
        ticks_to_rest,
        bounces,
        final_x: sim.ball().position.x,
        final_y: sim.ball().position.y,
    }
}

pub fn summarize(results: &[SettleResult]) -> SweepSummary {
    let settled: Vec<u64> = results.iter().filter_map(|r| r.ticks_to_rest).collect();
    let runs = results.len() as u32;
    SweepSummary {
        runs,
        settled: settled.len() as u32,
        avg_ticks_to_rest: if settled.is_empty() {
            0.0
        } else {
            settled.iter().sum::<u64>() as f64 / settled.len() as f64
        },
        max_ticks_to_rest: settled.iter().copied().max().unwrap_or(0),
        avg_bounces: if runs == 0 {
            0.0
        } else {
            results.iter().map(|r| r.bounces as f64).sum::<f64>() / runs as f64
        },
    }
}

/// Run the whole sweep in parallel; results come back in seed order
pub fn run_sweep(config: &SweepConfig, tuning: &BallTuning) -> SweepReport {
    let bounds = Bounds::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let seeds: Vec<u64> = (0..u64::from(config.count))
        .map(|i| config.seed.wrapping_add(i))
        .collect();

    let results: Vec<SettleResult> = seeds
        .par_iter()
        .map(|&seed| settle_ball(seed, bounds, tuning, config.max_ticks))
        .collect();

    let summary = summarize(&results);
    info!(
        "Sweep finished: {}/{} settled, avg {:.1} ticks",
        summary.settled, summary.runs, summary.avg_ticks_to_rest
    );

    SweepReport {
        tuning: tuning.clone(),
        summary,
        results,
    }
}
