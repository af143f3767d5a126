//! Scenario execution engine
//!
//! Scenarios run through the same [`FrameDriver`] the windowless loop uses,
//! with a [`HeadlessShell`] replaying the scripted input and no tick sleep.

use bevy::math::DVec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ball::{Ball, Bounds};
use crate::simulation::{BallSimulation, FrameDriver, HeadlessShell};
use crate::tuning::BallTuning;

use super::assertions::{AssertionError, CapturedEvent, check_sequence, check_state};
use super::parser::{TestDefinition, TestSetup};

/// Result of running a scenario
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { frame: Option<u64>, error: AssertionError },
    Error { message: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

/// Build the starting simulation described by a scenario's setup
pub fn build_simulation(setup: &TestSetup) -> Result<BallSimulation, String> {
    let tuning = setup.tuning.apply(BallTuning::default());
    tuning.validate()?;

    let bounds = Bounds::new(setup.width, setup.height);
    let spawned = match setup.seed {
        Some(seed) => Ball::spawn(&bounds, setup.size, &tuning, &mut StdRng::seed_from_u64(seed)),
        None => Ball::new(bounds.center(), DVec2::ZERO, setup.size),
    };

    let position = DVec2::new(
        setup.x.unwrap_or(spawned.position.x),
        setup.y.unwrap_or(spawned.position.y),
    );
    let velocity = DVec2::new(
        setup.vx.unwrap_or(spawned.velocity.x),
        setup.vy.unwrap_or(spawned.velocity.y),
    );

    Ok(BallSimulation::new(
        Ball::new(position, velocity, setup.size),
        bounds,
        tuning,
    ))
}

/// Run a single scenario and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let sim = match build_simulation(&test.setup) {
        Ok(sim) => sim,
        Err(message) => return TestResult::Error { message },
    };

    let mut shell = HeadlessShell::new();
    for input in test.all_inputs() {
        for event in input.events() {
            shell.push(input.frame, event);
        }
    }

    let mut driver = FrameDriver::new(shell, sim).without_sleep();
    let last_frame = test.last_frame();
    let mut captured = Vec::new();

    let mut frame = 0;
    loop {
        let running = driver.run_tick();
        captured.extend(
            driver
                .sim_mut()
                .bus_mut()
                .drain()
                .iter()
                .map(CapturedEvent::from_bus_event),
        );

        for assertion in test.expect.state.iter().filter(|a| a.after_frame == frame) {
            if let Err(error) = check_state(assertion, driver.sim()) {
                return TestResult::Fail {
                    frame: Some(frame),
                    error,
                };
            }
        }

        if !running || frame >= last_frame {
            break;
        }
        frame += 1;
    }

    // State checks scheduled after a quit never ran
    if let Some(missed) = test.expect.state.iter().find(|a| a.after_frame > frame) {
        return TestResult::Fail {
            frame: Some(frame),
            error: AssertionError {
                message: format!("Simulation ended before frame {}", missed.after_frame),
                expected: format!("frame {} reached", missed.after_frame),
                actual: format!("stopped after frame {}", frame),
            },
        };
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        return TestResult::Fail { frame: None, error };
    }

    TestResult::Pass { frames: frame + 1 }
}
