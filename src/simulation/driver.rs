//! Frame driver: poll, step, draw, present, sleep out the tick budget
//!
//! Time is not decoupled from frame rate. A tick that runs over budget is
//! simply late; there is no catch-up or frame skipping.

use bevy::prelude::*;
use std::time::{Duration, Instant};

use crate::ball::BoundingBox;
use crate::constants::TICK_BUDGET_MS;

use super::state::{BallSimulation, ShellEvent};

/// Windowing/rendering collaborator the simulation is driven by
pub trait Shell {
    /// Every event since the last poll, in arrival order
    fn poll_events(&mut self) -> Vec<ShellEvent>;
    /// Current pointer location in window coordinates
    fn pointer_position(&self) -> Vec2;
    /// Request the ball's bounding box be rendered this frame
    fn draw_entity(&mut self, bounding_box: BoundingBox);
    /// Flip the draw buffer (exactly once per tick)
    fn present_frame(&mut self);
}

pub struct FrameDriver<S: Shell> {
    shell: S,
    sim: BallSimulation,
    budget: Duration,
    sleep: bool,
}

impl<S: Shell> FrameDriver<S> {
    pub fn new(shell: S, sim: BallSimulation) -> Self {
        Self {
            shell,
            sim,
            budget: Duration::from_millis(TICK_BUDGET_MS),
            sleep: true,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Run ticks back to back (headless tests and sweeps)
    pub fn without_sleep(mut self) -> Self {
        self.sleep = false;
        self
    }

    pub fn sim(&self) -> &BallSimulation {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut BallSimulation {
        &mut self.sim
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// One tick. Returns false once the simulation has been asked to quit.
    pub fn run_tick(&mut self) -> bool {
        let events = self.shell.poll_events();
        let pointer = self.shell.pointer_position();
        self.sim.tick(&events, pointer);

        if self.sim.is_finished() {
            return false;
        }

        self.shell.draw_entity(self.sim.ball().bounding_box());
        self.shell.present_frame();
        true
    }

    /// Run until quit or `max_ticks`; returns the number of ticks run
    pub fn run(&mut self, max_ticks: Option<u64>) -> u64 {
        let mut ticks = 0;
        loop {
            if max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }
            let started = Instant::now();
            let keep_going = self.run_tick();
            ticks += 1;
            if !keep_going {
                break;
            }

            let elapsed = started.elapsed();
            if self.sleep && elapsed < self.budget {
                std::thread::sleep(self.budget - elapsed);
            } else if self.sleep {
                debug!("Tick {} over budget by {:?}", ticks, elapsed - self.budget);
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::{Ball, Bounds};
    use crate::simulation::HeadlessShell;
    use crate::tuning::BallTuning;
    use bevy::math::DVec2;

    fn sim() -> BallSimulation {
        BallSimulation::new(
            Ball::new(DVec2::new(600.0, 400.0), DVec2::new(20.0, 5.0), 50.0),
            Bounds::new(1200.0, 800.0),
            BallTuning::default(),
        )
    }

    #[test]
    fn test_draw_and_present_once_per_tick() {
        let mut driver = FrameDriver::new(HeadlessShell::new(), sim()).without_sleep();
        assert_eq!(driver.run(Some(10)), 10);
        assert_eq!(driver.shell().presented(), 10);
        assert_eq!(driver.shell().draws().len(), 10);
        assert_eq!(driver.shell().draws()[0].x, 620.0);
    }

    #[test]
    fn test_quit_stops_loop_without_drawing() {
        let mut shell = HeadlessShell::new();
        shell.push(3, ShellEvent::Quit);
        let mut driver = FrameDriver::new(shell, sim()).without_sleep();
        assert_eq!(driver.run(Some(100)), 4);
        assert_eq!(driver.shell().presented(), 3);
        assert!(driver.sim().is_finished());
    }

    #[test]
    fn test_sleeps_out_budget() {
        let mut driver = FrameDriver::new(HeadlessShell::new(), sim())
            .with_budget(Duration::from_millis(5));
        let started = Instant::now();
        driver.run(Some(4));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
