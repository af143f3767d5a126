//! BallSimulation - the single simulated ball plus its drag gesture

use bevy::math::DVec2;
use bevy::prelude::*;
use rand::Rng;

use crate::ball::{Ball, Bounds, CursorHistory, DragState, Edge};
use crate::constants::BALL_SIZE;
use crate::events::{BallEvent, EventBus};
use crate::tuning::BallTuning;

/// Input delivered by the shell each tick, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    Quit,
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    KeyDown { key: String },
}

/// Owns the ball, its cursor history and the drag state.
///
/// Everything happens synchronously inside [`BallSimulation::tick`]; one
/// call is one fixed simulation step.
#[derive(Resource)]
pub struct BallSimulation {
    ball: Ball,
    history: CursorHistory,
    drag: DragState,
    bounds: Bounds,
    tuning: BallTuning,
    tick: u64,
    finished: bool,
    bus: EventBus,
}

impl BallSimulation {
    pub fn new(ball: Ball, bounds: Bounds, tuning: BallTuning) -> Self {
        let history = CursorHistory::new(tuning.tracked_samples, tuning.ignored_recent_samples);
        Self {
            ball,
            history,
            drag: DragState::Idle,
            bounds,
            tuning,
            tick: 0,
            finished: false,
            bus: EventBus::new(),
        }
    }

    /// Ball at the window center with a random launch velocity
    pub fn spawn(bounds: Bounds, tuning: BallTuning, rng: &mut impl Rng) -> Self {
        let ball = Ball::spawn(&bounds, BALL_SIZE, &tuning, rng);
        Self::new(ball, bounds, tuning)
    }

    /// Replace the event bus (e.g. a disabled one for sweeps)
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn tuning(&self) -> &BallTuning {
        &self.tuning
    }

    pub fn history(&self) -> &CursorHistory {
        &self.history
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Swap in new tuning; the history is rebuilt only if its shape changed
    pub fn set_tuning(&mut self, tuning: BallTuning) {
        if tuning.tracked_samples != self.tuning.tracked_samples
            || tuning.ignored_recent_samples != self.tuning.ignored_recent_samples
        {
            let latest = self.history.latest();
            self.history =
                CursorHistory::new(tuning.tracked_samples, tuning.ignored_recent_samples);
            // Mid-drag, the new window starts from where the pointer is now
            if self.drag.is_dragging() {
                self.history.fill(latest);
            }
        }
        self.tuning = tuning;
    }

    /// Apply one shell event to the drag state machine
    pub fn handle_event(&mut self, event: &ShellEvent) {
        match *event {
            ShellEvent::Quit => {
                if !self.finished {
                    info!("Quit requested at tick {}", self.tick);
                    self.finished = true;
                    self.bus.emit(BallEvent::Quit);
                }
            }
            ShellEvent::PointerDown { x, y } => {
                if self.drag.press() {
                    self.history.fill(Vec2::new(x, y));
                    debug!("Drag started at ({:.1}, {:.1})", x, y);
                    self.bus.emit(BallEvent::DragStart { x, y });
                }
            }
            ShellEvent::PointerUp { .. } => {
                if let Some(drag_ticks) = self.drag.release() {
                    let velocity = self.history.estimate_velocity(self.tuning.throw_scalar);
                    self.ball.velocity = velocity;
                    debug!(
                        "Thrown with ({:.2}, {:.2}) after {} ticks",
                        velocity.x, velocity.y, drag_ticks
                    );
                    self.bus.emit(BallEvent::Throw {
                        vx: velocity.x,
                        vy: velocity.y,
                        drag_ticks,
                    });
                }
            }
            ShellEvent::PointerMove { .. } | ShellEvent::KeyDown { .. } => {}
        }
    }

    /// One fixed step: drain events, then either follow the pointer or fall freely.
    /// Returns the edge bounced off this tick, if any.
    pub fn tick(&mut self, events: &[ShellEvent], pointer: Vec2) -> Option<Edge> {
        self.tick += 1;
        self.bus.set_tick(self.tick);

        for event in events {
            self.handle_event(event);
        }

        if self.drag.is_dragging() {
            self.step_drag(pointer);
            None
        } else {
            self.step_free()
        }
    }

    /// Free tick (gravity + bounce)
    pub fn step_free(&mut self) -> Option<Edge> {
        let edge = self.ball.step_free(&self.bounds, &self.tuning);
        if let Some(edge) = edge {
            self.bus.emit(BallEvent::Bounce { edge });
        }
        edge
    }

    /// Drag tick: record the pointer, re-estimate velocity, center the ball on the pointer
    pub fn step_drag(&mut self, pointer: Vec2) {
        self.drag.advance();
        self.history.record_sample(pointer.x, pointer.y);
        self.ball.velocity = self.history.estimate_velocity(self.tuning.throw_scalar);
        let half = self.ball.size / 2.0;
        let target = pointer.as_dvec2() - DVec2::splat(half);
        self.ball.set_position(target.x, target.y);
    }
}
