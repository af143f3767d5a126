//! Tunable constants for ballthrow
//!
//! All simulation values are defined here for easy tweaking. Units are pixels
//! and fixed ticks; nothing here depends on wall-clock time.

use bevy::prelude::*;

// =============================================================================
// WINDOW
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.35, 0.32, 0.28);
pub const WINDOW_WIDTH: f64 = 1200.0;
pub const WINDOW_HEIGHT: f64 = 800.0;
pub const WINDOW_TITLE: &str = "Ballthrow";

// =============================================================================
// BALL
// =============================================================================

pub const BALL_SIZE: f64 = 50.0; // Bounding box edge length
pub const BALL_INITIAL_VX_RANGE: (f64, f64) = (-20.0, 20.0);
pub const BALL_INITIAL_VY_RANGE: (f64, f64) = (-20.0, 5.0);

// =============================================================================
// PHYSICS (per tick, not per second)
// =============================================================================

pub const GRAVITY: f64 = 3.0; // Added to vy every free tick
pub const WALL_RESTITUTION: f64 = 0.9; // Side walls and ceiling
pub const FLOOR_RESTITUTION: f64 = 0.8; // Vertical retention on floor bounce
pub const FLOOR_FRICTION: f64 = 0.97; // Horizontal retention on floor contact
pub const EDGE_CLAMP_MARGIN: f64 = 1.0; // Keeps the box off the edge so it doesn't re-trigger
pub const SLIDE_THRESHOLD: f64 = 4.0; // Only used by the slide-threshold resting mode

// =============================================================================
// CURSOR TRACKING
// =============================================================================

pub const TRACKED_SAMPLES: usize = 10;
pub const IGNORED_RECENT_SAMPLES: usize = 2; // Newest samples skipped by the velocity estimate
pub const THROW_SCALAR: f64 = 1.5;

// =============================================================================
// FRAME TIMING
// =============================================================================

pub const TICKS_PER_SECOND: f64 = 60.0;
pub const TICK_BUDGET_MS: u64 = 1000 / 60;

// =============================================================================
// REST DETECTION (headless sweep)
// =============================================================================

pub const REST_SPEED: f64 = 0.5;
pub const REST_TICKS: u32 = 30; // Consecutive slow ticks on the floor before calling it settled
