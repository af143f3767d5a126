//! Ball tuning values (decoupled from constants so they can be hot-reloaded)

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::constants::*;

fn default_gravity() -> f64 {
    GRAVITY
}
fn default_wall_restitution() -> f64 {
    WALL_RESTITUTION
}
fn default_floor_restitution() -> f64 {
    FLOOR_RESTITUTION
}
fn default_floor_friction() -> f64 {
    FLOOR_FRICTION
}
fn default_tracked_samples() -> usize {
    TRACKED_SAMPLES
}
fn default_ignored_recent_samples() -> usize {
    IGNORED_RECENT_SAMPLES
}
fn default_throw_scalar() -> f64 {
    THROW_SCALAR
}
fn default_initial_vx_range() -> (f64, f64) {
    BALL_INITIAL_VX_RANGE
}
fn default_initial_vy_range() -> (f64, f64) {
    BALL_INITIAL_VY_RANGE
}

/// Path to ball tuning config
pub const BALL_TUNING_FILE: &str = "config/ball_tuning.json";

/// How the floor treats a ball that has almost stopped bouncing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum RestingMode {
    /// Friction on every floor contact, no special case
    #[default]
    Friction,
    /// Zero vy and damp vx once the post-bounce vertical speed drops below threshold
    SlideThreshold { threshold: f64 },
}

/// Runtime-adjustable physics values
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallTuning {
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_wall_restitution")]
    pub wall_restitution: f64,
    #[serde(default = "default_floor_restitution")]
    pub floor_restitution: f64,
    #[serde(default = "default_floor_friction")]
    pub floor_friction: f64,
    #[serde(default)]
    pub resting_mode: RestingMode,
    // Cursor tracking
    #[serde(default = "default_tracked_samples")]
    pub tracked_samples: usize,
    #[serde(default = "default_ignored_recent_samples")]
    pub ignored_recent_samples: usize,
    #[serde(default = "default_throw_scalar")]
    pub throw_scalar: f64,
    // Spawn
    #[serde(default = "default_initial_vx_range")]
    pub initial_vx_range: (f64, f64),
    #[serde(default = "default_initial_vy_range")]
    pub initial_vy_range: (f64, f64),
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            wall_restitution: default_wall_restitution(),
            floor_restitution: default_floor_restitution(),
            floor_friction: default_floor_friction(),
            resting_mode: RestingMode::default(),
            tracked_samples: default_tracked_samples(),
            ignored_recent_samples: default_ignored_recent_samples(),
            throw_scalar: default_throw_scalar(),
            initial_vx_range: default_initial_vx_range(),
            initial_vy_range: default_initial_vy_range(),
        }
    }
}

impl BallTuning {
    /// Reject values that would break ring-buffer arithmetic or invert bounces
    pub fn validate(&self) -> Result<(), String> {
        if self.tracked_samples < 2 {
            return Err(format!(
                "tracked_samples must be at least 2, got {}",
                self.tracked_samples
            ));
        }
        for (name, value) in [
            ("wall_restitution", self.wall_restitution),
            ("floor_restitution", self.floor_restitution),
            ("floor_friction", self.floor_friction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", name, value));
            }
        }
        for (name, (lo, hi)) in [
            ("initial_vx_range", self.initial_vx_range),
            ("initial_vy_range", self.initial_vy_range),
        ] {
            if lo > hi {
                return Err(format!("{} is inverted: ({}, {})", name, lo, hi));
            }
        }
        Ok(())
    }
}

pub fn load_ball_tuning_from_file(path: &str) -> Result<BallTuning, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let tuning: BallTuning =
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))?;
    tuning
        .validate()
        .map_err(|e| format!("Invalid tuning in {}: {}", path, e))?;
    Ok(tuning)
}

/// Load tuning from the default file, falling back to defaults on any error
pub fn load_ball_tuning() -> BallTuning {
    match load_ball_tuning_from_file(BALL_TUNING_FILE) {
        Ok(tuning) => tuning,
        Err(err) => {
            warn!("{}, using default tuning", err);
            BallTuning::default()
        }
    }
}
