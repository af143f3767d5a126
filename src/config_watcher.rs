//! Tuning file auto-reload system
//!
//! Polls the tuning file every few seconds and swaps in new values when it
//! is modified. Invalid edits are logged and ignored.

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::simulation::BallSimulation;
use crate::tuning::{BALL_TUNING_FILE, BallTuning, load_ball_tuning_from_file};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

/// Tracks the tuning file's modification time for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub path: String,
    /// Last known modification time
    pub tuning_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self::watching(BALL_TUNING_FILE)
    }
}

impl ConfigWatcher {
    pub fn watching(path: &str) -> Self {
        Self {
            timer: 0.0,
            path: path.to_string(),
            tuning_mtime: get_mtime(path),
        }
    }

    /// Advance the poll timer; on a due poll, return freshly loaded tuning
    /// if the file changed and parses
    pub fn poll(&mut self, delta_secs: f32) -> Option<BallTuning> {
        self.timer += delta_secs;
        if self.timer < CHECK_INTERVAL {
            return None;
        }
        self.timer = 0.0;

        let mtime = get_mtime(&self.path);
        if mtime == self.tuning_mtime {
            return None;
        }
        self.tuning_mtime = mtime;

        match load_ball_tuning_from_file(&self.path) {
            Ok(tuning) => {
                info!("Auto-reloaded tuning from {}", self.path);
                Some(tuning)
            }
            Err(e) => {
                warn!("{}, keeping current tuning", e);
                None
            }
        }
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Check for tuning file changes and apply them to the running simulation
pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut sim: ResMut<BallSimulation>,
) {
    if let Some(tuning) = watcher.poll(time.delta_secs()) {
        sim.set_tuning(tuning);
    }
}
