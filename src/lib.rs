//! Ballthrow - a single bouncing ball you can grab and throw, built with Bevy
//!
//! The simulation itself is plain data stepped one fixed tick at a time
//! ([`simulation::BallSimulation`]); the window app, the headless sweep and
//! the scenario runner all drive that same type.

pub mod ball;
pub mod config_watcher;
pub mod constants;
pub mod events;
pub mod generate;
pub mod helpers;
pub mod input;
pub mod settings;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Re-export commonly used types for convenience
pub use ball::{Ball, BallSprite, BoundingBox, Bounds, CursorHistory, DragState, Edge};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use events::{BallEvent, BusEvent, EventBus};
pub use helpers::*;
pub use input::PendingShellEvents;
pub use settings::InitSettings;
pub use simulation::{BallSimulation, FrameDriver, HeadlessShell, Shell, ShellEvent};
pub use tuning::{BallTuning, RestingMode};
