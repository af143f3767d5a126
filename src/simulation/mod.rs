//! Simulation core and drivers
//!
//! `BallSimulation` is the whole simulation state. `FrameDriver` runs it
//! against any `Shell` (the scripted `HeadlessShell` here, or the Bevy app in
//! `main.rs` which drives the same tick from `FixedUpdate`).

mod driver;
mod headless;
mod state;
pub mod sweep;

pub use driver::{FrameDriver, Shell};
pub use headless::HeadlessShell;
pub use state::{BallSimulation, ShellEvent};
pub use sweep::{SettleResult, SweepConfig, SweepReport, SweepSummary, run_sweep};
