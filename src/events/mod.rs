//! Simulation events
//!
//! The EventBus collects tick-stamped events (drag start, throw, bounces,
//! quit) so the app can log them and scenario tests can assert on them.

mod bus;
mod types;

pub use bus::{BusEvent, EventBus};
pub use types::BallEvent;
