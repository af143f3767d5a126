//! Ball module - entity data, physics integrator, cursor tracker, and drag state

mod components;
mod drag;
mod physics;
mod tracker;

pub use components::*;
pub use drag::*;
pub use tracker::*;
