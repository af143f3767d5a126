//! Event type definitions

use serde::{Deserialize, Serialize};

use crate::ball::Edge;

/// Everything the simulation reports about a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BallEvent {
    /// Pointer went down and took over the ball
    DragStart { x: f32, y: f32 },
    /// Pointer released; ball launched with the estimated velocity
    Throw { vx: f64, vy: f64, drag_ticks: u32 },
    /// Boundary resolution flipped the ball off an edge
    Bounce { edge: Edge },
    /// Shell asked to quit
    Quit,
}

impl BallEvent {
    /// Short name used by scenario expectations
    pub fn kind(&self) -> &'static str {
        match self {
            BallEvent::DragStart { .. } => "DragStart",
            BallEvent::Throw { .. } => "Throw",
            BallEvent::Bounce { .. } => "Bounce",
            BallEvent::Quit => "Quit",
        }
    }

    /// Edge name for bounce events
    pub fn edge(&self) -> Option<&'static str> {
        match self {
            BallEvent::Bounce { edge } => Some(edge.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for BallEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BallEvent::DragStart { x, y } => write!(f, "DragStart ({:.1}, {:.1})", x, y),
            BallEvent::Throw { vx, vy, drag_ticks } => {
                write!(f, "Throw ({:.2}, {:.2}) after {} ticks", vx, vy, drag_ticks)
            }
            BallEvent::Bounce { edge } => write!(f, "Bounce {}", edge.as_str()),
            BallEvent::Quit => write!(f, "Quit"),
        }
    }
}
