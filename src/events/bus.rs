//! Event Bus - collects simulation events for logging and test assertions
//!
//! The simulation emits events as it ticks; the app drains them into the log
//! and the scenario runner drains them into its captured sequence.

use bevy::prelude::*;

use super::types::BallEvent;

/// Tick-stamped event
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Simulation tick the event happened on
    pub tick: u64,
    pub event: BallEvent,
}

#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted since the last drain
    pending: Vec<BusEvent>,

    /// Current tick (for stamping)
    tick: u64,

    /// Whether the bus is enabled (disabled for sweeps)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    pub fn emit(&mut self, event: BallEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            tick: self.tick,
            event,
        });
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Take every pending event
    pub fn drain(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::Edge;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.set_tick(42);
        bus.emit(BallEvent::Bounce {
            edge: Edge::Bottom,
        });

        assert_eq!(bus.pending_count(), 1);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tick, 42);
        assert_eq!(events[0].event.edge(), Some("Bottom"));
        assert_eq!(bus.pending_count(), 0);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_disabled_bus() {
        let mut bus = EventBus::disabled();
        bus.emit(BallEvent::Quit);
        assert_eq!(bus.pending_count(), 0);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_kinds() {
        let throw = BallEvent::Throw {
            vx: 1.0,
            vy: -2.0,
            drag_ticks: 5,
        };
        assert_eq!(throw.kind(), "Throw");
        assert_eq!(throw.edge(), None);
        assert_eq!(throw.to_string(), "Throw (1.00, -2.00) after 5 ticks");
    }
}
