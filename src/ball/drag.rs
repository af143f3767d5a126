//! Drag gesture state: Idle -> Dragging -> Idle

/// Whether the pointer currently owns the ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Ticks spent in the current drag
    Dragging { ticks: u32 },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Pointer down. Returns true if this started a new drag.
    pub fn press(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = DragState::Dragging { ticks: 0 };
        true
    }

    /// Pointer up. Returns the drag length in ticks if a drag ended.
    pub fn release(&mut self) -> Option<u32> {
        match *self {
            DragState::Dragging { ticks } => {
                *self = DragState::Idle;
                Some(ticks)
            }
            DragState::Idle => None,
        }
    }

    /// Count one tick of dragging (no-op while idle)
    pub fn advance(&mut self) {
        if let DragState::Dragging { ticks } = self {
            *ticks = ticks.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_cycle() {
        let mut state = DragState::default();
        assert!(!state.is_dragging());
        assert_eq!(state.release(), None);

        assert!(state.press());
        assert!(state.is_dragging());
        // Second press while held doesn't restart
        state.advance();
        assert!(!state.press());
        state.advance();

        assert_eq!(state.release(), Some(2));
        assert_eq!(state, DragState::Idle);
    }

    #[test]
    fn test_advance_while_idle() {
        let mut state = DragState::Idle;
        state.advance();
        assert_eq!(state, DragState::Idle);
    }
}
