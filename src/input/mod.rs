//! Input module - PendingShellEvents resource and capture_input system
//!
//! Update runs more often than FixedUpdate, so window input is buffered here
//! in arrival order and drained once per simulation tick.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowCloseRequested};

use crate::simulation::ShellEvent;

/// Shell events captured since the last simulation tick
#[derive(Resource, Default)]
pub struct PendingShellEvents {
    events: Vec<ShellEvent>,
    /// Last known cursor position in window coordinates
    pointer: Vec2,
}

impl PendingShellEvents {
    pub fn push(&mut self, event: ShellEvent) {
        self.events.push(event);
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take every buffered event, leaving the buffer empty
    pub fn take(&mut self) -> Vec<ShellEvent> {
        std::mem::take(&mut self.events)
    }

    /// Record one frame of pointer state. A cursor outside the window keeps
    /// the last known position.
    pub fn record_pointer(&mut self, cursor: Option<Vec2>, pressed: bool, released: bool) {
        if let Some(cursor) = cursor
            && cursor != self.pointer
        {
            self.pointer = cursor;
            self.push(ShellEvent::PointerMove {
                x: cursor.x,
                y: cursor.y,
            });
        }

        let Vec2 { x, y } = self.pointer;
        if pressed {
            self.push(ShellEvent::PointerDown { x, y });
        }
        if released {
            self.push(ShellEvent::PointerUp { x, y });
        }
    }
}

/// Runs in Update to capture input state before it's cleared.
/// Escape and window close both become Quit.
pub fn capture_input(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut close_requests: MessageReader<WindowCloseRequested>,
    mut pending: ResMut<PendingShellEvents>,
) {
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());
    pending.record_pointer(
        cursor,
        mouse.just_pressed(MouseButton::Left),
        mouse.just_released(MouseButton::Left),
    );

    for key in keyboard.get_just_pressed() {
        if *key == KeyCode::Escape {
            pending.push(ShellEvent::Quit);
        } else {
            pending.push(ShellEvent::KeyDown {
                key: format!("{:?}", key),
            });
        }
    }

    if close_requests.read().count() > 0 {
        pending.push(ShellEvent::Quit);
    }
}
