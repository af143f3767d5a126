//! Scripted shell for headless runs

use bevy::prelude::*;
use std::collections::HashMap;

use crate::ball::BoundingBox;

use super::driver::Shell;
use super::state::ShellEvent;

/// Feeds events by frame number and records what the driver drew.
///
/// Pointer events move the shell's pointer, so `pointer_position` reflects
/// the last scripted down/move/up.
#[derive(Default)]
pub struct HeadlessShell {
    /// frame -> events delivered on that frame's poll
    script: HashMap<u64, Vec<ShellEvent>>,
    frame: u64,
    pointer: Vec2,
    draws: Vec<BoundingBox>,
    presented: u64,
}

impl HeadlessShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the given frame (0-based poll count)
    pub fn push(&mut self, frame: u64, event: ShellEvent) {
        self.script.entry(frame).or_default().push(event);
    }

    /// Frames polled so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn draws(&self) -> &[BoundingBox] {
        &self.draws
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Shell for HeadlessShell {
    fn poll_events(&mut self) -> Vec<ShellEvent> {
        let events = self.script.remove(&self.frame).unwrap_or_default();
        for event in &events {
            match *event {
                ShellEvent::PointerDown { x, y }
                | ShellEvent::PointerUp { x, y }
                | ShellEvent::PointerMove { x, y } => self.pointer = Vec2::new(x, y),
                ShellEvent::Quit | ShellEvent::KeyDown { .. } => {}
            }
        }
        self.frame += 1;
        events
    }

    fn pointer_position(&self) -> Vec2 {
        self.pointer
    }

    fn draw_entity(&mut self, bounding_box: BoundingBox) {
        self.draws.push(bounding_box);
    }

    fn present_frame(&mut self) {
        self.presented += 1;
    }
}
