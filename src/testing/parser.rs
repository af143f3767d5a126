//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{BALL_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::simulation::ShellEvent;
use crate::tuning::{BallTuning, RestingMode};

/// Complete scenario definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    /// Straight-line drags expanded into down/move/up frames
    #[serde(default)]
    pub drag: Vec<DragGesture>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Initial ball and window state.
///
/// A ball without `x`/`y` spawns at the window center; missing `vx`/`vy`
/// come from `seed` (or 0 without one).
#[derive(Debug, Clone, Deserialize)]
pub struct TestSetup {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_size")]
    pub size: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub vx: Option<f64>,
    pub vy: Option<f64>,
    pub seed: Option<u64>,
    /// Run at least this many frames
    pub frames: Option<u64>,
    #[serde(default)]
    pub tuning: TuningOverrides,
}

fn default_width() -> f64 {
    WINDOW_WIDTH
}

fn default_height() -> f64 {
    WINDOW_HEIGHT
}

fn default_size() -> f64 {
    BALL_SIZE
}

/// Per-scenario tweaks on top of the default tuning
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TuningOverrides {
    pub gravity: Option<f64>,
    pub wall_restitution: Option<f64>,
    pub floor_restitution: Option<f64>,
    pub floor_friction: Option<f64>,
    pub slide_threshold: Option<f64>,
    pub tracked_samples: Option<usize>,
    pub ignored_recent_samples: Option<usize>,
    pub throw_scalar: Option<f64>,
}

impl TuningOverrides {
    pub fn apply(&self, mut tuning: BallTuning) -> BallTuning {
        if let Some(v) = self.gravity {
            tuning.gravity = v;
        }
        if let Some(v) = self.wall_restitution {
            tuning.wall_restitution = v;
        }
        if let Some(v) = self.floor_restitution {
            tuning.floor_restitution = v;
        }
        if let Some(v) = self.floor_friction {
            tuning.floor_friction = v;
        }
        if let Some(threshold) = self.slide_threshold {
            tuning.resting_mode = RestingMode::SlideThreshold { threshold };
        }
        if let Some(v) = self.tracked_samples {
            tuning.tracked_samples = v;
        }
        if let Some(v) = self.ignored_recent_samples {
            tuning.ignored_recent_samples = v;
        }
        if let Some(v) = self.throw_scalar {
            tuning.throw_scalar = v;
        }
        tuning
    }
}

/// Shell input delivered on one frame (applied in field order: down, move, up, key, quit)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    pub pointer_down: Option<[f32; 2]>,
    pub pointer_move: Option<[f32; 2]>,
    pub pointer_up: Option<[f32; 2]>,
    pub key: Option<String>,
    #[serde(default)]
    pub quit: bool,
}

impl FrameInput {
    pub fn events(&self) -> Vec<ShellEvent> {
        let mut events = Vec::new();
        if let Some([x, y]) = self.pointer_down {
            events.push(ShellEvent::PointerDown { x, y });
        }
        if let Some([x, y]) = self.pointer_move {
            events.push(ShellEvent::PointerMove { x, y });
        }
        if let Some([x, y]) = self.pointer_up {
            events.push(ShellEvent::PointerUp { x, y });
        }
        if let Some(key) = &self.key {
            events.push(ShellEvent::KeyDown { key: key.clone() });
        }
        if self.quit {
            events.push(ShellEvent::Quit);
        }
        events
    }
}

/// Press at `from` on `start_frame`, move in equal steps, release at `to`
/// after `ticks` frames.
#[derive(Debug, Clone, Deserialize)]
pub struct DragGesture {
    pub start_frame: u64,
    pub ticks: u64,
    pub from: [f32; 2],
    pub to: [f32; 2],
}

impl DragGesture {
    /// Frame-tagged inputs for this gesture
    pub fn frames(&self) -> Vec<FrameInput> {
        let mut frames = vec![FrameInput {
            frame: self.start_frame,
            pointer_down: Some(self.from),
            ..Default::default()
        }];

        let steps = self.ticks.max(1);
        for step in 1..steps {
            frames.push(FrameInput {
                frame: self.start_frame + step,
                pointer_move: Some(lerp(self.from, self.to, step as f32, steps as f32)),
                ..Default::default()
            });
        }

        frames.push(FrameInput {
            frame: self.start_frame + steps,
            pointer_up: Some(self.to),
            ..Default::default()
        });
        frames
    }
}

/// `a + (b - a) * step / steps`, multiplied first so whole-pixel paths stay exact
fn lerp(a: [f32; 2], b: [f32; 2], step: f32, steps: f32) -> [f32; 2] {
    [
        a[0] + (b[0] - a[0]) * step / steps,
        a[1] + (b[1] - a[1]) * step / steps,
    ]
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    /// Only for Bounce: "Right", "Left", "Bottom" or "Top"
    pub edge: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after a given frame has run
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

impl TestDefinition {
    /// Explicit inputs plus expanded drag gestures, sorted by frame
    pub fn all_inputs(&self) -> Vec<FrameInput> {
        let mut inputs: Vec<FrameInput> = self.input.clone();
        for gesture in &self.drag {
            inputs.extend(gesture.frames());
        }
        inputs.sort_by_key(|input| input.frame);
        inputs
    }

    /// Last frame the runner must reach
    pub fn last_frame(&self) -> u64 {
        let inputs = self.all_inputs().iter().map(|i| i.frame).max();
        let states = self.expect.state.iter().map(|s| s.after_frame).max();
        let sequence = self.expect.sequence.iter().filter_map(|e| e.frame_max).max();
        let requested = self.setup.frames.map(|f| f.saturating_sub(1));

        [inputs, states, sequence, requested]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(59)
    }
}

/// Parse a scenario file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
x = 100.0
y = 200.0
vx = 3.0

[[input]]
frame = 2
pointer_down = [10.0, 20.0]

[[expect.state]]
after_frame = 4
checks = ["ball.x = 10"]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.setup.x, Some(100.0));
        assert_eq!(def.setup.vy, None);
        assert_eq!(def.setup.width, WINDOW_WIDTH);
        assert_eq!(
            def.input[0].events(),
            vec![ShellEvent::PointerDown { x: 10.0, y: 20.0 }]
        );
        assert_eq!(def.last_frame(), 4);
    }

    #[test]
    fn test_drag_gesture_expands() {
        let gesture = DragGesture {
            start_frame: 5,
            ticks: 4,
            from: [0.0, 0.0],
            to: [8.0, -4.0],
        };
        let frames = gesture.frames();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0].frame, 5);
        assert_eq!(frames[0].pointer_down, Some([0.0, 0.0]));
        assert_eq!(frames[2].pointer_move, Some([4.0, -2.0]));
        assert_eq!(frames[4].frame, 9);
        assert_eq!(frames[4].pointer_up, Some([8.0, -4.0]));
    }

    #[test]
    fn test_tuning_overrides() {
        let overrides = TuningOverrides {
            gravity: Some(1.0),
            slide_threshold: Some(2.0),
            ..Default::default()
        };
        let tuning = overrides.apply(BallTuning::default());
        assert_eq!(tuning.gravity, 1.0);
        assert_eq!(tuning.resting_mode, RestingMode::SlideThreshold { threshold: 2.0 });
        assert_eq!(tuning.throw_scalar, BallTuning::default().throw_scalar);
    }

    #[test]
    fn test_default_frame_count() {
        let def: TestDefinition = toml::from_str("name = \"Empty\"\n[setup]\n").unwrap();
        assert_eq!(def.last_frame(), 59);
    }
}
