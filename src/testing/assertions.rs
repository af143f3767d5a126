//! Assertion checking for scenario expectations

use super::parser::{ExpectedEvent, StateAssertion};
use crate::ball::DragState;
use crate::events::BusEvent;
use crate::simulation::BallSimulation;

/// Tolerance for `=` and `!=` on floats
const FLOAT_EPSILON: f64 = 1e-6;
/// Tolerance for the `~` operator
const APPROX_EPSILON: f64 = 0.01;

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    /// 0-based frame; tick N runs on frame N - 1
    pub frame: u64,
    pub event_type: String,
    pub edge: Option<String>,
}

impl CapturedEvent {
    pub fn from_bus_event(event: &BusEvent) -> Self {
        Self {
            frame: event.tick.saturating_sub(1),
            event_type: event.event.kind().to_string(),
            edge: event.event.edge().map(str::to_string),
        }
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        // Find matching event starting from current position
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            if cap.event_type != exp.event {
                return false;
            }
            match &exp.edge {
                Some(edge) => cap.edge.as_deref() == Some(edge.as_str()),
                None => true,
            }
        });

        let Some((offset, cap)) = found else {
            let edge_str = exp.edge.as_ref().map(|e| format!(" (edge: {})", e)).unwrap_or_default();
            return Err(AssertionError {
                message: format!("Event #{} '{}'{} not found", i + 1, exp.event, edge_str),
                expected: format!("'{}' event in sequence", exp.event),
                actual: format!(
                    "events after position {}: {:?}",
                    captured_idx,
                    captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                ),
            });
        };

        if let Some(min) = exp.frame_min
            && cap.frame < min
        {
            return Err(AssertionError {
                message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                expected: format!("frame >= {}", min),
                actual: format!("frame {}", cap.frame),
            });
        }
        if let Some(max) = exp.frame_max
            && cap.frame > max
        {
            return Err(AssertionError {
                message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                expected: format!("frame <= {}", max),
                actual: format!("frame {}", cap.frame),
            });
        }
        captured_idx += offset + 1;
    }

    Ok(())
}

/// Value read from the simulation for a check path
enum Observed {
    Number(f64),
    Flag(bool),
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<", "~"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

fn observe(path: &str, sim: &BallSimulation) -> Option<Observed> {
    let ball = sim.ball();
    let observed = match path {
        "ball.x" => Observed::Number(ball.position.x),
        "ball.y" => Observed::Number(ball.position.y),
        "ball.vx" => Observed::Number(ball.velocity.x),
        "ball.vy" => Observed::Number(ball.velocity.y),
        "ball.right" => Observed::Number(ball.position.x + ball.size),
        "ball.bottom" => Observed::Number(ball.position.y + ball.size),
        "drag.active" => Observed::Flag(sim.drag().is_dragging()),
        "drag.ticks" => match sim.drag() {
            DragState::Dragging { ticks } => Observed::Number(f64::from(ticks)),
            DragState::Idle => Observed::Number(0.0),
        },
        "tick" => Observed::Number(sim.tick_count() as f64),
        "finished" => Observed::Flag(sim.is_finished()),
        _ => return None,
    };
    Some(observed)
}

/// Check state assertions against the simulation
pub fn check_state(assertion: &StateAssertion, sim: &BallSimulation) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'ball.property = value' or 'ball.property > value'".to_string(),
            actual: check.clone(),
        })?;

        match observe(path, sim) {
            Some(Observed::Number(actual)) => {
                check_float_comparison(path, actual, operator, expected_value)?
            }
            Some(Observed::Flag(actual)) => {
                let expected = expected_value == "true";
                let pass = match operator {
                    "=" => actual == expected,
                    "!=" => actual != expected,
                    _ => false,
                };
                if !pass {
                    return Err(AssertionError {
                        message: format!("Check failed: {}", check),
                        expected: format!("{} {} {}", path, operator, expected_value),
                        actual: actual.to_string(),
                    });
                }
            }
            None => {
                return Err(AssertionError {
                    message: format!("Unknown check path: {}", path),
                    expected: "ball.x, ball.y, ball.vx, ball.vy, ball.right, ball.bottom, drag.active, drag.ticks, tick or finished".to_string(),
                    actual: path.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f64, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f64 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < FLOAT_EPSILON,
        "!=" => (actual - value).abs() >= FLOAT_EPSILON,
        "~" => (actual - value).abs() < APPROX_EPSILON,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.3})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.3}", actual),
        });
    }

    Ok(())
}
