//! Scenario testing system for deterministic ball testing
//!
//! Scenarios are TOML files: a starting ball, scripted pointer input by
//! frame, and expected events and state.

use std::fs;
use std::path::{Path, PathBuf};

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedEvent, check_sequence, check_state};
pub use parser::{
    DragGesture, ExpectedEvent, FrameInput, StateAssertion, TestDefinition, TestExpectations,
    TestSetup, TuningOverrides, parse_test_file,
};
pub use runner::{TestResult, build_simulation, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// All `.toml` scenarios under `base`, sorted, optionally keeping only
/// paths (relative to `base`) that contain `filter`
pub fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut tests = Vec::new();
    discover_recursive(base, base, filter, &mut tests);
    tests.sort();
    tests
}

fn discover_recursive(base: &Path, current: &Path, filter: Option<&str>, tests: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(current) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            discover_recursive(base, &path, filter, tests);
        } else if path.extension().is_some_and(|e| e == "toml") {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            tests.push(path);
        }
    }
}
