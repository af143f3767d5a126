//! Scenario test runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios              # Run all scenarios
//!   cargo run --bin test-scenarios -- bounce/   # Run category
//!   cargo run --bin test-scenarios -- drag/throw  # Run single scenario
//!   cargo run --bin test-scenarios -- --verbose # Show details on failure
//!   cargo run --bin test-scenarios -- --list    # List without running

use std::env;
use std::path::Path;

use ballthrow::testing::{SCENARIOS_DIR, TestResult, discover_scenarios, parse_test_file, run_test};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut verbose = false;
    let mut list_only = false;
    let mut filter: Option<String> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            "--list" | "-l" => list_only = true,
            other if !other.starts_with('-') => filter = Some(other.to_string()),
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(2);
            }
        }
    }

    println!("Scenario Tests");
    println!("==============\n");

    let scenarios_path = Path::new(SCENARIOS_DIR);
    if !scenarios_path.exists() {
        println!("No scenarios directory found at {}", SCENARIOS_DIR);
        std::process::exit(1);
    }

    let tests = discover_scenarios(scenarios_path, filter.as_deref());
    if tests.is_empty() {
        println!("No scenario files found.");
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        std::process::exit(1);
    }

    if list_only {
        for test_path in &tests {
            let rel_path = test_path.strip_prefix(scenarios_path).unwrap_or(test_path);
            println!("  {}", rel_path.display());
        }
        println!("\n{} scenarios", tests.len());
        return;
    }

    let mut passed = 0;
    let mut failed = 0;
    let mut errors = 0;
    let mut current_category = String::new();

    for test_path in &tests {
        let rel_path = test_path.strip_prefix(scenarios_path).unwrap_or(test_path);

        if let Some(parent) = rel_path.parent() {
            let category = parent.to_string_lossy().to_string();
            if category != current_category && !category.is_empty() {
                if !current_category.is_empty() {
                    println!();
                }
                println!("{}/", category);
                current_category = category;
            }
        }

        let test_name = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let result = match parse_test_file(test_path) {
            Ok(def) => {
                if verbose && let Some(description) = &def.description {
                    println!("  # {}", description);
                }
                run_test(&def)
            }
            Err(message) => TestResult::Error { message },
        };

        match &result {
            TestResult::Pass { .. } => passed += 1,
            TestResult::Fail { .. } => failed += 1,
            TestResult::Error { .. } => errors += 1,
        }

        print_result(&test_name, &result, verbose);
    }

    println!("\n==============");
    println!("Results: {} passed, {} failed, {} errors", passed, failed, errors);

    if failed > 0 || errors > 0 {
        std::process::exit(1);
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(40 - name.len().min(39));

    match result {
        TestResult::Pass { frames } => {
            println!("  {} {} PASS ({} frames)", name, dots, frames);
        }
        TestResult::Fail { frame, error } => {
            match frame {
                Some(frame) => println!("  {} {} FAIL (frame {})", name, dots, frame),
                None => println!("  {} {} FAIL (event sequence)", name, dots),
            }
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
