//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT block the runtime with
//! `std::thread::sleep`. Async sleeps are allowed only where waiting is the
//! behavior: the simulated typing delay in the conductor and the frame tick
//! in the TUI event loop.

use architectural_enforcement::{production_lines, rust_sources};

/// Files allowed to call `tokio::time::sleep` outside tests
const ASYNC_SLEEP_ALLOWED: &[&str] = &["conductor/core/src/conductor.rs", "tui/src/app.rs"];

const PRODUCTION_DIRS: &[&str] = &["conductor/core/src", "tui/src"];

fn find_violations(matches: impl Fn(&str, &str) -> bool) -> Vec<String> {
    let mut violations = Vec::new();
    for dir in PRODUCTION_DIRS {
        for file in rust_sources(dir) {
            let path = file.path.to_string_lossy().replace('\\', "/");
            for (line_number, code) in production_lines(&file.content) {
                if matches(&path, code) {
                    violations.push(format!("{path}:{line_number} - {}", code.trim()));
                }
            }
        }
    }
    violations
}

#[test]
fn test_no_thread_sleep_in_production_code() {
    let violations = find_violations(|_, code| {
        code.contains("thread::sleep(") || code.contains("std::thread::sleep")
    });

    assert!(
        violations.is_empty(),
        "Blocking sleeps found in production code:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn test_async_sleep_only_where_delay_is_the_feature() {
    let violations = find_violations(|path, code| {
        code.contains("time::sleep(") && !ASYNC_SLEEP_ALLOWED.iter().any(|a| path.ends_with(a))
    });

    assert!(
        violations.is_empty(),
        "Unexpected async sleeps in production code:\n  {}",
        violations.join("\n  ")
    );
}
