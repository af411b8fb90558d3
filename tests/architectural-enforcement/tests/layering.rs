//! Integration Test: Core Layering
//!
//! **Policy**: `conductor/core` is UI-agnostic. It must not depend on, or
//! mention in code, any terminal UI crate. Surfaces depend on the core,
//! never the other way round.

use std::fs;

use architectural_enforcement::{production_lines, rust_sources, workspace_root};

const UI_CRATES: &[&str] = &["ratatui", "crossterm"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("conductor/core/Cargo.toml"))
        .expect("core manifest should exist");

    for krate in UI_CRATES {
        assert!(
            !manifest.lines().any(|l| l.trim_start().starts_with(krate)),
            "conductor/core/Cargo.toml depends on {krate}"
        );
    }
}

#[test]
fn test_core_sources_do_not_use_ui_crates() {
    let mut violations = Vec::new();

    for file in rust_sources("conductor/core/src") {
        for (line_number, code) in production_lines(&file.content) {
            for krate in UI_CRATES {
                if code.contains(&format!("{krate}::")) || code.contains(&format!("use {krate}")) {
                    violations.push(format!(
                        "{}:{} - {}",
                        file.path.display(),
                        line_number,
                        code.trim()
                    ));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI crates used in the core:\n  {}",
        violations.join("\n  ")
    );
}

#[test]
fn test_core_sources_exist() {
    assert!(
        !rust_sources("conductor/core/src").is_empty(),
        "no sources found; the workspace layout changed"
    );
}
