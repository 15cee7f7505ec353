//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `content` to `relative` under `root`, creating parent directories.
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write fixture file");
}

/// A project with one file flagged by two detectors.
///
/// `src/auth.ts` has an undocumented export and a TODO; its test file
/// exists, so a full scan yields two base quests plus one boss.
#[allow(dead_code)]
pub fn auth_project() -> TempDir {
    let dir = temp_dir();
    write_file(
        dir.path(),
        "src/auth.ts",
        "export function login() {}\n// TODO: add rate limiting\n",
    );
    write_file(
        dir.path(),
        "src/auth.test.ts",
        "test('login', () => {});\n",
    );
    dir
}

