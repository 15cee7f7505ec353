use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for git-quest
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// State document file name, relative to the project root
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Line-drift tolerance used when re-inspecting accepted quests
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Detector configuration
    #[serde(default)]
    pub scan: ScanConfig,
}

fn default_state_file() -> String {
    ".git-quest.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            logging: LoggingConfig::default(),
            verification: VerificationConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Stderr output format
    #[serde(default)]
    pub format: LogFormat,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file logs
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: None,
            rotation: RotationPolicy::default(),
        }
    }
}

/// Search window around a quest's recorded line.
///
/// Edits above an issue shift its line number, so verifiers look at
/// `[line-1-window_before, line-1+window_after)` rather than one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VerificationConfig {
    #[serde(default = "default_window_before")]
    pub window_before: usize,

    #[serde(default = "default_window_after")]
    pub window_after: usize,
}

const fn default_window_before() -> usize {
    10
}

const fn default_window_after() -> usize {
    15
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            window_before: default_window_before(),
            window_after: default_window_after(),
        }
    }
}

impl VerificationConfig {
    /// Zero-based line range to search in a file of `line_count` lines.
    ///
    /// A missing line is treated as line 0, so the window starts at the top
    /// of the file.
    pub fn window(&self, line: Option<u32>, line_count: usize) -> Range<usize> {
        let target = line.map_or(-1, |l| i64::from(l) - 1);
        let before = i64::try_from(self.window_before).unwrap_or(i64::MAX);
        let after = i64::try_from(self.window_after).unwrap_or(i64::MAX);
        let count = i64::try_from(line_count).unwrap_or(i64::MAX);

        let start = target.saturating_sub(before).max(0);
        let end = target.saturating_add(after).clamp(0, count);
        let start = usize::try_from(start.min(end)).unwrap_or(0);
        let end = usize::try_from(end).unwrap_or(0);
        start..end
    }
}

/// Detector configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScanConfig {
    /// Directory names skipped in addition to the built-in list
    #[serde(default)]
    pub excluded_dirs: Vec<String>,
}
