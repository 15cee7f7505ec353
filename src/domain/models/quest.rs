//! Quest domain model.
//!
//! A quest definition is one detected (or synthesized) improvement
//! opportunity. Active and completed quests are the player's records of
//! quests they have accepted or finished.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag identifying which detector produced a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScannerKind {
    /// Exported symbol without a documentation block
    #[serde(rename = "missing-docs")]
    MissingDocs,
    /// TODO/FIXME/HACK/XXX comment
    #[serde(rename = "todo-hunter")]
    TodoHunter,
    /// Source file without a test file
    #[serde(rename = "missing-tests")]
    MissingTests,
    /// Synthesized quest covering every other quest of one file
    #[serde(rename = "boss")]
    Boss,
    /// Tag not known to this build (read from an older or foreign document)
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl ScannerKind {
    /// Detectors that scan the tree, in the order they run.
    pub const DETECTORS: [ScannerKind; 3] = [Self::MissingDocs, Self::TodoHunter, Self::MissingTests];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingDocs => "missing-docs",
            Self::TodoHunter => "todo-hunter",
            Self::MissingTests => "missing-tests",
            Self::Boss => "boss",
            Self::Unknown => "unknown",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "missing-docs" => Some(Self::MissingDocs),
            "todo-hunter" => Some(Self::TodoHunter),
            "missing-tests" => Some(Self::MissingTests),
            "boss" => Some(Self::Boss),
            _ => None,
        }
    }

    /// Emoji shown next to quests of this kind on the quest board.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::MissingDocs => "📜",
            Self::TodoHunter => "🔍",
            Self::MissingTests => "🐉",
            Self::Boss => "👹",
            Self::Unknown => "❓",
        }
    }

    pub fn is_detector(&self) -> bool {
        Self::DETECTORS.contains(self)
    }
}

impl fmt::Display for ScannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue found by a detector or synthesized from several of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDefinition {
    /// Stable identity, reproduced by re-scanning unchanged code
    pub id: String,
    pub title: String,
    pub description: String,
    /// Path relative to the scanned root, `/`-separated
    pub file_path: String,
    /// 1-based line the issue was found on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub scanner: ScannerKind,
    /// 1 (trivial) to 4 (boss)
    pub difficulty: u8,
    pub xp: u32,
    pub hint: String,
}

impl QuestDefinition {
    /// Star rating for the quest's difficulty.
    pub fn stars(&self) -> &'static str {
        match self.difficulty {
            1 => "★☆☆",
            2 => "★★☆",
            3 => "★★★",
            4 => "★★★★",
            _ => "???",
        }
    }

    /// `path` or `path, line N` for display.
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}, line {}", self.file_path, line),
            None => self.file_path.clone(),
        }
    }
}

/// A quest the player has accepted but not yet completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveQuest {
    pub id: String,
    /// 1-based position in the scan the quest was accepted from
    pub quest_number: u32,
    /// Frozen copy of the definition at acceptance time
    pub scan_result: QuestDefinition,
    pub accepted_at: DateTime<Utc>,
}

/// Append-only record of a finished quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedQuest {
    pub id: String,
    pub scanner: ScannerKind,
    pub difficulty: u8,
    pub xp: u32,
    pub completed_at: DateTime<Utc>,
}

/// Replace path separators and dots so a relative path can be embedded in a quest id.
pub fn sanitize_path(file_path: &str) -> String {
    file_path
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '.') { '-' } else { c })
        .collect()
}

/// File name with its final extension stripped (`src/auth.ts` -> `auth`).
pub fn file_stem(file_path: &str) -> String {
    Path::new(file_path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string())
}

/// File name component of a relative path.
pub fn file_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string())
}
