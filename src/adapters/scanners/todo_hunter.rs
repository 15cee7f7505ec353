//! Marker-comment detector (`TODO`, `FIXME`, `HACK`, `XXX`).

use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use super::read_lines;
use crate::domain::errors::DomainResult;
use crate::domain::models::quest::sanitize_path;
use crate::domain::models::{QuestDefinition, ScannerKind, VerificationConfig};
use crate::domain::ports::Scanner;
use crate::infrastructure::file_walker::walk_files;

const EXTENSIONS: &[&str] = &[".ts", ".js", ".tsx", ".jsx"];

const DIFFICULTY: u8 = 2;
const XP: u32 = 15;
const HINT: &str =
    "Implement the change described in the comment, then remove the TODO/FIXME comment";

/// Title length limit for the captured remark
const MAX_TITLE_REMARK: usize = 50;

/// Characters of the original remark used to recognize it during verification
const REMARK_PREFIX: usize = 20;

static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)//\s*(TODO|FIXME|HACK|XXX)\s*:?\s*(.+)").expect("marker pattern is valid")
});

static DESCRIPTION_REMARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:TODO|FIXME|HACK|XXX):\s*(.+?)\s*\(").expect("remark pattern is valid")
});

fn title(marker: &str, remark: &str) -> String {
    let prefix = match marker {
        "FIXME" => "The Broken Artifact",
        "HACK" => "The Cursed Workaround",
        "XXX" => "The Dark Mark",
        _ => "The Forgotten Task",
    };
    format!("{prefix}: {}", truncate(remark, MAX_TITLE_REMARK))
}

fn truncate(s: &str, max: usize) -> String {
    let trimmed = s.trim();
    if trimmed.chars().count() > max {
        format!("{}…", trimmed.chars().take(max).collect::<String>())
    } else {
        trimmed.to_string()
    }
}

/// Finds marker comments left in the code.
pub struct TodoHunterScanner {
    excluded_dirs: Vec<String>,
    window: VerificationConfig,
}

impl TodoHunterScanner {
    pub fn new(excluded_dirs: Vec<String>, window: VerificationConfig) -> Self {
        Self {
            excluded_dirs,
            window,
        }
    }
}

#[async_trait]
impl Scanner for TodoHunterScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::TodoHunter
    }

    async fn scan(&self, root: &Path) -> DomainResult<Vec<QuestDefinition>> {
        let files = walk_files(root, EXTENSIONS, &self.excluded_dirs).await?;
        let mut results = Vec::new();

        for file_path in files {
            let Some(lines) = read_lines(root, &file_path).await else {
                continue;
            };

            for (index, line) in lines.iter().enumerate() {
                // The remark runs to end of line, so there is at most one match
                let Some(caps) = MARKER_REGEX.captures(line) else {
                    continue;
                };

                let marker = caps[1].to_uppercase();
                let remark = caps[2].trim();
                let line_number = index + 1;
                results.push(QuestDefinition {
                    id: format!("todo-hunter-{}-{line_number}", sanitize_path(&file_path)),
                    title: title(&marker, remark),
                    description: format!("{marker}: {remark} ({file_path}:{line_number})"),
                    file_path: file_path.clone(),
                    line: Some(u32::try_from(line_number).unwrap_or(u32::MAX)),
                    scanner: ScannerKind::TodoHunter,
                    difficulty: DIFFICULTY,
                    xp: XP,
                    hint: HINT.to_string(),
                });
            }
        }

        debug!(count = results.len(), "todo-hunter scan finished");
        Ok(results)
    }

    /// Resolved only when no marker comment is left anywhere in the window.
    async fn verify(&self, quest: &QuestDefinition, root: &Path) -> bool {
        let Some(lines) = read_lines(root, &quest.file_path).await else {
            return false;
        };

        let original = DESCRIPTION_REMARK
            .captures(&quest.description)
            .map(|caps| caps[1].trim().chars().take(REMARK_PREFIX).collect::<String>());

        for i in self.window.window(quest.line, lines.len()) {
            if MARKER_REGEX.is_match(&lines[i]) {
                let is_original = original
                    .as_deref()
                    .is_some_and(|prefix| lines[i].contains(prefix));
                debug!(
                    quest_id = %quest.id,
                    line = i + 1,
                    is_original,
                    "marker comment still present"
                );
                return false;
            }
        }

        true
    }
}
