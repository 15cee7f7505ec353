//! Documentation-gap detector.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::{has_doc_block_above, read_lines, EXPORT_REGEX};
use crate::domain::errors::DomainResult;
use crate::domain::models::quest::sanitize_path;
use crate::domain::models::{QuestDefinition, ScannerKind, VerificationConfig};
use crate::domain::ports::Scanner;
use crate::infrastructure::file_walker::walk_files;

const EXTENSIONS: &[&str] = &[".ts", ".js"];

const DIFFICULTY: u8 = 1;
const XP: u32 = 10;
const HINT: &str = "Add JSDoc documentation with @param and @returns tags";

fn title(name: &str, index: usize) -> String {
    match index % 4 {
        0 => format!("The Undocumented {name}"),
        1 => format!("Scrolls of {name}"),
        2 => format!("Lost Documentation of {name}"),
        _ => format!("Chronicle the {name}"),
    }
}

/// Finds exported symbols without a documentation block.
pub struct MissingDocsScanner {
    excluded_dirs: Vec<String>,
    window: VerificationConfig,
}

impl MissingDocsScanner {
    pub fn new(excluded_dirs: Vec<String>, window: VerificationConfig) -> Self {
        Self {
            excluded_dirs,
            window,
        }
    }
}

#[async_trait]
impl Scanner for MissingDocsScanner {
    fn kind(&self) -> ScannerKind {
        ScannerKind::MissingDocs
    }

    async fn scan(&self, root: &Path) -> DomainResult<Vec<QuestDefinition>> {
        let files = walk_files(root, EXTENSIONS, &self.excluded_dirs).await?;
        let mut results = Vec::new();

        for file_path in files {
            let Some(lines) = read_lines(root, &file_path).await else {
                continue;
            };

            for (index, line) in lines.iter().enumerate() {
                let Some(caps) = EXPORT_REGEX.captures(line) else {
                    continue;
                };
                if has_doc_block_above(&lines, index) {
                    continue;
                }

                let name = &caps[1];
                let line_number = u32::try_from(index + 1).unwrap_or(u32::MAX);
                results.push(QuestDefinition {
                    id: format!("missing-docs-{}-{}", sanitize_path(&file_path), name),
                    title: title(name, results.len()),
                    description: format!("Add JSDoc documentation to `{name}` in {file_path}"),
                    file_path: file_path.clone(),
                    line: Some(line_number),
                    scanner: ScannerKind::MissingDocs,
                    difficulty: DIFFICULTY,
                    xp: XP,
                    hint: HINT.to_string(),
                });
            }
        }

        debug!(count = results.len(), "missing-docs scan finished");
        Ok(results)
    }

    async fn verify(&self, quest: &QuestDefinition, root: &Path) -> bool {
        if quest.line.is_none() {
            return false;
        }
        let Some(lines) = read_lines(root, &quest.file_path).await else {
            return false;
        };

        let resolved = self
            .window
            .window(quest.line, lines.len())
            .any(|i| EXPORT_REGEX.is_match(&lines[i]) && has_doc_block_above(&lines, i));

        debug!(quest_id = %quest.id, resolved, "missing-docs verification");
        resolved
    }
}
