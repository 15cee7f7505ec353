//! Decides whether an accepted quest has been resolved.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::adapters::scanners::ScannerRegistry;
use crate::domain::errors::QuestError;
use crate::domain::models::{GameState, QuestDefinition, ScannerKind};

/// Dispatches verification by quest tag.
///
/// Detector quests are re-inspected by their detector. A boss is resolved
/// once every other quest for its file in the persisted scan snapshot is
/// completed. Never mutates `state`.
pub struct VerificationEngine {
    scanners: Arc<ScannerRegistry>,
}

impl VerificationEngine {
    pub fn new(scanners: Arc<ScannerRegistry>) -> Self {
        Self { scanners }
    }

    pub async fn verify(
        &self,
        quest: &QuestDefinition,
        root: &Path,
        state: &GameState,
    ) -> Result<bool, QuestError> {
        let resolved = match quest.scanner {
            ScannerKind::Boss => Self::boss_resolved(quest, state),
            kind => {
                let scanner = self
                    .scanners
                    .get(kind)
                    .ok_or_else(|| QuestError::UnknownScanner(kind.to_string()))?;
                scanner.verify(quest, root).await
            }
        };

        debug!(quest_id = %quest.id, scanner = %quest.scanner, resolved, "verified quest");
        Ok(resolved)
    }

    fn boss_resolved(quest: &QuestDefinition, state: &GameState) -> bool {
        state
            .last_scan_results
            .iter()
            .filter(|q| q.file_path == quest.file_path && q.scanner != ScannerKind::Boss)
            .all(|q| state.is_completed(&q.id))
    }
}
