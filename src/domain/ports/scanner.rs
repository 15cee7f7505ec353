use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{QuestDefinition, ScannerKind};

/// A detector paired with its verifier.
///
/// `scan` emits quests in file traversal order. `verify` re-inspects the
/// code for one previously emitted quest; it never mutates anything.
/// Files that cannot be read are skipped by `scan` and count as
/// unresolved in `verify`.
#[async_trait]
pub trait Scanner: Send + Sync {
    fn kind(&self) -> ScannerKind;

    async fn scan(&self, root: &Path) -> DomainResult<Vec<QuestDefinition>>;

    async fn verify(&self, quest: &QuestDefinition, root: &Path) -> bool;
}
