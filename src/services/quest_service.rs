//! Quest lifecycle service.
//!
//! Every operation loads the state document, acts on it, and saves it
//! only if something changed. Nothing is cached between operations.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::adapters::scanners::{ScannerFilter, ScannerRegistry};
use crate::adapters::state::JsonStateRepository;
use crate::domain::errors::{DomainResult, QuestError};
use crate::domain::models::{
    progress_for, ActiveQuest, Badge, CompletedQuest, CompletionOutcome, Config, Player, Progress,
    QuestDefinition, ScannerKind, BADGES,
};
use crate::domain::ports::GameStateRepository;
use crate::services::boss_quests::generate_boss_quests;
use crate::services::verification_engine::VerificationEngine;

/// Number of completions listed in player stats
const RECENT_COMPLETIONS: usize = 10;

/// Result of a scan: the new quest board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub quests: Vec<QuestDefinition>,
    pub xp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "quest", rename_all = "snake_case")]
pub enum AcceptOutcome {
    Accepted(QuestDefinition),
    /// The quest at that number is already in completed history
    AlreadyCompleted(QuestDefinition),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyOutcome {
    Completed {
        quest: QuestDefinition,
        outcome: CompletionOutcome,
        /// Quests in the last scan that are still not completed
        remaining: usize,
    },
    NotYet {
        quest: QuestDefinition,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub badge: &'static Badge,
    pub earned: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player: Player,
    pub progress: Progress,
    /// Full catalog in catalog order
    pub badges: Vec<BadgeStatus>,
    /// Most recent completions, oldest first
    pub recent_completions: Vec<CompletedQuest>,
}

/// Which sections of the quest log to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    Active,
    Completed,
    Available,
}

impl LogFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Available => "available",
        }
    }

    fn includes(self, section: Self) -> bool {
        self == Self::All || self == section
    }
}

impl FromStr for LogFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "available" => Ok(Self::Available),
            _ => Err(format!(
                "Invalid status: {s}. Must be one of: all, completed, active, available"
            )),
        }
    }
}

impl fmt::Display for LogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestLog {
    pub active: Vec<ActiveQuest>,
    pub completed: Vec<CompletedQuest>,
    /// Quests in the last scan that are neither active nor completed
    pub available: Vec<QuestDefinition>,
}

impl QuestLog {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty() && self.available.is_empty()
    }
}

/// Runs scan, accept, verify, stats, and log against one project root.
pub struct QuestService<R: GameStateRepository> {
    root: PathBuf,
    repository: Arc<R>,
    scanners: Arc<ScannerRegistry>,
    engine: VerificationEngine,
}

impl QuestService<JsonStateRepository> {
    /// Service storing state in `<root>/<config.state_file>`.
    pub fn for_root(root: impl Into<PathBuf>, config: &Config) -> Self {
        let root = root.into();
        let repository = JsonStateRepository::new(&root, &config.state_file);
        Self::new(root, Arc::new(repository), config)
    }
}

impl<R: GameStateRepository> QuestService<R> {
    pub fn new(root: impl Into<PathBuf>, repository: Arc<R>, config: &Config) -> Self {
        let scanners = Arc::new(ScannerRegistry::new(config));
        Self {
            root: root.into(),
            repository,
            engine: VerificationEngine::new(Arc::clone(&scanners)),
            scanners,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the selected detectors and replace the quest board.
    ///
    /// Quests are ordered by difficulty (stable, so traversal order holds
    /// within a difficulty), then boss quests are appended.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn scan(&self, filter: ScannerFilter) -> DomainResult<ScanReport> {
        let mut quests = Vec::new();
        for scanner in self.scanners.select(filter) {
            let found = scanner.scan(&self.root).await?;
            info!(scanner = %scanner.kind(), count = found.len(), "detector finished");
            quests.extend(found);
        }

        quests.sort_by_key(|q| q.difficulty);
        let bosses = generate_boss_quests(&quests);
        quests.extend(bosses);

        let mut state = self.repository.load().await?;
        state.record_scan(quests.clone());
        self.repository.save(&mut state).await?;

        info!(quests = quests.len(), "quest board updated");
        Ok(ScanReport {
            quests,
            xp: state.xp(),
        })
    }

    /// Accept quest `quest_number` (1-based) from the last scan.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn accept(&self, quest_number: u32) -> DomainResult<AcceptOutcome> {
        let mut state = self.repository.load().await?;
        let snapshot = &state.last_scan_results;

        if snapshot.is_empty() {
            return Err(QuestError::NoScan.into());
        }

        let index = usize::try_from(quest_number).unwrap_or(usize::MAX);
        let Some(quest) = index
            .checked_sub(1)
            .and_then(|i| snapshot.get(i))
            .cloned()
        else {
            return Err(QuestError::InvalidQuestNumber {
                max: snapshot.len(),
            }
            .into());
        };

        if state.is_completed(&quest.id) {
            return Ok(AcceptOutcome::AlreadyCompleted(quest));
        }

        if state.accept(quest_number, quest.clone()) {
            self.repository.save(&mut state).await?;
            info!(quest_id = %quest.id, quest_number, "quest accepted");
        }

        Ok(AcceptOutcome::Accepted(quest))
    }

    /// Check whether active quest `quest_number` is resolved, completing it if so.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn verify(&self, quest_number: u32) -> DomainResult<VerifyOutcome> {
        let mut state = self.repository.load().await?;

        let quest = state
            .active_quest(quest_number)
            .map(|aq| aq.scan_result.clone())
            .ok_or(QuestError::NotAccepted(quest_number))?;

        if quest.scanner == ScannerKind::Unknown {
            warn!(quest_id = %quest.id, "active quest has an unknown scanner tag");
            return Err(QuestError::UnknownScanner(quest.scanner.to_string()).into());
        }
        if state.is_completed(&quest.id) {
            return Err(QuestError::AlreadyCompleted(quest.id).into());
        }

        if !self.engine.verify(&quest, &self.root, &state).await? {
            info!(quest_id = %quest.id, "quest not yet resolved");
            return Ok(VerifyOutcome::NotYet { quest });
        }

        let outcome = state.complete(&quest)?;
        self.repository.save(&mut state).await?;

        info!(
            quest_id = %quest.id,
            xp_gained = outcome.xp_gained,
            total_xp = outcome.total_xp,
            leveled_up = outcome.leveled_up,
            new_badges = outcome.new_badges.len(),
            "quest completed"
        );

        Ok(VerifyOutcome::Completed {
            quest,
            outcome,
            remaining: state.remaining_in_last_scan(),
        })
    }

    pub async fn stats(&self) -> DomainResult<PlayerStats> {
        let state = self.repository.load().await?;

        let badges = BADGES
            .iter()
            .map(|badge| BadgeStatus {
                badge,
                earned: state.has_badge(badge.id),
            })
            .collect();

        let skip = state.completed_quests.len().saturating_sub(RECENT_COMPLETIONS);
        let recent_completions = state.completed_quests[skip..].to_vec();

        Ok(PlayerStats {
            progress: progress_for(state.xp()),
            player: state.player,
            badges,
            recent_completions,
        })
    }

    pub async fn log(&self, filter: LogFilter) -> DomainResult<QuestLog> {
        let state = self.repository.load().await?;
        let mut log = QuestLog::default();

        if filter.includes(LogFilter::Available) {
            log.available = state
                .last_scan_results
                .iter()
                .filter(|q| !state.is_completed(&q.id) && !state.is_active(&q.id))
                .cloned()
                .collect();
        }
        if filter.includes(LogFilter::Active) {
            log.active = state.active_quests;
        }
        if filter.includes(LogFilter::Completed) {
            log.completed = state.completed_quests;
        }

        Ok(log)
    }
}
