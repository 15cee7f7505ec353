//! Game state aggregate.
//!
//! `GameState` is the single unit of persistence: player progress, active
//! and completed quests, earned badges, and the most recent scan snapshot.
//! Every state transition goes through the methods here; the repository
//! only loads and saves whole documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::badge::{check_new_badges, Badge};
use super::progression::{level_for, Level};
use super::quest::{ActiveQuest, CompletedQuest, QuestDefinition, ScannerKind};
use crate::domain::errors::QuestError;

/// Current document format version.
pub const STATE_VERSION: u32 = 1;

/// Player progress counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub xp: u32,
    pub quests_completed: u32,
    pub first_played: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
}

impl Default for Player {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            xp: 0,
            quests_completed: 0,
            first_played: now,
            last_played: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Bumped on every save; used to detect concurrent writers
    #[serde(default)]
    pub revision: u64,

    #[serde(default)]
    pub player: Player,

    #[serde(default)]
    pub completed_quests: Vec<CompletedQuest>,

    #[serde(default)]
    pub active_quests: Vec<ActiveQuest>,

    /// Earned badge ids, in unlock order
    #[serde(default)]
    pub badges: Vec<String>,

    #[serde(default)]
    pub last_scan_results: Vec<QuestDefinition>,

    #[serde(default)]
    pub last_scan_all_completed: bool,
}

const fn default_version() -> u32 {
    STATE_VERSION
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            revision: 0,
            player: Player::default(),
            completed_quests: vec![],
            active_quests: vec![],
            badges: vec![],
            last_scan_results: vec![],
            last_scan_all_completed: false,
        }
    }
}

/// What a successful completion changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    pub xp_gained: u32,
    pub total_xp: u32,
    pub leveled_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_level: Option<&'static Level>,
    pub new_badges: Vec<&'static Badge>,
}

impl GameState {
    pub fn xp(&self) -> u32 {
        self.player.xp
    }

    pub fn has_badge(&self, id: &str) -> bool {
        self.badges.iter().any(|b| b == id)
    }

    pub fn is_completed(&self, quest_id: &str) -> bool {
        self.completed_quests.iter().any(|q| q.id == quest_id)
    }

    pub fn is_active(&self, quest_id: &str) -> bool {
        self.active_quests.iter().any(|q| q.id == quest_id)
    }

    pub fn completed_by_scanner(&self, scanner: ScannerKind) -> usize {
        self.completed_quests
            .iter()
            .filter(|q| q.scanner == scanner)
            .count()
    }

    /// Active quest accepted at `quest_number`, if any.
    pub fn active_quest(&self, quest_number: u32) -> Option<&ActiveQuest> {
        self.active_quests
            .iter()
            .find(|q| q.quest_number == quest_number)
    }

    /// Quests in the last scan that are not yet completed.
    pub fn remaining_in_last_scan(&self) -> usize {
        self.last_scan_results
            .iter()
            .filter(|q| !self.is_completed(&q.id))
            .count()
    }

    /// Replace the scan snapshot. Active and completed quests are untouched.
    pub fn record_scan(&mut self, definitions: Vec<QuestDefinition>) {
        self.last_scan_results = definitions;
    }

    /// Accept a quest. Returns `false` if a quest with the same id is already active.
    pub fn accept(&mut self, quest_number: u32, definition: QuestDefinition) -> bool {
        if self.is_active(&definition.id) {
            return false;
        }

        self.active_quests.push(ActiveQuest {
            id: definition.id.clone(),
            quest_number,
            scan_result: definition,
            accepted_at: Utc::now(),
        });
        true
    }

    /// Record a quest as completed, award its xp, and unlock any new badges.
    ///
    /// A quest id is completed at most once; a second call is rejected
    /// without touching state.
    pub fn complete(&mut self, quest: &QuestDefinition) -> Result<CompletionOutcome, QuestError> {
        if self.is_completed(&quest.id) {
            return Err(QuestError::AlreadyCompleted(quest.id.clone()));
        }

        let previous_level = level_for(self.player.xp);
        self.player.xp = self.player.xp.saturating_add(quest.xp);
        let current_level = level_for(self.player.xp);
        let leveled_up = previous_level.name != current_level.name;

        self.completed_quests.push(CompletedQuest {
            id: quest.id.clone(),
            scanner: quest.scanner,
            difficulty: quest.difficulty,
            xp: quest.xp,
            completed_at: Utc::now(),
        });
        self.player.quests_completed += 1;
        self.active_quests.retain(|aq| aq.id != quest.id);

        self.last_scan_all_completed = self.all_completed_in_last_scan();

        let new_badges = check_new_badges(self);
        self.badges
            .extend(new_badges.iter().map(|badge| badge.id.to_string()));

        Ok(CompletionOutcome {
            xp_gained: quest.xp,
            total_xp: self.player.xp,
            leveled_up,
            new_level: leveled_up.then_some(current_level),
            new_badges,
        })
    }

    fn all_completed_in_last_scan(&self) -> bool {
        !self.last_scan_results.is_empty()
            && self
                .last_scan_results
                .iter()
                .all(|q| self.is_completed(&q.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest(id: &str, scanner: ScannerKind, xp: u32) -> QuestDefinition {
        QuestDefinition {
            id: id.to_string(),
            title: format!("Quest {id}"),
            description: "desc".to_string(),
            file_path: "src/auth.ts".to_string(),
            line: Some(3),
            scanner,
            difficulty: 1,
            xp,
            hint: "hint".to_string(),
        }
    }

    #[test]
    fn test_accept_is_idempotent() {
        let mut state = GameState::default();
        let q = quest("missing-docs-src-auth-ts-login", ScannerKind::MissingDocs, 10);

        assert!(state.accept(1, q.clone()));
        assert!(!state.accept(1, q.clone()));
        assert!(!state.accept(2, q));
        assert_eq!(state.active_quests.len(), 1);
        assert_eq!(state.active_quest(1).map(|a| a.quest_number), Some(1));
        assert!(state.active_quest(2).is_none());
    }

    #[test]
    fn test_complete_awards_xp_and_removes_active() {
        let mut state = GameState::default();
        let q = quest("todo-hunter-src-auth-ts-3", ScannerKind::TodoHunter, 15);
        state.record_scan(vec![q.clone()]);
        state.accept(1, q.clone());

        let outcome = state.complete(&q).unwrap();

        assert_eq!(outcome.xp_gained, 15);
        assert_eq!(outcome.total_xp, 15);
        assert!(!outcome.leveled_up);
        assert!(outcome.new_level.is_none());
        assert_eq!(state.player.quests_completed, 1);
        assert!(state.active_quests.is_empty());
        assert!(state.is_completed(&q.id));
        assert!(state.last_scan_all_completed);
        assert_eq!(state.badges, vec!["first-blood", "perfectionist"]);
    }

    #[test]
    fn test_complete_is_exactly_once() {
        let mut state = GameState::default();
        let q = quest("missing-docs-src-auth-ts-login", ScannerKind::MissingDocs, 10);
        state.complete(&q).unwrap();

        let err = state.complete(&q).unwrap_err();
        assert_eq!(err, QuestError::AlreadyCompleted(q.id.clone()));
        assert_eq!(state.xp(), 10);
        assert_eq!(state.completed_quests.len(), 1);
        assert_eq!(state.player.quests_completed, 1);
    }

    #[test]
    fn test_complete_reports_level_up() {
        let mut state = GameState::default();
        state.player.xp = 20;

        let outcome = state
            .complete(&quest("missing-docs-a", ScannerKind::MissingDocs, 10))
            .unwrap();

        assert!(outcome.leveled_up);
        assert_eq!(outcome.new_level.map(|l| l.name), Some("Apprentice"));
    }

    #[test]
    fn test_all_completed_requires_non_empty_scan() {
        let mut state = GameState::default();
        state
            .complete(&quest("missing-docs-a", ScannerKind::MissingDocs, 10))
            .unwrap();
        assert!(!state.last_scan_all_completed);
        assert!(!state.has_badge("perfectionist"));
    }

    #[test]
    fn test_record_scan_keeps_history() {
        let mut state = GameState::default();
        let q = quest("missing-docs-a", ScannerKind::MissingDocs, 10);
        state.accept(1, q.clone());
        state.complete(&quest("missing-docs-b", ScannerKind::MissingDocs, 10)).unwrap();

        state.record_scan(vec![q]);
        assert_eq!(state.active_quests.len(), 1);
        assert_eq!(state.completed_quests.len(), 1);
        assert_eq!(state.remaining_in_last_scan(), 1);
    }

    #[test]
    fn test_reads_document_without_revision() {
        let json = r#"{
            "version": 1,
            "player": {
                "xp": 40,
                "questsCompleted": 2,
                "firstPlayed": "2025-03-01T10:00:00.000Z",
                "lastPlayed": "2025-03-02T10:00:00.000Z"
            },
            "completedQuests": [],
            "activeQuests": [],
            "badges": ["first-blood"]
        }"#;

        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.revision, 0);
        assert_eq!(state.xp(), 40);
        assert!(state.last_scan_results.is_empty());
        assert!(state.has_badge("first-blood"));
    }
}
