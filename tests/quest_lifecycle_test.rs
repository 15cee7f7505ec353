//! End-to-end quest lifecycle against a real working tree and state file.

mod common;

use std::fs;
use std::sync::Arc;

use chrono::Utc;
use common::{auth_project, write_file};
use git_quest::adapters::scanners::ScannerFilter;
use git_quest::adapters::state::{InMemoryStateRepository, JsonStateRepository};
use git_quest::domain::models::{ActiveQuest, GameState, QuestDefinition};
use git_quest::domain::ports::GameStateRepository;
use git_quest::services::{AcceptOutcome, VerifyOutcome};
use git_quest::{Config, DomainError, QuestError, QuestService, ScannerKind};

fn state_path(root: &std::path::Path) -> std::path::PathBuf {
    root.join(".git-quest.json")
}

#[tokio::test]
async fn test_three_quest_scenario() {
    let dir = auth_project();
    let root = dir.path();
    let service = QuestService::for_root(root, &Config::default());

    let report = service.scan(ScannerFilter::All).await.unwrap();
    let ids: Vec<_> = report.quests.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "missing-docs-src-auth-ts-login",
            "todo-hunter-src-auth-ts-2",
            "boss-auth"
        ]
    );

    // Document the export and complete quest #1
    assert!(matches!(
        service.accept(1).await.unwrap(),
        AcceptOutcome::Accepted(_)
    ));
    write_file(
        root,
        "src/auth.ts",
        "/** Logs a user in. */\nexport function login() {}\n// TODO: add rate limiting\n",
    );
    match service.verify(1).await.unwrap() {
        VerifyOutcome::Completed {
            outcome, remaining, ..
        } => {
            assert_eq!(outcome.xp_gained, 10);
            assert_eq!(outcome.total_xp, 10);
            assert_eq!(remaining, 2);
            let badges: Vec<_> = outcome.new_badges.iter().map(|b| b.id).collect();
            assert_eq!(badges, vec!["first-blood"]);
        }
        other => panic!("expected completion, got {other:?}"),
    }

    // The boss is not resolved while the TODO remains
    service.accept(3).await.unwrap();
    assert!(matches!(
        service.verify(3).await.unwrap(),
        VerifyOutcome::NotYet { .. }
    ));

    // Resolve the TODO
    service.accept(2).await.unwrap();
    write_file(
        root,
        "src/auth.ts",
        "/** Logs a user in. */\nexport function login() {}\n",
    );
    match service.verify(2).await.unwrap() {
        VerifyOutcome::Completed { outcome, .. } => {
            assert_eq!(outcome.total_xp, 25);
            assert!(outcome.leveled_up);
            assert_eq!(outcome.new_level.map(|l| l.name), Some("Apprentice"));
        }
        other => panic!("expected completion, got {other:?}"),
    }

    // Now the boss falls
    match service.verify(3).await.unwrap() {
        VerifyOutcome::Completed {
            outcome, remaining, ..
        } => {
            assert_eq!(outcome.xp_gained, 50);
            assert_eq!(outcome.total_xp, 75);
            assert_eq!(outcome.new_level.map(|l| l.name), Some("Journeyman"));
            assert_eq!(remaining, 0);
            let badges: Vec<_> = outcome.new_badges.iter().map(|b| b.id).collect();
            assert_eq!(badges, vec!["boss-slayer", "perfectionist"]);
        }
        other => panic!("expected completion, got {other:?}"),
    }

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.player.xp, 75);
    assert_eq!(stats.player.quests_completed, 3);
    assert_eq!(stats.recent_completions.len(), 3);
    assert_eq!(stats.badges.iter().filter(|b| b.earned).count(), 3);
}

#[tokio::test]
async fn test_accept_is_idempotent() {
    let dir = auth_project();
    let service = QuestService::for_root(dir.path(), &Config::default());
    service.scan(ScannerFilter::All).await.unwrap();

    service.accept(1).await.unwrap();
    let after_first = fs::read_to_string(state_path(dir.path())).unwrap();
    service.accept(1).await.unwrap();
    let after_second = fs::read_to_string(state_path(dir.path())).unwrap();

    assert_eq!(after_first, after_second, "second accept must not write");
    let log = service.log(git_quest::services::LogFilter::Active).await.unwrap();
    assert_eq!(log.active.len(), 1);
}

#[tokio::test]
async fn test_invalid_requests_do_not_mutate() {
    let dir = auth_project();
    let service = QuestService::for_root(dir.path(), &Config::default());

    let err = service.verify(1).await.unwrap_err();
    assert!(matches!(err, DomainError::Quest(QuestError::NotAccepted(1))));
    assert!(!state_path(dir.path()).exists());

    service.scan(ScannerFilter::All).await.unwrap();
    let before = fs::read_to_string(state_path(dir.path())).unwrap();

    for n in [0, 4, 99] {
        let err = service.accept(n).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Quest(QuestError::InvalidQuestNumber { max: 3 })
        ));
    }
    let err = service.verify(2).await.unwrap_err();
    assert!(matches!(err, DomainError::Quest(QuestError::NotAccepted(2))));

    assert_eq!(before, fs::read_to_string(state_path(dir.path())).unwrap());
}

#[tokio::test]
async fn test_completion_is_exactly_once() {
    let dir = auth_project();
    let service = QuestService::for_root(dir.path(), &Config::default());
    service.scan(ScannerFilter::All).await.unwrap();

    service.accept(1).await.unwrap();
    write_file(
        dir.path(),
        "src/auth.ts",
        "/** Logs a user in. */\nexport function login() {}\n// TODO: add rate limiting\n",
    );
    service.verify(1).await.unwrap();

    // Completed quests cannot be accepted or verified again
    assert!(matches!(
        service.accept(1).await.unwrap(),
        AcceptOutcome::AlreadyCompleted(_)
    ));
    let err = service.verify(1).await.unwrap_err();
    assert!(matches!(err, DomainError::Quest(QuestError::NotAccepted(1))));

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.player.xp, 10);
    assert_eq!(stats.player.quests_completed, 1);
}

#[tokio::test]
async fn test_rescan_keeps_history_and_boss_stays_consistent() {
    let dir = auth_project();
    let service = QuestService::for_root(dir.path(), &Config::default());
    service.scan(ScannerFilter::All).await.unwrap();
    service.accept(2).await.unwrap();

    // Rescanning only one detector drops the boss from the board
    let report = service
        .scan(ScannerFilter::Only(ScannerKind::TodoHunter))
        .await
        .unwrap();
    assert_eq!(report.quests.len(), 1);
    assert_eq!(report.quests[0].scanner, ScannerKind::TodoHunter);

    let log = service.log(git_quest::services::LogFilter::All).await.unwrap();
    assert_eq!(log.active.len(), 1, "active quests survive a rescan");
    assert!(log.available.is_empty(), "the accepted quest is not available");
}

fn definition(id: &str, scanner: ScannerKind) -> QuestDefinition {
    QuestDefinition {
        id: id.to_string(),
        title: "t".to_string(),
        description: "d".to_string(),
        file_path: "src/a.ts".to_string(),
        line: Some(1),
        scanner,
        difficulty: 1,
        xp: 10,
        hint: "h".to_string(),
    }
}

#[tokio::test]
async fn test_unknown_scanner_tag_is_rejected() {
    let dir = common::temp_dir();
    let quest = definition("lint-src-a-ts", ScannerKind::Unknown);
    let mut state = GameState::default();
    state.record_scan(vec![quest.clone()]);
    state.active_quests.push(ActiveQuest {
        id: quest.id.clone(),
        quest_number: 1,
        scan_result: quest,
        accepted_at: Utc::now(),
    });

    let repo = Arc::new(InMemoryStateRepository::with_state(state.clone()));
    let service = QuestService::new(dir.path(), Arc::clone(&repo), &Config::default());

    let err = service.verify(1).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Quest(QuestError::UnknownScanner(_))
    ));
    assert_eq!(repo.snapshot().await, Some(state));
}

#[tokio::test]
async fn test_state_written_in_camel_case() {
    let dir = auth_project();
    let service = QuestService::for_root(dir.path(), &Config::default());
    service.scan(ScannerFilter::All).await.unwrap();
    service.accept(1).await.unwrap();

    let repo = JsonStateRepository::new(dir.path(), ".git-quest.json");
    let state = repo.load().await.unwrap();
    assert_eq!(state.revision, 2);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(state_path(dir.path())).unwrap()).unwrap();
    assert!(raw["lastScanResults"].is_array());
    assert_eq!(raw["activeQuests"][0]["questNumber"], 1);
    assert_eq!(raw["activeQuests"][0]["scanResult"]["filePath"], "src/auth.ts");
    assert_eq!(raw["player"]["questsCompleted"], 0);
}
