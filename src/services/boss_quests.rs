//! Boss quest synthesis.

use crate::domain::models::quest::{file_name, file_stem};
use crate::domain::models::{QuestDefinition, ScannerKind};

const BOSS_DIFFICULTY: u8 = 4;
const BOSS_XP: u32 = 50;

/// One boss quest for every file that two or more different detectors flagged.
///
/// Bosses come out in the order their files first appear in `quests`.
pub fn generate_boss_quests(quests: &[QuestDefinition]) -> Vec<QuestDefinition> {
    let mut by_file: Vec<(&str, Vec<ScannerKind>)> = Vec::new();

    for quest in quests.iter().filter(|q| q.scanner != ScannerKind::Boss) {
        match by_file.iter_mut().find(|(path, _)| *path == quest.file_path) {
            Some((_, kinds)) => {
                if !kinds.contains(&quest.scanner) {
                    kinds.push(quest.scanner);
                }
            }
            None => by_file.push((&quest.file_path, vec![quest.scanner])),
        }
    }

    by_file
        .into_iter()
        .filter(|(_, kinds)| kinds.len() >= 2)
        .map(|(path, _)| QuestDefinition {
            id: format!("boss-{}", file_stem(path)),
            title: format!("🐉 BOSS: Purify {}", file_name(path)),
            description:
                "Complete ALL quests for this file in a single session to slay the boss"
                    .to_string(),
            file_path: path.to_string(),
            line: None,
            scanner: ScannerKind::Boss,
            difficulty: BOSS_DIFFICULTY,
            xp: BOSS_XP,
            hint: "Fix all issues in this file: add documentation, resolve TODOs, and create tests"
                .to_string(),
        })
        .collect()
}
