//! Badge catalog and unlock evaluation.

use std::fmt;

use serde::Serialize;

use super::game_state::GameState;
use super::quest::ScannerKind;

/// A badge in the static catalog.
#[derive(Serialize)]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub condition: fn(&GameState) -> bool,
}

impl fmt::Debug for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Badge").field("id", &self.id).finish_non_exhaustive()
    }
}

impl PartialEq for Badge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

pub static BADGES: [Badge; 7] = [
    Badge {
        id: "first-blood",
        name: "First Blood",
        icon: "🩸",
        description: "Complete your first quest",
        condition: |state| !state.completed_quests.is_empty(),
    },
    Badge {
        id: "scribe",
        name: "Scribe",
        icon: "📜",
        description: "Document 3 functions",
        condition: |state| state.completed_by_scanner(ScannerKind::MissingDocs) >= 3,
    },
    Badge {
        id: "exterminator",
        name: "Exterminator",
        icon: "🪲",
        description: "Resolve 5 TODOs",
        condition: |state| state.completed_by_scanner(ScannerKind::TodoHunter) >= 5,
    },
    Badge {
        id: "guardian",
        name: "Guardian",
        icon: "🛡️",
        description: "Create 3 test files",
        condition: |state| state.completed_by_scanner(ScannerKind::MissingTests) >= 3,
    },
    Badge {
        id: "dragon-slayer",
        name: "Dragon Slayer",
        icon: "🐉",
        description: "Complete a ★★★ quest",
        condition: |state| state.completed_quests.iter().any(|q| q.difficulty == 3),
    },
    Badge {
        id: "boss-slayer",
        name: "Boss Slayer",
        icon: "👑",
        description: "Complete a Boss Quest",
        condition: |state| state.completed_by_scanner(ScannerKind::Boss) >= 1,
    },
    Badge {
        id: "perfectionist",
        name: "Perfectionist",
        icon: "✨",
        description: "Complete all quests in a single scan",
        condition: |state| state.last_scan_all_completed,
    },
];

/// Catalog badges not yet earned whose condition holds for `state`.
pub fn check_new_badges(state: &GameState) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|badge| !state.has_badge(badge.id) && (badge.condition)(state))
        .collect()
}

pub fn find_badge(id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|badge| badge.id == id)
}
