//! XP-to-level progression.

use serde::Serialize;

/// One tier of the level table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub name: &'static str,
    pub min_xp: u32,
    pub icon: &'static str,
}

/// Level table, ascending by threshold. The first entry starts at 0.
pub static LEVELS: [Level; 6] = [
    Level { name: "Novice", min_xp: 0, icon: "🌱" },
    Level { name: "Apprentice", min_xp: 25, icon: "⚔️" },
    Level { name: "Journeyman", min_xp: 75, icon: "🛡️" },
    Level { name: "Expert", min_xp: 150, icon: "🔮" },
    Level { name: "Master", min_xp: 300, icon: "👑" },
    Level { name: "Legend", min_xp: 500, icon: "🐉" },
];

/// Where a given xp total sits in the level table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub current: &'static Level,
    /// `None` at the top of the table
    pub next_level: Option<&'static Level>,
    pub xp_to_next: u32,
    /// Percentage through the current band, 0..=100
    pub progress_percent: u32,
}

/// Highest level whose threshold is at or below `xp`.
pub fn level_for(xp: u32) -> &'static Level {
    LEVELS
        .iter()
        .take_while(|level| level.min_xp <= xp)
        .last()
        .unwrap_or(&LEVELS[0])
}

pub fn progress_for(xp: u32) -> Progress {
    let index = LEVELS
        .iter()
        .rposition(|level| level.min_xp <= xp)
        .unwrap_or(0);
    let current = &LEVELS[index];

    let Some(next) = LEVELS.get(index + 1) else {
        return Progress {
            current,
            next_level: None,
            xp_to_next: 0,
            progress_percent: 100,
        };
    };

    let in_band = u64::from(xp - current.min_xp);
    let band = u64::from(next.min_xp - current.min_xp);
    // in_band < band, so the quotient is below 100
    let percent = u32::try_from(in_band * 100 / band).unwrap_or(100);

    Progress {
        current,
        next_level: Some(next),
        xp_to_next: next.min_xp - xp,
        progress_percent: percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_thresholds() {
        assert_eq!(level_for(0).name, "Novice");
        assert_eq!(level_for(24).name, "Novice");
        assert_eq!(level_for(25).name, "Apprentice");
        assert_eq!(level_for(149).name, "Journeyman");
        assert_eq!(level_for(500).name, "Legend");
        assert_eq!(level_for(u32::MAX).name, "Legend");
    }

    #[test]
    fn test_progress_at_band_start() {
        let progress = progress_for(25);
        assert_eq!(progress.current.name, "Apprentice");
        assert_eq!(progress.next_level.map(|l| l.name), Some("Journeyman"));
        assert_eq!(progress.progress_percent, 0);
        assert_eq!(progress.xp_to_next, 50);
    }

    #[test]
    fn test_progress_floors_percentage() {
        // 10 of 25 in the first band
        let progress = progress_for(10);
        assert_eq!(progress.progress_percent, 40);
        assert_eq!(progress.xp_to_next, 15);

        // 49 of 50 in the second band
        assert_eq!(progress_for(74).progress_percent, 98);
    }

    #[test]
    fn test_progress_at_ceiling() {
        let progress = progress_for(900);
        assert_eq!(progress.current.name, "Legend");
        assert!(progress.next_level.is_none());
        assert_eq!(progress.xp_to_next, 0);
        assert_eq!(progress.progress_percent, 100);
    }

    #[test]
    fn test_table_is_ascending_from_zero() {
        assert_eq!(LEVELS[0].min_xp, 0);
        assert!(LEVELS.windows(2).all(|w| w[0].min_xp < w[1].min_xp));
    }
}
