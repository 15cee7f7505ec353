//! Text rendering for quest board, verification results, stats, and log.
//!
//! Shared by the CLI and the MCP server, so nothing here is colored.

use crate::domain::errors::QuestError;
use crate::domain::models::{progress_for, CompletionOutcome, QuestDefinition};
use crate::services::{LogFilter, PlayerStats, QuestLog, ScanReport};

const BOARD_RULE: usize = 50;
const LOG_RULE: usize = 40;
const BAR_WIDTH: usize = 10;

/// `width`-cell bar with `percent` of the cells filled, rounded.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = (percent * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn date(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub fn format_quest_board(report: &ScanReport) -> String {
    let progress = progress_for(report.xp);
    let count = report.quests.len();
    let mut lines = Vec::new();

    lines.push(format!("⚔️ QUEST BOARD — {count} quest{} found!", plural(count)));
    let banner = match progress.next_level {
        Some(next) => format!(
            " [{}] {}% to {}",
            progress_bar(progress.progress_percent, BAR_WIDTH),
            progress.progress_percent,
            next.name
        ),
        None => " — MAX LEVEL!".to_string(),
    };
    lines.push(format!(
        "{} Level: {} | XP: {}{banner}",
        progress.current.icon, progress.current.name, report.xp
    ));
    lines.push("─".repeat(BOARD_RULE));

    for (i, quest) in report.quests.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "[Quest #{}] {} {} \"{}\"",
            i + 1,
            quest.stars(),
            quest.scanner.emoji(),
            quest.title
        ));
        lines.push(format!("  → {}", quest.description));
        lines.push(format!("  → Reward: +{} XP", quest.xp));
        lines.push(format!("  → Hint: {}", quest.hint));
    }

    lines.push(String::new());
    lines.push("─".repeat(BOARD_RULE));
    lines.push("Type \"accept quest <number>\" to begin a quest!".to_string());
    lines.join("\n")
}

pub fn format_quest_accepted(quest: &QuestDefinition) -> String {
    [
        format!("⚔️ Quest Accepted: \"{}\" {}", quest.title, quest.stars()),
        String::new(),
        "📋 OBJECTIVE:".to_string(),
        quest.description.clone(),
        String::new(),
        format!("📍 LOCATION: {}", quest.location()),
        String::new(),
        format!("💡 HINT: {}", quest.hint),
        String::new(),
        format!("🎯 REWARD: +{} XP on completion", quest.xp),
        String::new(),
        "When you're done, say \"verify quest\" to check your work!".to_string(),
    ]
    .join("\n")
}

pub fn format_already_completed(quest: &QuestDefinition) -> String {
    format!("✅ Quest \"{}\" is already completed!", quest.title)
}

pub fn format_verification_success(
    quest: &QuestDefinition,
    outcome: &CompletionOutcome,
    remaining: usize,
) -> String {
    let progress = progress_for(outcome.total_xp);
    let mut lines = vec![
        format!("✅ QUEST COMPLETE: \"{}\"", quest.title),
        String::new(),
        format!("🎉 +{} XP earned!", outcome.xp_gained),
    ];

    lines.push(match progress.next_level {
        Some(next) => format!(
            "📊 Progress: {}/{} XP → {}",
            outcome.total_xp, next.min_xp, progress.current.name
        ),
        None => format!("📊 Progress: {} XP — MAX LEVEL!", outcome.total_xp),
    });

    if let Some(level) = outcome.new_level.filter(|_| outcome.leveled_up) {
        lines.push(String::new());
        lines.push(format!("🎉 LEVEL UP! → {} {}", level.name, level.icon));
    }

    if !outcome.new_badges.is_empty() {
        lines.push(String::new());
        for badge in &outcome.new_badges {
            lines.push(format!(
                "🏅 Badge Unlocked: \"{}\" {} — {}",
                badge.name, badge.icon, badge.description
            ));
        }
    }

    lines.push(String::new());
    if remaining > 0 {
        lines.push(format!(
            "Keep going, adventurer! You have {remaining} quest{} remaining.",
            plural(remaining)
        ));
        lines.push("Say \"scan quests\" to see the updated quest board.".to_string());
    } else {
        lines.push("🎊 All quests complete! You are a true legend!".to_string());
    }

    lines.join("\n")
}

pub fn format_verification_fail(quest: &QuestDefinition) -> String {
    [
        format!("❌ QUEST NOT YET COMPLETE: \"{}\"", quest.title),
        String::new(),
        format!("📍 Issue: {}", quest.description),
        String::new(),
        format!("💡 HINT: {}", quest.hint),
        String::new(),
        "Don't give up, brave coder! Make the fix and verify again.".to_string(),
    ]
    .join("\n")
}

pub fn format_player_stats(stats: &PlayerStats) -> String {
    let progress = &stats.progress;
    let mut lines = vec![
        "🎮 PLAYER STATS".to_string(),
        String::new(),
        format!("{} Level: {}", progress.current.icon, progress.current.name),
    ];

    lines.push(match progress.next_level {
        Some(next) => format!(
            "📊 XP: {} [{}] {} XP to {}",
            stats.player.xp,
            progress_bar(progress.progress_percent, BAR_WIDTH),
            progress.xp_to_next,
            next.name
        ),
        None => format!("📊 XP: {} — MAX LEVEL!", stats.player.xp),
    });
    lines.push(format!("🏆 Quests Completed: {}", stats.player.quests_completed));
    lines.push(format!("📅 Active Since: {}", date(&stats.player.first_played)));

    lines.push(String::new());
    lines.push("🏅 BADGES:".to_string());
    for status in &stats.badges {
        lines.push(format!(
            "  {} {} {} — {}",
            if status.earned { "✅" } else { "🔒" },
            status.badge.icon,
            status.badge.name,
            status.badge.description
        ));
    }

    if !stats.recent_completions.is_empty() {
        lines.push(String::new());
        lines.push("📈 QUEST LOG:".to_string());
        for quest in &stats.recent_completions {
            lines.push(format!(
                "  ✅ \"{}\" (+{} XP) — {}",
                quest.id,
                quest.xp,
                date(&quest.completed_at)
            ));
        }
    }

    lines.join("\n")
}

pub fn format_quest_log(log: &QuestLog, filter: LogFilter) -> String {
    let mut lines = vec!["📖 QUEST LOG".to_string(), "─".repeat(LOG_RULE)];

    if matches!(filter, LogFilter::All | LogFilter::Active) && !log.active.is_empty() {
        lines.push(String::new());
        lines.push("⚔️ ACTIVE QUESTS:".to_string());
        for quest in &log.active {
            lines.push(format!(
                "  🔸 [#{}] \"{}\" — accepted {}",
                quest.quest_number,
                quest.scan_result.title,
                date(&quest.accepted_at)
            ));
        }
    }

    if matches!(filter, LogFilter::All | LogFilter::Completed) && !log.completed.is_empty() {
        lines.push(String::new());
        lines.push("✅ COMPLETED QUESTS:".to_string());
        for quest in &log.completed {
            lines.push(format!(
                "  ✅ \"{}\" (+{} XP) — {}",
                quest.id,
                quest.xp,
                date(&quest.completed_at)
            ));
        }
    }

    if matches!(filter, LogFilter::All | LogFilter::Available) && !log.available.is_empty() {
        lines.push(String::new());
        lines.push("📋 AVAILABLE QUESTS:".to_string());
        for quest in &log.available {
            lines.push(format!("  🔹 \"{}\" — {}", quest.title, quest.description));
        }
    }

    if lines.len() == 2 {
        lines.push(String::new());
        lines.push("No quests found. Run \"scan quests\" to discover new quests!".to_string());
    }

    lines.join("\n")
}

/// One-line message for a rejected request.
pub fn format_rejection(err: &QuestError) -> String {
    format!("❌ {err}")
}
