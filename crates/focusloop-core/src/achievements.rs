//! Gamified achievements, re-derived from the session log.
//!
//! `evaluate` is a pure function over the full log: progress is recomputed
//! from scratch on every call rather than incrementally, so replayed or
//! reordered log entries cannot desynchronize it. Only the unlocked flag
//! and its timestamp are sticky.

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionKind};
use crate::settings::TimerSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: u64,
    pub target: u64,
}

fn entry(id: &str, title: &str, description: &str, icon: &str, target: u64) -> Achievement {
    Achievement {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
        unlocked: false,
        unlocked_at: None,
        progress: 0,
        target,
    }
}

/// The built-in achievement catalog.
pub fn catalog() -> Vec<Achievement> {
    vec![
        entry("first-pomodoro", "First Step", "Complete your first pomodoro", "\u{1F345}", 1),
        entry("daily-goal", "Daily Goal", "Hit your daily pomodoro goal", "\u{1F3AF}", 1),
        entry(
            "week-streak",
            "Consistent Week",
            "Complete at least 1 pomodoro for 7 days in a row",
            "\u{1F525}",
            7,
        ),
        entry("century", "Centurion", "Complete 100 pomodoros", "\u{1F4AF}", 100),
        entry("early-bird", "Early Bird", "Complete a pomodoro before 8am", "\u{1F305}", 1),
        entry("night-owl", "Night Owl", "Complete a pomodoro after 10pm", "\u{1F989}", 1),
        entry("efficient", "Efficient", "Finish an activity before the clock runs out", "\u{26A1}", 1),
    ]
}

/// Recompute achievement progress from the full session log.
///
/// Returns the updated set plus the achievements that transitioned to
/// unlocked during this call (so the caller can request one-shot
/// notifications). `unlocked_at` is set to `now` at the first transition
/// and never overwritten. Unknown ids in `previous` are dropped; catalog
/// ids missing from `previous` are added.
pub fn evaluate(
    sessions: &[Session],
    settings: &TimerSettings,
    previous: &[Achievement],
    now: DateTime<Utc>,
) -> (Vec<Achievement>, Vec<Achievement>) {
    let completed_focus: Vec<&Session> = sessions
        .iter()
        .filter(|s| s.kind == SessionKind::Focus && s.completed)
        .collect();
    let today = now.with_timezone(&Local).date_naive();
    let today_count = completed_focus
        .iter()
        .filter(|s| s.date.with_timezone(&Local).date_naive() == today)
        .count() as u64;
    let any_early = sessions.iter().any(|s| s.completed_early);

    let mut updated = Vec::with_capacity(7);
    let mut newly_unlocked = Vec::new();

    for mut achievement in catalog() {
        let prior = previous.iter().find(|p| p.id == achievement.id);
        achievement.progress = match achievement.id.as_str() {
            "first-pomodoro" => u64::from(!completed_focus.is_empty()),
            "daily-goal" => u64::from(today_count >= u64::from(settings.daily_goal)),
            // TODO: this only checks today against a 7-day target, so it
            // can never unlock; switch to the stats::streak run length once
            // the intended behavior is settled.
            "week-streak" => u64::from(today_count > 0),
            "century" => completed_focus.len() as u64,
            "early-bird" => u64::from(
                completed_focus
                    .iter()
                    .any(|s| s.date.with_timezone(&Local).hour() < 8),
            ),
            "night-owl" => u64::from(
                completed_focus
                    .iter()
                    .any(|s| s.date.with_timezone(&Local).hour() >= 22),
            ),
            "efficient" => u64::from(any_early),
            _ => 0,
        };

        let was_unlocked = prior.is_some_and(|p| p.unlocked);
        // Sticky-or: once unlocked, stays unlocked.
        achievement.unlocked = was_unlocked || achievement.progress >= achievement.target;
        achievement.unlocked_at = if was_unlocked {
            prior.and_then(|p| p.unlocked_at)
        } else if achievement.unlocked {
            Some(now)
        } else {
            None
        };

        if achievement.unlocked && !was_unlocked {
            newly_unlocked.push(achievement.clone());
        }
        updated.push(achievement);
    }

    (updated, newly_unlocked)
}
