//! Statistics over the session log.
//!
//! `aggregate` is a pure, idempotent derivation: it reads the full log and
//! the task list and produces a period-filtered [`Summary`] without
//! mutating either input.

mod streak;

pub use streak::{streak_info, StreakInfo};

use chrono::{DateTime, Duration, Local, Months, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::session::{Session, SessionKind};
use crate::task::Task;

/// Reporting window, always ending at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Since local midnight.
    Day,
    /// Last 7 days.
    Week,
    /// Last calendar month.
    Month,
}

/// One local calendar day inside the filtered window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub sessions: u64,
    /// Whole minutes of completed focus time.
    pub focus_minutes: u64,
    /// Mean mood of rated sessions that day, 0.0 when none were rated.
    pub mood: f64,
}

/// Completed-session count for one kind, with its fixed display color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlice {
    pub kind: SessionKind,
    pub label: String,
    pub count: u64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyEntry {
    /// Local start hour, 0-23.
    pub hour: u32,
    pub sessions: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskProgress {
    /// Title truncated to 20 characters plus an ellipsis.
    pub name: String,
    pub completed: u32,
    pub estimated: u32,
}

/// Daily mood paired with that day's session count as a productivity proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub mood: f64,
    pub sessions: u64,
}

/// Everything the stats dashboard needs, derived read-only from the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_sessions: u64,
    /// completed / total x 100; 0.0 when the window is empty.
    pub completion_rate: f64,
    pub total_focus_minutes: u64,
    pub total_break_minutes: u64,
    pub average_mood: f64,
    pub average_productivity: f64,
    pub daily: Vec<DailyEntry>,
    pub type_distribution: Vec<TypeSlice>,
    pub hourly: Vec<HourlyEntry>,
    pub task_progress: Vec<TaskProgress>,
    pub mood_trend: Vec<MoodPoint>,
    pub streak: StreakInfo,
}

const KIND_COLORS: [(SessionKind, &str, &str); 3] = [
    (SessionKind::Focus, "Focus", "#000000"),
    (SessionKind::ShortBreak, "Short break", "#22c55e"),
    (SessionKind::LongBreak, "Long break", "#3b82f6"),
];

fn in_period(session: &Session, period: Period, now: DateTime<Utc>) -> bool {
    match period {
        Period::Day => {
            session.date.with_timezone(&Local).date_naive()
                == now.with_timezone(&Local).date_naive()
        }
        Period::Week => session.date >= now - Duration::days(7),
        Period::Month => {
            let cutoff = now
                .checked_sub_months(Months::new(1))
                .unwrap_or(now - Duration::days(30));
            session.date >= cutoff
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u64), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn round_minutes(secs: u64) -> u64 {
    ((secs as f64) / 60.0).round() as u64
}

/// Derive the full summary for one reporting period.
///
/// The period filter applies to every figure except the streak, which is
/// always computed over the last 30 days of the full log (the canonical
/// streak definition).
pub fn aggregate(sessions: &[Session], tasks: &[Task], period: Period, now: DateTime<Utc>) -> Summary {
    let filtered: Vec<&Session> = sessions
        .iter()
        .filter(|s| in_period(s, period, now))
        .collect();

    let total_sessions = filtered.len() as u64;
    let completed = filtered.iter().filter(|s| s.completed).count() as u64;
    let completion_rate = if total_sessions == 0 {
        0.0
    } else {
        completed as f64 / total_sessions as f64 * 100.0
    };

    let focus_secs: u64 = filtered
        .iter()
        .filter(|s| s.kind == SessionKind::Focus && s.completed)
        .map(|s| s.duration_secs)
        .sum();
    let break_secs: u64 = filtered
        .iter()
        .filter(|s| s.kind.is_break() && s.completed)
        .map(|s| s.duration_secs)
        .sum();

    let average_mood = mean(filtered.iter().filter_map(|s| s.mood).map(f64::from));
    let average_productivity = mean(filtered.iter().filter_map(|s| s.productivity).map(f64::from));

    // Daily buckets, keyed by local calendar date.
    let mut days: BTreeMap<NaiveDate, (u64, u64, Vec<f64>)> = BTreeMap::new();
    for session in &filtered {
        let date = session.date.with_timezone(&Local).date_naive();
        let bucket = days.entry(date).or_default();
        bucket.0 += 1;
        if session.kind == SessionKind::Focus && session.completed {
            bucket.1 += session.duration_secs;
        }
        if let Some(mood) = session.mood {
            bucket.2.push(f64::from(mood));
        }
    }
    let daily: Vec<DailyEntry> = days
        .into_iter()
        .map(|(date, (count, focus, moods))| DailyEntry {
            date,
            sessions: count,
            focus_minutes: round_minutes(focus),
            mood: mean(moods.into_iter()),
        })
        .collect();

    let type_distribution = KIND_COLORS
        .iter()
        .map(|(kind, label, color)| TypeSlice {
            kind: *kind,
            label: (*label).to_string(),
            count: filtered
                .iter()
                .filter(|s| s.kind == *kind && s.completed)
                .count() as u64,
            color: (*color).to_string(),
        })
        .collect();

    // 24-bucket histogram; empty hours are dropped from the output.
    let mut hour_counts = [0u64; 24];
    for session in &filtered {
        let hour = session.date.with_timezone(&Local).hour() as usize;
        hour_counts[hour] += 1;
    }
    let hourly: Vec<HourlyEntry> = hour_counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(hour, count)| HourlyEntry {
            hour: hour as u32,
            sessions: *count,
        })
        .collect();

    // Top 5 tasks in log order, names truncated for display.
    let task_progress: Vec<TaskProgress> = tasks
        .iter()
        .take(5)
        .map(|task| TaskProgress {
            name: truncate_name(&task.title),
            completed: task.completed_pomodoros,
            estimated: task.estimated_pomodoros,
        })
        .collect();

    let mood_trend: Vec<MoodPoint> = daily
        .iter()
        .filter(|d| d.mood > 0.0)
        .map(|d| MoodPoint {
            date: d.date,
            mood: d.mood,
            sessions: d.sessions,
        })
        .collect();

    let streak = streak_info(sessions, now.with_timezone(&Local).date_naive());

    Summary {
        total_sessions,
        completion_rate,
        total_focus_minutes: round_minutes(focus_secs),
        total_break_minutes: round_minutes(break_secs),
        average_mood,
        average_productivity,
        daily,
        type_distribution,
        hourly,
        task_progress,
        mood_trend,
        streak,
    }
}

fn truncate_name(title: &str) -> String {
    if title.chars().count() > 20 {
        let short: String = title.chars().take(20).collect();
        format!("{short}...")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_at(kind: SessionKind, local_hour: u32, days_ago: i64, completed: bool) -> Session {
        let date = Local::now().date_naive() - Duration::days(days_ago);
        let local = Local
            .from_local_datetime(&date.and_hms_opt(local_hour, 30, 0).unwrap())
            .earliest()
            .unwrap();
        let mut s = Session::new(kind, 1500, completed);
        s.date = local.with_timezone(&Utc);
        s
    }

    #[test]
    fn empty_log_has_zero_completion_rate() {
        let summary = aggregate(&[], &[], Period::Week, Utc::now());
        assert_eq!(summary.total_sessions, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert!(summary.completion_rate.is_finite());
        assert!(summary.daily.is_empty());
        assert!(summary.hourly.is_empty());
        assert_eq!(summary.streak.current, 0);
    }

    #[test]
    fn completion_rate_and_focus_minutes() {
        let mut incomplete = session_at(SessionKind::Focus, 10, 0, false);
        incomplete.duration_secs = 600;
        let log = vec![
            session_at(SessionKind::Focus, 9, 0, true),
            session_at(SessionKind::ShortBreak, 10, 0, true),
            incomplete,
        ];
        let summary = aggregate(&log, &[], Period::Week, Utc::now());
        assert_eq!(summary.total_sessions, 3);
        assert!((summary.completion_rate - 66.666).abs() < 0.01);
        assert_eq!(summary.total_focus_minutes, 25);
        assert_eq!(summary.total_break_minutes, 25);
    }

    #[test]
    fn day_period_keeps_only_today() {
        let log = vec![
            session_at(SessionKind::Focus, 9, 0, true),
            session_at(SessionKind::Focus, 9, 1, true),
            session_at(SessionKind::Focus, 9, 3, true),
        ];
        let today = aggregate(&log, &[], Period::Day, Utc::now());
        assert_eq!(today.total_sessions, 1);
        let week = aggregate(&log, &[], Period::Week, Utc::now());
        assert_eq!(week.total_sessions, 3);
    }

    #[test]
    fn type_distribution_counts_completed_only_with_fixed_colors() {
        let log = vec![
            session_at(SessionKind::Focus, 9, 0, true),
            session_at(SessionKind::Focus, 10, 0, false),
            session_at(SessionKind::LongBreak, 11, 0, true),
        ];
        let summary = aggregate(&log, &[], Period::Week, Utc::now());
        let dist = &summary.type_distribution;
        assert_eq!(dist.len(), 3);
        assert_eq!(dist[0].count, 1);
        assert_eq!(dist[0].color, "#000000");
        assert_eq!(dist[1].count, 0);
        assert_eq!(dist[1].color, "#22c55e");
        assert_eq!(dist[2].count, 1);
        assert_eq!(dist[2].color, "#3b82f6");
    }

    #[test]
    fn hourly_histogram_drops_empty_buckets() {
        let log = vec![
            session_at(SessionKind::Focus, 9, 0, true),
            session_at(SessionKind::Focus, 9, 0, true),
            session_at(SessionKind::Focus, 14, 0, false),
        ];
        let summary = aggregate(&log, &[], Period::Week, Utc::now());
        assert_eq!(summary.hourly.len(), 2);
        assert_eq!(summary.hourly[0].hour, 9);
        assert_eq!(summary.hourly[0].sessions, 2);
        assert_eq!(summary.hourly[1].hour, 14);
    }

    #[test]
    fn daily_buckets_group_by_local_date() {
        let mut rated = session_at(SessionKind::Focus, 9, 1, true);
        rated.mood = Some(4);
        let log = vec![
            rated,
            session_at(SessionKind::ShortBreak, 10, 1, true),
            session_at(SessionKind::Focus, 9, 0, true),
        ];
        let summary = aggregate(&log, &[], Period::Week, Utc::now());
        assert_eq!(summary.daily.len(), 2);
        let yesterday = &summary.daily[0];
        assert_eq!(yesterday.sessions, 2);
        assert_eq!(yesterday.focus_minutes, 25);
        assert_eq!(yesterday.mood, 4.0);

        // Mood trend only carries days with a nonzero mood average.
        assert_eq!(summary.mood_trend.len(), 1);
        assert_eq!(summary.mood_trend[0].sessions, 2);
    }

    #[test]
    fn averages_ignore_unrated_sessions() {
        let mut a = session_at(SessionKind::Focus, 9, 0, true);
        a.mood = Some(5);
        a.productivity = Some(3);
        let mut b = session_at(SessionKind::Focus, 10, 0, true);
        b.mood = Some(3);
        let unrated = session_at(SessionKind::Focus, 11, 0, true);
        let summary = aggregate(&[a, b, unrated], &[], Period::Week, Utc::now());
        assert_eq!(summary.average_mood, 4.0);
        assert_eq!(summary.average_productivity, 3.0);
    }

    #[test]
    fn task_progress_truncates_long_names_and_caps_at_five() {
        let mut tasks: Vec<Task> = (0..7).map(|i| Task::new(format!("task {i}"), "", 2)).collect();
        tasks[0].title = "a very long task title indeed".into();
        let summary = aggregate(&[], &tasks, Period::Week, Utc::now());
        assert_eq!(summary.task_progress.len(), 5);
        assert_eq!(summary.task_progress[0].name, "a very long task tit...");
        assert_eq!(summary.task_progress[1].name, "task 1");
    }

    #[test]
    fn streak_ignores_the_period_filter() {
        let log = vec![
            session_at(SessionKind::Focus, 9, 0, true),
            session_at(SessionKind::Focus, 9, 1, true),
            session_at(SessionKind::Focus, 9, 2, true),
        ];
        let summary = aggregate(&log, &[], Period::Day, Utc::now());
        assert_eq!(summary.total_sessions, 1);
        assert_eq!(summary.streak.current, 3);
    }
}
