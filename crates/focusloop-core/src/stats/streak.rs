//! Consecutive-day streaks of completed focus sessions.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::session::{Session, SessionKind};

/// How far back the streak scan looks.
const STREAK_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Unbroken run of qualifying days counting back from today.
    pub current: u32,
    /// Longest run within the last 30 days.
    pub best: u32,
}

/// A day qualifies when it holds at least one completed focus session.
/// A day with zero qualifying sessions breaks the run.
pub fn streak_info(sessions: &[Session], today: NaiveDate) -> StreakInfo {
    let days: HashSet<NaiveDate> = sessions
        .iter()
        .filter(|s| s.kind == SessionKind::Focus && s.completed)
        .map(|s| s.date.with_timezone(&Local).date_naive())
        .collect();
    if days.is_empty() {
        return StreakInfo::default();
    }

    let mut current = 0;
    let mut best = 0;
    let mut run = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let Some(day) = today.checked_sub_days(chrono::Days::new(u64::from(offset))) else {
            break;
        };
        if days.contains(&day) {
            run += 1;
            if run == offset + 1 {
                // Still contiguous with today.
                current = run;
            }
        } else {
            best = best.max(run);
            run = 0;
        }
    }
    best = best.max(run);

    StreakInfo { current, best }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn focus_on(days_ago: i64) -> Session {
        let date = Local::now().date_naive() - Duration::days(days_ago);
        let local = Local
            .from_local_datetime(&date.and_hms_opt(9, 0, 0).unwrap())
            .earliest()
            .unwrap();
        let mut s = Session::new(SessionKind::Focus, 1500, true);
        s.date = local.with_timezone(&Utc);
        s
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    #[test]
    fn empty_log_means_no_streak() {
        assert_eq!(streak_info(&[], today()), StreakInfo::default());
    }

    #[test]
    fn three_consecutive_days_with_a_gap() {
        // Today and the two previous days, nothing on day-3-ago.
        let log = vec![focus_on(0), focus_on(1), focus_on(2), focus_on(4)];
        let info = streak_info(&log, today());
        assert_eq!(info.current, 3);
        assert_eq!(info.best, 3);
    }

    #[test]
    fn best_run_can_exceed_current() {
        // Nothing today; a 5-day run further back.
        let log: Vec<Session> = (3..8).map(focus_on).collect();
        let info = streak_info(&log, today());
        assert_eq!(info.current, 0);
        assert_eq!(info.best, 5);
    }

    #[test]
    fn breaks_and_incomplete_sessions_do_not_qualify() {
        let mut incomplete = focus_on(0);
        incomplete.completed = false;
        let mut brk = focus_on(1);
        brk.kind = SessionKind::ShortBreak;
        let info = streak_info(&[incomplete, brk], today());
        assert_eq!(info, StreakInfo::default());
    }

    #[test]
    fn multiple_sessions_per_day_count_once() {
        let log = vec![focus_on(0), focus_on(0), focus_on(1)];
        let info = streak_info(&log, today());
        assert_eq!(info.current, 2);
    }
}
