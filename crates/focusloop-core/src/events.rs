use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionKind};
use crate::timer::TimerState;

/// Every state change in the lifecycle produces an Event.
/// The CLI prints them; a GUI would poll for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        kind: SessionKind,
        duration_secs: u64,
        /// True when fired by the auto-advance delay rather than the user.
        auto: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A session finished, naturally or via early completion. Carries the
    /// appended log record and what the lifecycle advanced to.
    SessionCompleted {
        record: Session,
        cycle_count: u32,
        next_kind: SessionKind,
        next_duration_secs: u64,
        /// Ticks until the next session auto-starts, if armed.
        auto_start_in_secs: Option<u64>,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        id: String,
        title: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        kind: SessionKind,
        remaining_secs: u64,
        planned_secs: u64,
        cycle_count: u32,
        task_id: Option<String>,
        at: DateTime<Utc>,
    },
}
