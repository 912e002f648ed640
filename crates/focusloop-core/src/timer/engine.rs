//! Session lifecycle state machine.
//!
//! The engine is tick-driven: it holds no threads and no timers. The caller
//! delivers one `tick()` per second while anything is counting down; every
//! other mutation is an explicit command.
//!
//! ## State Transitions
//!
//! ```text
//! idle --start--> running --pause--> paused --start--> running
//! running --tick(remaining==0)--> idle   (natural completion, auto-advance)
//! running|paused --complete_early--> idle (focus only)
//! any --reset--> idle (kind focus, cycle 0, nothing logged)
//! ```
//!
//! Session kind (focus / short-break / long-break) is orthogonal to the
//! state. The planned duration is frozen when a session starts; settings
//! edits while running never alter the current target.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::session::{Session, SessionKind};
use crate::settings::TimerSettings;

/// Idle ticks between a completion and its auto-started successor, so the
/// completion signal can surface first. Cancelled by `reset`.
pub const AUTO_START_DELAY_SECS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Persisted engine snapshot, stored under the `timer-state` key.
///
/// The running/paused distinction is recorded but never restored: a
/// restart always lands in idle, so wall-clock time that passed while the
/// process was gone cannot leak into the countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub kind: SessionKind,
    #[serde(default)]
    pub remaining_secs: u64,
    #[serde(default)]
    pub planned_secs: u64,
    pub cycle_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// Core lifecycle state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    state: TimerState,
    kind: SessionKind,
    /// Seconds left on the current countdown.
    remaining_secs: u64,
    /// Planned duration frozen at session start.
    planned_secs: u64,
    /// Completed focus sessions since the last reset.
    cycle_count: u32,
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    mood: Option<u8>,
    #[serde(default)]
    productivity: Option<u8>,
    /// Idle ticks until the armed auto-start fires.
    #[serde(default)]
    auto_start_in: Option<u64>,
}

impl TimerEngine {
    /// Fresh engine: idle, focus, full focus duration on the clock.
    pub fn new(settings: &TimerSettings) -> Self {
        let duration = settings.duration_secs(SessionKind::Focus);
        Self {
            state: TimerState::Idle,
            kind: SessionKind::Focus,
            remaining_secs: duration,
            planned_secs: duration,
            cycle_count: 0,
            task_id: None,
            mood: None,
            productivity: None,
            auto_start_in: None,
        }
    }

    /// Rebuild from a persisted snapshot. Always lands in `Idle`; the
    /// persisted countdown is kept for display, and an empty or legacy
    /// snapshot falls back to the kind's configured duration.
    pub fn from_snapshot(snapshot: TimerSnapshot, settings: &TimerSettings) -> Self {
        let (remaining, planned) = if snapshot.planned_secs == 0 {
            let duration = settings.duration_secs(snapshot.kind);
            (duration, duration)
        } else {
            (snapshot.remaining_secs, snapshot.planned_secs)
        };
        Self {
            state: TimerState::Idle,
            kind: snapshot.kind,
            remaining_secs: remaining,
            planned_secs: planned,
            cycle_count: snapshot.cycle_count,
            task_id: snapshot.task_id,
            mood: None,
            productivity: None,
            auto_start_in: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn planned_secs(&self) -> u64 {
        self.planned_secs
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn auto_start_in(&self) -> Option<u64> {
        self.auto_start_in
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        if self.planned_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.planned_secs as f64)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            planned_secs: self.planned_secs,
            cycle_count: self.cycle_count,
            task_id: self.task_id.clone(),
        }
    }

    pub fn status_event(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            planned_secs: self.planned_secs,
            cycle_count: self.cycle_count,
            task_id: self.task_id.clone(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from idle (freezing the planned duration) or resume from
    /// paused. A manual start cancels any armed auto-start.
    pub fn start(&mut self, settings: &TimerSettings) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                let duration = settings.duration_secs(self.kind);
                self.planned_secs = duration;
                self.remaining_secs = duration;
                self.state = TimerState::Running;
                self.auto_start_in = None;
                Some(Event::SessionStarted {
                    kind: self.kind,
                    duration_secs: duration,
                    auto: false,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
        }
    }

    /// Freeze the countdown. Only valid while running.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// One-second heartbeat. While running it decrements the countdown and
    /// fires exactly one natural completion at zero; while idle it drives
    /// the armed auto-start delay. No-op otherwise.
    pub fn tick(&mut self, settings: &TimerSettings) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    return Some(self.complete(false, settings));
                }
                None
            }
            TimerState::Idle => {
                let pending = self.auto_start_in?;
                let pending = pending.saturating_sub(1);
                if pending == 0 {
                    self.auto_start_in = None;
                    self.state = TimerState::Running;
                    Some(Event::SessionStarted {
                        kind: self.kind,
                        duration_secs: self.planned_secs,
                        auto: true,
                        at: Utc::now(),
                    })
                } else {
                    self.auto_start_in = Some(pending);
                    None
                }
            }
            TimerState::Paused => None,
        }
    }

    /// User-initiated early completion. Valid only for a focus session that
    /// is running or paused; the elapsed portion counts as completed and
    /// the rest becomes time saved.
    pub fn complete_early(&mut self, settings: &TimerSettings) -> Option<Event> {
        if self.kind != SessionKind::Focus || self.state == TimerState::Idle {
            return None;
        }
        Some(self.complete(true, settings))
    }

    /// Discard the current session without logging anything. Returns the
    /// lifecycle to idle focus at cycle 0 and cancels any armed auto-start.
    pub fn reset(&mut self, settings: &TimerSettings) -> Event {
        *self = Self::new(settings);
        Event::TimerReset { at: Utc::now() }
    }

    /// Bind a focus session to a task. Only while idle before starting.
    pub fn bind_task(&mut self, task_id: Option<String>) -> bool {
        if self.state != TimerState::Idle || self.kind != SessionKind::Focus {
            return false;
        }
        self.task_id = task_id;
        true
    }

    /// Attach a mood rating (1-5) while paused during a focus session.
    pub fn rate_mood(&mut self, rating: u8) -> bool {
        if !self.can_rate() || !(1..=5).contains(&rating) {
            return false;
        }
        self.mood = Some(rating);
        true
    }

    /// Attach a productivity rating (1-5) while paused during a focus session.
    pub fn rate_productivity(&mut self, rating: u8) -> bool {
        if !self.can_rate() || !(1..=5).contains(&rating) {
            return false;
        }
        self.productivity = Some(rating);
        true
    }

    fn can_rate(&self) -> bool {
        self.state == TimerState::Paused && self.kind == SessionKind::Focus
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Emit the completed session record and advance to the next kind.
    fn complete(&mut self, early: bool, settings: &TimerSettings) -> Event {
        let (duration, saved) = if early {
            (
                self.planned_secs.saturating_sub(self.remaining_secs),
                self.remaining_secs,
            )
        } else {
            (self.planned_secs, 0)
        };

        let mut record = Session::new(self.kind, duration, true);
        record.completed_early = early;
        record.time_saved_secs = saved;
        if self.kind == SessionKind::Focus {
            record.task_id = self.task_id.clone();
        }
        // Feedback travels into the record and is cleared after emission.
        record.mood = self.mood.take();
        record.productivity = self.productivity.take();

        let next_kind = if self.kind == SessionKind::Focus {
            self.cycle_count += 1;
            if self.cycle_count % settings.long_break_interval.max(1) == 0 {
                SessionKind::LongBreak
            } else {
                SessionKind::ShortBreak
            }
        } else {
            SessionKind::Focus
        };

        // Duration for the next kind is looked up at advance time, not at
        // the original session start.
        let next_duration = settings.duration_secs(next_kind);
        self.kind = next_kind;
        self.planned_secs = next_duration;
        self.remaining_secs = next_duration;
        self.state = TimerState::Idle;

        let auto = if next_kind.is_break() {
            settings.auto_start_breaks
        } else {
            settings.auto_start_focus
        };
        self.auto_start_in = auto.then_some(AUTO_START_DELAY_SECS);

        Event::SessionCompleted {
            record,
            cycle_count: self.cycle_count,
            next_kind,
            next_duration_secs: next_duration,
            auto_start_in_secs: self.auto_start_in,
            at: Utc::now(),
        }
    }
}
