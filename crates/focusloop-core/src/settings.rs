//! User-editable timer settings.
//!
//! Settings are read by every duration computation but only mutated by an
//! explicit user edit. Out-of-range numeric input is clamped rather than
//! rejected; all durations stay >= 1 minute.

use serde::{Deserialize, Serialize};

use crate::session::SessionKind;

/// Timer settings, persisted under the `settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Focus session length in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    /// A long break replaces the short one every N completed focus cycles.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    /// Daily goal in completed focus sessions.
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    /// Named ambient soundscape, "none" to disable. Playback belongs to
    /// the notifier environment; the core only stores the preference.
    #[serde(default = "default_ambient_sound")]
    pub ambient_sound: String,
    #[serde(default)]
    pub auto_start_breaks: bool,
    #[serde(default)]
    pub auto_start_focus: bool,
}

fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_long_break_interval() -> u32 {
    4
}
fn default_daily_goal() -> u32 {
    8
}
fn default_true() -> bool {
    true
}
fn default_ambient_sound() -> String {
    "none".to_string()
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
            daily_goal: default_daily_goal(),
            sound_enabled: true,
            ambient_sound: default_ambient_sound(),
            auto_start_breaks: false,
            auto_start_focus: false,
        }
    }
}

impl TimerSettings {
    /// Configured duration of a session kind, in seconds.
    pub fn duration_secs(&self, kind: SessionKind) -> u64 {
        let minutes = match kind {
            SessionKind::Focus => self.focus_minutes,
            SessionKind::ShortBreak => self.short_break_minutes,
            SessionKind::LongBreak => self.long_break_minutes,
        };
        u64::from(minutes) * 60
    }

    /// Clamp every field into its accepted range. Invalid input is fixed
    /// up, never rejected.
    pub fn clamp(&mut self) {
        self.focus_minutes = self.focus_minutes.clamp(1, 180);
        self.short_break_minutes = self.short_break_minutes.clamp(1, 60);
        self.long_break_minutes = self.long_break_minutes.clamp(1, 120);
        self.long_break_interval = self.long_break_interval.clamp(2, 8);
        self.daily_goal = self.daily_goal.clamp(1, 20);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_classic_pomodoro() {
        let s = TimerSettings::default();
        assert_eq!(s.focus_minutes, 25);
        assert_eq!(s.short_break_minutes, 5);
        assert_eq!(s.long_break_minutes, 15);
        assert_eq!(s.long_break_interval, 4);
        assert_eq!(s.ambient_sound, "none");
        assert_eq!(s.duration_secs(SessionKind::Focus), 1500);
        assert_eq!(s.duration_secs(SessionKind::ShortBreak), 300);
    }

    #[test]
    fn clamp_fixes_out_of_range_input() {
        let mut s = TimerSettings {
            focus_minutes: 0,
            short_break_minutes: 999,
            long_break_interval: 1,
            daily_goal: 0,
            ..TimerSettings::default()
        };
        s.clamp();
        assert_eq!(s.focus_minutes, 1);
        assert_eq!(s.short_break_minutes, 60);
        assert_eq!(s.long_break_interval, 2);
        assert_eq!(s.daily_goal, 1);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let s: TimerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, TimerSettings::default());
    }
}
