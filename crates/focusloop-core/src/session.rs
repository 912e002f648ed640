//! Session log records.
//!
//! The session log is append-only and is the single source of truth for
//! achievements and statistics. Records are never mutated or deleted once
//! appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a session interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    pub fn is_break(self) -> bool {
        !matches!(self, SessionKind::Focus)
    }

    pub fn label(self) -> &'static str {
        match self {
            SessionKind::Focus => "focus",
            SessionKind::ShortBreak => "short-break",
            SessionKind::LongBreak => "long-break",
        }
    }
}

/// One entry in the append-only session log.
///
/// Invariant: `duration_secs + time_saved_secs` equals the planned duration
/// whenever `completed_early` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Completion timestamp.
    pub date: DateTime<Utc>,
    pub kind: SessionKind,
    /// Seconds actually elapsed.
    pub duration_secs: u64,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Optional mood rating, 1-5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    /// Optional productivity rating, 1-5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub productivity: Option<u8>,
    #[serde(default)]
    pub completed_early: bool,
    /// Seconds left on the clock at early completion.
    #[serde(default)]
    pub time_saved_secs: u64,
}

impl Session {
    pub fn new(kind: SessionKind, duration_secs: u64, completed: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            kind,
            duration_secs,
            completed,
            task_id: None,
            mood: None,
            productivity: None,
            completed_early: false,
            time_saved_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SessionKind::ShortBreak).unwrap(),
            "\"short-break\""
        );
        let kind: SessionKind = serde_json::from_str("\"long-break\"").unwrap();
        assert_eq!(kind, SessionKind::LongBreak);
    }

    #[test]
    fn optional_fields_default_on_old_records() {
        let json = r#"{"id":"1","date":"2026-01-01T09:00:00Z","kind":"focus","duration_secs":1500,"completed":true}"#;
        let s: Session = serde_json::from_str(json).unwrap();
        assert!(!s.completed_early);
        assert_eq!(s.time_saved_secs, 0);
        assert!(s.mood.is_none());
    }
}
