//! Tasks that focus sessions can be bound to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work estimated in pomodoros.
///
/// `completed_pomodoros` is incremented only by a completed focus session
/// bound to the task, and never decremented automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub estimated_pomodoros: u32,
    #[serde(default)]
    pub completed_pomodoros: u32,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>, estimated_pomodoros: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            estimated_pomodoros: estimated_pomodoros.max(1),
            completed_pomodoros: 0,
            completed: false,
            created_at: Utc::now(),
        }
    }

    /// Open tasks are eligible for binding to a focus session.
    pub fn is_open(&self) -> bool {
        !self.completed
    }
}

/// Credit one completed focus session to the task with the given id.
/// Returns false when the id is unknown.
pub fn record_pomodoro(tasks: &mut [Task], task_id: &str) -> bool {
    match tasks.iter_mut().find(|t| t.id == task_id) {
        Some(task) => {
            task.completed_pomodoros += 1;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_open_with_zero_progress() {
        let task = Task::new("Write report", "", 3);
        assert!(task.is_open());
        assert_eq!(task.completed_pomodoros, 0);
        assert_eq!(task.estimated_pomodoros, 3);
    }

    #[test]
    fn estimate_is_at_least_one() {
        let task = Task::new("t", "", 0);
        assert_eq!(task.estimated_pomodoros, 1);
    }

    #[test]
    fn record_pomodoro_increments_exactly_one_task() {
        let mut tasks = vec![Task::new("a", "", 2), Task::new("b", "", 2)];
        let id = tasks[1].id.clone();
        assert!(record_pomodoro(&mut tasks, &id));
        assert_eq!(tasks[0].completed_pomodoros, 0);
        assert_eq!(tasks[1].completed_pomodoros, 1);
        assert!(!record_pomodoro(&mut tasks, "missing"));
    }
}
