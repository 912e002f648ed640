//! Glue between the lifecycle engine, the store, and the notifier.
//!
//! The runner is the session log's sole writer. Store failures on this
//! path are logged and swallowed: the lifecycle has already transitioned
//! and the user is never blocked on persistence.

use chrono::Utc;
use tracing::{debug, warn};

use super::engine::{TimerEngine, TimerSnapshot};
use crate::achievements::{self, Achievement};
use crate::events::Event;
use crate::notify::Notifier;
use crate::session::{Session, SessionKind};
use crate::settings::TimerSettings;
use crate::store::{keys, Store};
use crate::task::{self, Task};

pub struct TimerRunner<S, N> {
    store: S,
    notifier: N,
}

impl<S: Store, N: Notifier> TimerRunner<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current settings, clamped into range whatever the store held.
    pub fn settings(&self) -> TimerSettings {
        let mut settings: TimerSettings = self.store.load(keys::SETTINGS);
        settings.clamp();
        settings
    }

    /// Rebuild the engine from the persisted snapshot (always idle), or
    /// fresh when none exists.
    pub fn load_engine(&self, settings: &TimerSettings) -> TimerEngine {
        match self.store.load::<Option<TimerSnapshot>>(keys::TIMER_STATE) {
            Some(snapshot) => TimerEngine::from_snapshot(snapshot, settings),
            None => TimerEngine::new(settings),
        }
    }

    /// Persist the engine snapshot. Best-effort.
    pub fn save_engine(&self, engine: &TimerEngine) {
        if let Err(err) = self.store.save(keys::TIMER_STATE, &engine.snapshot()) {
            warn!(%err, "failed to persist timer snapshot");
        }
    }

    /// React to a lifecycle event. Completion events append the session,
    /// credit the bound task, and re-derive achievements; any unlocks
    /// come back as [`Event::AchievementUnlocked`] follow-ups for the
    /// caller to surface.
    pub fn handle_event(&self, event: &Event, settings: &TimerSettings) -> Vec<Event> {
        match event {
            Event::SessionCompleted { record, .. } => self.on_completed(record, settings),
            _ => Vec::new(),
        }
    }

    fn on_completed(&self, record: &Session, settings: &TimerSettings) -> Vec<Event> {
        let mut sessions: Vec<Session> = self.store.load(keys::SESSIONS);
        sessions.push(record.clone());
        if let Err(err) = self.store.save(keys::SESSIONS, &sessions) {
            warn!(%err, "failed to persist session log, continuing");
        }

        if record.completed && record.kind == SessionKind::Focus {
            if let Some(task_id) = &record.task_id {
                self.credit_task(task_id);
            }
        }

        let previous: Vec<Achievement> = self.store.load(keys::ACHIEVEMENTS);
        let (updated, unlocked) =
            achievements::evaluate(&sessions, settings, &previous, Utc::now());
        if let Err(err) = self.store.save(keys::ACHIEVEMENTS, &updated) {
            warn!(%err, "failed to persist achievements");
        }
        let mut follow_ups = Vec::with_capacity(unlocked.len());
        for achievement in &unlocked {
            self.notifier.notify(
                "Achievement unlocked!",
                &format!(
                    "{} {}: {}",
                    achievement.icon, achievement.title, achievement.description
                ),
            );
            follow_ups.push(Event::AchievementUnlocked {
                id: achievement.id.clone(),
                title: achievement.title.clone(),
                at: achievement.unlocked_at.unwrap_or_else(Utc::now),
            });
        }

        self.notifier
            .notify("Session complete", &completion_message(record));
        if settings.sound_enabled {
            self.notifier.play_sound();
        }
        follow_ups
    }

    /// Exactly one pomodoro per completed bound focus session.
    fn credit_task(&self, task_id: &str) {
        let mut tasks: Vec<Task> = self.store.load(keys::TASKS);
        if task::record_pomodoro(&mut tasks, task_id) {
            if let Err(err) = self.store.save(keys::TASKS, &tasks) {
                warn!(%err, task_id, "failed to persist task progress");
            }
        } else {
            debug!(task_id, "bound task no longer exists, skipping credit");
        }
    }
}

fn completion_message(record: &Session) -> String {
    match record.kind {
        SessionKind::Focus if record.completed_early => {
            let saved = record.time_saved_secs;
            format!(
                "Activity finished early! You saved {}:{:02}",
                saved / 60,
                saved % 60
            )
        }
        SessionKind::Focus => "Time for a break!".to_string(),
        SessionKind::ShortBreak => "Break over. Time to focus!".to_string(),
        SessionKind::LongBreak => "Long break over. New cycle!".to_string(),
    }
}
