//! # Focusloop Core Library
//!
//! This library provides the core business logic for the Focusloop Pomodoro
//! timer. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI is a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine that requires the caller
//!   to invoke `tick()` once per second -- no internal threads
//! - **Store**: SQLite-backed key-value persistence for settings, tasks,
//!   the session log, achievements, and the timer snapshot
//! - **Achievements**: pure re-evaluation of unlock progress over the full
//!   session log
//! - **Stats**: pure period-filtered aggregation of the session log
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Session lifecycle state machine
//! - [`TimerRunner`]: Wires the engine to the store and notifier
//! - [`Store`]: Key-value persistence seam
//! - [`Notifier`]: Notification/audio capability seam

pub mod achievements;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod settings;
pub mod stats;
pub mod store;
pub mod task;
pub mod timer;

pub use achievements::{evaluate, Achievement};
pub use error::{CoreError, Result, StoreError};
pub use events::Event;
pub use notify::{Notifier, NullNotifier};
pub use session::{Session, SessionKind};
pub use settings::TimerSettings;
pub use stats::{aggregate, Period, StreakInfo, Summary};
pub use store::{MemoryStore, SqliteStore, Store};
pub use task::Task;
pub use timer::{TimerEngine, TimerRunner, TimerSnapshot, TimerState};
