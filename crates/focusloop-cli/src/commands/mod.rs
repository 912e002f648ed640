pub mod achievements;
pub mod config;
pub mod stats;
pub mod task;
pub mod timer;

use focusloop_core::{Notifier, SqliteStore, TimerRunner};

/// Console notifier: a stderr line plus the terminal bell for sound.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) {
        eprintln!("\u{1F514} {title}: {body}");
    }

    fn play_sound(&self) {
        eprint!("\x07");
    }
}

/// Runner wired to the on-disk store and the console notifier.
pub fn open_runner() -> Result<TimerRunner<SqliteStore, ConsoleNotifier>, Box<dyn std::error::Error>>
{
    let store = SqliteStore::open()?;
    Ok(TimerRunner::new(store, ConsoleNotifier))
}
