//! Session lifecycle: the tick-driven state machine and the runner that
//! wires it to the store and notifier.

mod engine;
mod runner;

pub use engine::{TimerEngine, TimerSnapshot, TimerState, AUTO_START_DELAY_SECS};
pub use runner::TimerRunner;
