use clap::Subcommand;
use std::time::Duration;

use focusloop_core::{Event, TimerState};

use super::open_runner;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the current session (or resume from paused)
    Start {
        /// Bind the focus session to a task id
        #[arg(long)]
        task: Option<String>,
    },
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Complete the focus session early, banking the time saved
    Complete,
    /// Reset to idle focus at cycle 0 (logs nothing)
    Reset,
    /// Attach a feedback rating while paused during focus
    Rate {
        /// Mood rating, 1-5
        #[arg(long)]
        mood: Option<u8>,
        /// Productivity rating, 1-5
        #[arg(long)]
        productivity: Option<u8>,
    },
    /// Print current timer state as JSON
    Status,
    /// Run the timer in the foreground, one tick per second
    Run,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let runner = open_runner()?;
    let settings = runner.settings();
    let mut engine = runner.load_engine(&settings);

    match action {
        TimerAction::Start { task } => {
            if let Some(task_id) = task {
                if !engine.bind_task(Some(task_id)) {
                    eprintln!("task binding is only possible while idle before a focus session");
                }
            }
            match engine.start(&settings) {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("{}", serde_json::to_string_pretty(&engine.status_event())?),
            }
        }
        TimerAction::Pause => match engine.pause() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.status_event())?),
        },
        TimerAction::Resume => match engine.start(&settings) {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&engine.status_event())?),
        },
        TimerAction::Complete => match engine.complete_early(&settings) {
            Some(event) => {
                let follow_ups = runner.handle_event(&event, &settings);
                println!("{}", serde_json::to_string_pretty(&event)?);
                for follow_up in follow_ups {
                    println!("{}", serde_json::to_string_pretty(&follow_up)?);
                }
            }
            None => {
                eprintln!("early completion is only valid for a running or paused focus session");
                println!("{}", serde_json::to_string_pretty(&engine.status_event())?);
            }
        },
        TimerAction::Reset => {
            let event = engine.reset(&settings);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Rate { mood, productivity } => {
            let mut accepted = true;
            if let Some(rating) = mood {
                accepted &= engine.rate_mood(rating);
            }
            if let Some(rating) = productivity {
                accepted &= engine.rate_productivity(rating);
            }
            if !accepted {
                eprintln!("ratings are 1-5 and only accepted while a focus session is paused");
            }
            println!("{}", serde_json::to_string_pretty(&engine.status_event())?);
        }
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.status_event())?);
        }
        TimerAction::Run => {
            run_foreground(&runner, &mut engine)?;
        }
    }

    runner.save_engine(&engine);
    Ok(())
}

/// Foreground loop: deliver one tick per second until the session (and any
/// auto-advanced successors) stop running. Ctrl-C leaves the snapshot in
/// whatever state the last tick produced.
fn run_foreground<S, N>(
    runner: &focusloop_core::TimerRunner<S, N>,
    engine: &mut focusloop_core::TimerEngine,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: focusloop_core::Store,
    N: focusloop_core::Notifier,
{
    let settings = runner.settings();
    if engine.state() == TimerState::Idle {
        if let Some(event) = engine.start(&settings) {
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    rt.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await; // First tick fires immediately; skip it.
        loop {
            interval.tick().await;
            if let Some(event) = engine.tick(&settings) {
                let follow_ups = runner.handle_event(&event, &settings);
                println!("{}", serde_json::to_string_pretty(&event)?);
                for follow_up in follow_ups {
                    println!("{}", serde_json::to_string_pretty(&follow_up)?);
                }
                if let Event::SessionCompleted {
                    auto_start_in_secs: None,
                    ..
                } = event
                {
                    break;
                }
            }
            runner.save_engine(engine);
            if engine.state() == TimerState::Idle && engine.auto_start_in().is_none() {
                break;
            }
        }
        Ok::<_, serde_json::Error>(())
    })?;
    Ok(())
}
