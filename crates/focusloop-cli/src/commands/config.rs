use clap::Subcommand;

use focusloop_core::store::{keys, Store};
use focusloop_core::TimerSettings;

use super::open_runner;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings as JSON
    Show,
    /// Update settings; out-of-range values are clamped, not rejected
    Set {
        /// Focus duration in minutes
        #[arg(long)]
        focus: Option<u32>,
        /// Short break duration in minutes
        #[arg(long)]
        short_break: Option<u32>,
        /// Long break duration in minutes
        #[arg(long)]
        long_break: Option<u32>,
        /// Focus cycles between long breaks
        #[arg(long)]
        interval: Option<u32>,
        /// Daily goal in completed focus sessions
        #[arg(long)]
        daily_goal: Option<u32>,
        /// Completion sound on/off
        #[arg(long)]
        sound: Option<bool>,
        /// Ambient soundscape name, "none" to disable
        #[arg(long)]
        ambient_sound: Option<String>,
        /// Auto-start breaks after a focus session
        #[arg(long)]
        auto_start_breaks: Option<bool>,
        /// Auto-start focus after a break
        #[arg(long)]
        auto_start_focus: Option<bool>,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let runner = open_runner()?;
    let store = runner.store();
    let mut settings: TimerSettings = runner.settings();

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Set {
            focus,
            short_break,
            long_break,
            interval,
            daily_goal,
            sound,
            ambient_sound,
            auto_start_breaks,
            auto_start_focus,
        } => {
            if let Some(v) = focus {
                settings.focus_minutes = v;
            }
            if let Some(v) = short_break {
                settings.short_break_minutes = v;
            }
            if let Some(v) = long_break {
                settings.long_break_minutes = v;
            }
            if let Some(v) = interval {
                settings.long_break_interval = v;
            }
            if let Some(v) = daily_goal {
                settings.daily_goal = v;
            }
            if let Some(v) = sound {
                settings.sound_enabled = v;
            }
            if let Some(v) = ambient_sound {
                settings.ambient_sound = v;
            }
            if let Some(v) = auto_start_breaks {
                settings.auto_start_breaks = v;
            }
            if let Some(v) = auto_start_focus {
                settings.auto_start_focus = v;
            }
            settings.clamp();
            store.save(keys::SETTINGS, &settings)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
