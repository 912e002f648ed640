use chrono::Utc;
use clap::Subcommand;

use focusloop_core::achievements::{evaluate, Achievement};
use focusloop_core::store::{keys, Store};
use focusloop_core::Session;

use super::open_runner;

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// Re-evaluate against the full log and print the current set
    List,
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let runner = open_runner()?;
    let store = runner.store();
    let settings = runner.settings();

    match action {
        AchievementsAction::List => {
            let sessions: Vec<Session> = store.load(keys::SESSIONS);
            let previous: Vec<Achievement> = store.load(keys::ACHIEVEMENTS);
            let (achievements, _) = evaluate(&sessions, &settings, &previous, Utc::now());
            store.save(keys::ACHIEVEMENTS, &achievements)?;
            println!("{}", serde_json::to_string_pretty(&achievements)?);
        }
    }
    Ok(())
}
