use chrono::Utc;
use clap::Subcommand;

use focusloop_core::store::{keys, Store};
use focusloop_core::{aggregate, Period, Session, Task};

use super::open_runner;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Period-filtered summary of the session log
    Summary {
        /// day = since local midnight, week = last 7 days, month = last month
        #[arg(long, value_enum, default_value = "week")]
        period: PeriodArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum PeriodArg {
    Day,
    Week,
    Month,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Day => Period::Day,
            PeriodArg::Week => Period::Week,
            PeriodArg::Month => Period::Month,
        }
    }
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let runner = open_runner()?;
    let store = runner.store();

    match action {
        StatsAction::Summary { period } => {
            let sessions: Vec<Session> = store.load(keys::SESSIONS);
            let tasks: Vec<Task> = store.load(keys::TASKS);
            let summary = aggregate(&sessions, &tasks, period.into(), Utc::now());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
