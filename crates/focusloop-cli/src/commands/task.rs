use clap::Subcommand;

use focusloop_core::store::{keys, Store};
use focusloop_core::Task;

use super::open_runner;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a task
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Estimated pomodoros
        #[arg(long, default_value = "1")]
        pomodoros: u32,
    },
    /// List all tasks as JSON
    List,
    /// Toggle a task's completed flag
    Done { id: String },
    /// Delete a task
    Remove { id: String },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let runner = open_runner()?;
    let store = runner.store();
    let mut tasks: Vec<Task> = store.load(keys::TASKS);

    match action {
        TaskAction::Add {
            title,
            description,
            pomodoros,
        } => {
            let task = Task::new(title, description, pomodoros);
            println!("{}", serde_json::to_string_pretty(&task)?);
            tasks.push(task);
            store.save(keys::TASKS, &tasks)?;
        }
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Done { id } => {
            let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
                return Err(format!("no task with id {id}").into());
            };
            task.completed = !task.completed;
            println!("{}", serde_json::to_string_pretty(task)?);
            store.save(keys::TASKS, &tasks)?;
        }
        TaskAction::Remove { id } => {
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(format!("no task with id {id}").into());
            }
            store.save(keys::TASKS, &tasks)?;
            println!("{{\"removed\": \"{id}\"}}");
        }
    }
    Ok(())
}
