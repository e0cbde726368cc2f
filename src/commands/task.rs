use super::session;
use crate::libs::form::TaskForm;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    #[command(about = "Create a task")]
    Add {
        /// Task title
        title: String,
        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,
        /// XP reward (5-100); anything that is not a number becomes 10
        #[arg(short, long, default_value = "10")]
        xp: String,
    },
    #[command(about = "List tasks")]
    List,
}

pub async fn cmd(task_args: TaskArgs) -> Result<()> {
    match task_args.command {
        TaskCommand::Add { title, description, xp } => {
            let form = TaskForm::new(&title, &description, &xp);
            let Some(new_task) = form.submit() else {
                msg_bail_anyhow!(Message::TaskTitleRequired);
            };

            let mut store = session::open().await?;
            store.create_task(new_task).await?;
            session::show_notice(&store);
            View::tasks(store.tasks());
        }
        TaskCommand::List => {
            let store = session::open().await?;
            View::tasks(store.tasks());
        }
    }
    Ok(())
}
