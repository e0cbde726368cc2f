use super::session;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task id, or an unambiguous prefix of it
    #[arg(required = true)]
    id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs) -> Result<()> {
    let mut store = session::open().await?;
    let Some(task) = store.find_task(&args.id).cloned() else {
        msg_bail_anyhow!(Message::TaskNotFoundWithId(args.id));
    };

    if !args.yes
        && !Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
            .default(false)
            .interact()?
    {
        return Ok(());
    }

    store.delete_task(&task.id).await?;
    session::show_notice(&store);
    View::tasks(store.tasks());
    Ok(())
}
