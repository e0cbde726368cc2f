use super::session;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct CompleteArgs {
    /// Task id, or an unambiguous prefix of it
    #[arg(required = true)]
    id: String,
}

/// Completes a task. XP, level and mood shown afterwards come from the server response only.
pub async fn cmd(args: CompleteArgs) -> Result<()> {
    let mut store = session::open().await?;
    let Some(task_id) = store.find_task(&args.id).map(|task| task.id.clone()) else {
        msg_bail_anyhow!(Message::TaskNotFoundWithId(args.id));
    };

    let completion = store.complete_task(&task_id).await?;
    session::show_notice(&store);
    if let Some(text) = completion.and_then(|completion| completion.ai_message) {
        msg_print!(Message::AvatarSays(text));
    }

    if let Some(user) = store.user() {
        View::status(user);
    }
    View::tasks(store.tasks());
    Ok(())
}
