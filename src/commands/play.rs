//! Interactive session.
//!
//! Keeps one store alive and loops over a prompt menu: every action goes
//! through the store, and the screen is redrawn from the refreshed store
//! afterwards. Petting the avatar sets the hover flag for the next frame.

use super::session;
use crate::api::AvatarClient;
use crate::libs::form::TaskForm;
use crate::libs::messages::Message;
use crate::libs::store::Store;
use crate::libs::task::Task;
use crate::libs::view::{short_id, View};
use crate::{msg_info, msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
enum Action {
    AddTask,
    CompleteTask,
    DeleteTask,
    PetAvatar,
    Refresh,
    Quit,
}

impl Action {
    const ALL: [Action; 6] = [
        Action::AddTask,
        Action::CompleteTask,
        Action::DeleteTask,
        Action::PetAvatar,
        Action::Refresh,
        Action::Quit,
    ];

    fn label(&self) -> Message {
        match self {
            Action::AddTask => Message::ActionAddTask,
            Action::CompleteTask => Message::ActionCompleteTask,
            Action::DeleteTask => Message::ActionDeleteTask,
            Action::PetAvatar => Message::ActionPetAvatar,
            Action::Refresh => Message::ActionRefresh,
            Action::Quit => Message::ActionQuit,
        }
    }
}

pub async fn cmd() -> Result<()> {
    let mut store = session::open().await?;
    let started = Instant::now();
    let mut hovered = false;

    loop {
        render(&store, started, hovered);
        hovered = false;

        let labels: Vec<String> = Action::ALL.iter().map(|action| action.label().to_string()).collect();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectAction.to_string())
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[choice] {
            Action::AddTask => add_task(&mut store).await?,
            Action::CompleteTask => {
                let open: Vec<Task> = store.open_tasks().cloned().collect();
                if open.is_empty() {
                    msg_info!(Message::NoOpenTasks);
                    continue;
                }
                if let Some(task) = pick_task(&open)? {
                    store.complete_task(&task.id).await?;
                }
            }
            Action::DeleteTask => {
                let tasks = store.tasks().to_vec();
                if tasks.is_empty() {
                    msg_info!(Message::NoTasks);
                    continue;
                }
                if let Some(task) = pick_task(&tasks)? {
                    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
                        .default(false)
                        .interact()?;
                    if confirmed {
                        store.delete_task(&task.id).await?;
                    }
                }
            }
            Action::PetAvatar => {
                hovered = true;
                msg_print!(Message::AvatarPetted);
            }
            Action::Refresh => store.refresh_all().await,
            Action::Quit => {
                msg_print!(Message::Goodbye);
                return Ok(());
            }
        }
    }
}

fn render(store: &Store<AvatarClient>, started: Instant, hovered: bool) {
    if let Some(user) = store.user() {
        View::status(user);
    }
    if let Some(scene) = store.scene(started.elapsed().as_secs_f32(), hovered) {
        View::avatar(&scene);
    }
    View::tasks(store.tasks());
    session::show_notice(store);
}

async fn add_task(store: &mut Store<AvatarClient>) -> Result<()> {
    let form = TaskForm::new(
        &Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskTitle.to_string())
            .allow_empty(true)
            .interact_text()?,
        &Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskDescription.to_string())
            .allow_empty(true)
            .interact_text()?,
        &Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskXp.to_string())
            .default("10".to_string())
            .interact_text()?,
    );

    match form.submit() {
        Some(new_task) => {
            store.create_task(new_task).await?;
        }
        None => msg_warning!(Message::TaskTitleRequired),
    }
    Ok(())
}

fn pick_task(tasks: &[Task]) -> Result<Option<Task>> {
    let items: Vec<String> = tasks
        .iter()
        .map(|task| format!("[{}] {} (+{} XP)", short_id(&task.id), task.title, task.xp_reward))
        .collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectTask.to_string())
        .items(&items)
        .interact_opt()?;
    Ok(selection.map(|index| tasks[index].clone()))
}
