pub mod avatar;
pub mod complete;
pub mod delete;
pub mod health;
pub mod init;
pub mod play;
pub mod session;
pub mod status;
pub mod task;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the backend and your profile")]
    Init(init::InitArgs),
    #[command(about = "Show level, XP progress and the avatar")]
    Status,
    #[command(about = "Create or list tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Complete a task and collect its XP")]
    Complete(complete::CompleteArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Render the avatar scene")]
    Avatar(avatar::AvatarArgs),
    #[command(about = "Check that the backend is reachable")]
    Health,
    #[command(about = "Start an interactive session")]
    Play,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> anyhow::Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Status => status::cmd().await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Complete(args) => complete::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::Avatar(args) => avatar::cmd(args).await,
            Commands::Health => health::cmd().await,
            Commands::Play => play::cmd().await,
        }
    }
}
