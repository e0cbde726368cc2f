use super::{session, status::animation_clock};
use crate::libs::view::View;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AvatarArgs {
    /// Render as if the pointer hovers the avatar
    #[arg(long)]
    hover: bool,
    /// Animation time in seconds (defaults to the wall clock)
    #[arg(short, long)]
    time: Option<f32>,
    /// Print the scene description as JSON
    #[arg(long)]
    json: bool,
}

pub async fn cmd(args: AvatarArgs) -> Result<()> {
    let store = session::open().await?;
    let t = args.time.unwrap_or_else(animation_clock);

    if let Some(scene) = store.scene(t, args.hover) {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&scene)?);
        } else {
            View::avatar(&scene);
        }
    }
    Ok(())
}
