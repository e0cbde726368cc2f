use super::session;
use crate::libs::view::View;
use anyhow::Result;
use chrono::Local;

/// Shows the user's level, XP progress, mood and the avatar.
pub async fn cmd() -> Result<()> {
    let store = session::open().await?;

    if let Some(user) = store.user() {
        View::status(user);
    }
    if let Some(scene) = store.scene(animation_clock(), false) {
        View::avatar(&scene);
    }

    Ok(())
}

/// Seconds into the current minute, used as the animation time for one-shot renders.
pub fn animation_clock() -> f32 {
    (Local::now().timestamp_millis() % 60_000) as f32 / 1000.0
}
