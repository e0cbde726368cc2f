use crate::api::{AvatarApi, AvatarClient};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_error, msg_success};
use anyhow::Result;

/// Pings the service without touching the session or the cached identity.
pub async fn cmd() -> Result<()> {
    let client = AvatarClient::new(&Config::read()?.api_config())?;
    match client.health().await {
        Ok(banner) => msg_success!(Message::BackendHealthy(banner)),
        Err(e) => {
            tracing::error!("health check against {} failed: {}", client.base_url(), e);
            msg_error!(Message::BackendUnreachable);
        }
    }
    Ok(())
}
