//! Session bootstrap shared by every command that talks to the service.

use crate::api::AvatarClient;
use crate::libs::config::Config;
use crate::libs::identity::IdentityCache;
use crate::libs::messages::Message;
use crate::libs::store::{Connection, Store};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_debug, msg_error, msg_success};
use anyhow::Result;
use std::time::Instant;

/// Builds the store from configuration and connects it.
///
/// A connection failure is fatal for the session: the blocking message is
/// printed and an error returned so the process exits.
pub async fn open() -> Result<Store<AvatarClient>> {
    let config = Config::read()?;
    let client = AvatarClient::new(&config.api_config())?;
    msg_debug!(Message::ConnectingToBackend(client.base_url().to_string()));

    let mut store = Store::new(client, IdentityCache::new()?, config.profile());
    match store.connect().await {
        Ok(connection) => {
            if let Some(user) = store.user() {
                match connection {
                    Connection::Created => msg_success!(Message::UserCreated(user.name.clone())),
                    Connection::Restored => msg_debug!(Message::WelcomeBack(user.name.clone())),
                }
            }
            show_notice(&store);
            Ok(store)
        }
        Err(e) => {
            tracing::error!("failed to open session: {}", e);
            msg_error!(Message::ConnectionFailed);
            msg_bail_anyhow!(Message::ReloadRequired)
        }
    }
}

/// Prints the store's notice if it is still active.
pub fn show_notice(store: &Store<AvatarClient>) {
    if let Some(notice) = store.notice(Instant::now()) {
        View::notice(notice);
    }
}
