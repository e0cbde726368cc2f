//! Configuration command.
//!
//! Runs the interactive setup wizard, or with `--reset` forgets the cached
//! user so the next session creates a fresh one.

use crate::{
    libs::{config::Config, identity::IdentityCache, messages::Message},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the cached user identity instead of running the setup wizard
    #[arg(short, long)]
    reset: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.reset {
        match IdentityCache::new().and_then(|cache| cache.clear()) {
            Ok(_) => msg_info!(Message::IdentityCleared),
            Err(e) => msg_error!(Message::IdentityClearFailed(e.to_string())),
        }
        return Ok(());
    }

    Config::init()?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
