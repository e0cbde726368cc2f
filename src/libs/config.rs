//! Configuration management for avatask.
//!
//! The configuration is a small JSON file in the application data directory
//! with two optional modules:
//!
//! - **API**: where the avatar productivity service lives and how long to wait for it
//! - **Profile**: the name and email used when the service creates a new user
//!
//! ## Backend URL Resolution
//!
//! 1. `AVATASK_BACKEND_URL` from the environment (a `.env` file is loaded at startup)
//! 2. `api.base_url` from the configuration file
//! 3. The default baked in at build time (`AVATASK_BACKEND_URL` during `cargo build`,
//!    otherwise `package.metadata.default_backend_url`)
//!
//! ```rust,no_run
//! use avatask::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("Talking to {}", config.api_config().base_url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the configured backend URL.
pub const BACKEND_URL_ENV: &str = "AVATASK_BACKEND_URL";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROFILE_NAME: &str = "Avatar Hero";
pub const DEFAULT_PROFILE_EMAIL: &str = "hero@avatask.local";

/// Module entry shown by the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Connection settings for the remote service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiConfig {
    /// Root URL of the service, without the `/api` suffix.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: APP_METADATA_DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Identity submitted when a new user is created on first run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileConfig {
    pub name: String,
    pub email: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            name: DEFAULT_PROFILE_NAME.to_string(),
            email: DEFAULT_PROFILE_EMAIL.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,
}

impl Config {
    /// Loads the configuration file, or the default when none exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Effective API settings after applying the environment override.
    pub fn api_config(&self) -> ApiConfig {
        let mut api = self.api.clone().unwrap_or_default();
        if let Ok(url) = env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                api.base_url = url.trim().to_string();
            }
        }
        api
    }

    pub fn profile(&self) -> ProfileConfig {
        self.profile.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard, starting from the stored values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "api".to_string(),
                name: Message::ConfigModuleApi.to_string(),
            },
            ConfigModule {
                key: "profile".to_string(),
                name: Message::ConfigModuleProfile.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "api" => {
                    let default = config.api.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleApi);
                    config.api = Some(ApiConfig {
                        base_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBackendUrl.to_string())
                            .default(default.base_url)
                            .interact_text()?,
                        timeout_secs: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRequestTimeout.to_string())
                            .default(default.timeout_secs)
                            .interact_text()?,
                    });
                }
                "profile" => {
                    let default = config.profile.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleProfile);
                    config.profile = Some(ProfileConfig {
                        name: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptProfileName.to_string())
                            .default(default.name)
                            .interact_text()?,
                        email: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptProfileEmail.to_string())
                            .default(default.email)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
