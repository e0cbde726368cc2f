//! Locally cached user identifier.
//!
//! The service creates a user once per installation. Its id is kept in the
//! data directory under [`USER_ID_FILE`] so later runs fetch the same user
//! instead of creating a new one.

use super::data_storage::DataStorage;
use anyhow::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const USER_ID_FILE: &str = "user_id";

#[derive(Debug, Clone)]
pub struct IdentityCache {
    path: PathBuf,
}

impl IdentityCache {
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: DataStorage::new().get_path(USER_ID_FILE)?,
        })
    }

    pub fn at(path: &Path) -> Self {
        Self { path: path.to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached id, or `None` when nothing (or only whitespace) is stored.
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let id = content.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn store(&self, user_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, user_id)?;
        Ok(())
    }

    /// Removes the cached id. Returns `false` if there was nothing to remove.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
