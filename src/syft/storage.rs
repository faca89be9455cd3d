//! Where the current session's user id lives.

use crate::syft::error::StorageError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};
use tracing::debug;

pub trait SessionStore: Send + Sync {
    /// # Errors
    /// Returns an error if the session cannot be read or holds no user id.
    fn user_id(&self) -> Result<String, StorageError>;
}

/// In-process session, mostly for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    user_id: RwLock<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: RwLock::new(Some(user_id.into())),
        }
    }

    pub fn set_user_id(&self, user_id: impl Into<String>) {
        let mut guard = self
            .user_id
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(user_id.into());
    }

    pub fn clear(&self) {
        let mut guard = self
            .user_id
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
    }
}

impl SessionStore for MemoryStore {
    fn user_id(&self) -> Result<String, StorageError> {
        self.user_id
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
            .ok_or(StorageError::MissingUserId)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Session persisted as a small JSON document.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    /// Returns an error if the file is missing, unreadable, or not a session document.
    pub fn load(&self) -> Result<Session, StorageError> {
        let contents = fs::read(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_slice(&contents).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Write `user_id` as the current session, creating parent directories.
    /// # Errors
    /// Returns an error if the file or its parent directory cannot be written.
    pub fn save(&self, user_id: &str) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let session = Session {
            user_id: Some(user_id.to_string()),
        };
        let contents =
            serde_json::to_vec_pretty(&session).map_err(|source| StorageError::Format {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, contents).map_err(io_error)?;

        debug!("session saved to {}", self.path.display());

        Ok(())
    }
}

impl SessionStore for FileStore {
    fn user_id(&self) -> Result<String, StorageError> {
        self.load()?.user_id.ok_or(StorageError::MissingUserId)
    }
}
