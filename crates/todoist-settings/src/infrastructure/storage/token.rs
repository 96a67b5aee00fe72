//! API token storage.
//!
//! The Todoist API token is a secret and is kept apart from the settings
//! record on purpose:
//!
//! - It lives in its own file (see
//!   [`VaultLayout::token_path`](super::layout::VaultLayout::token_path)),
//!   outside the plugin directory, so it never appears in `data.json`.
//! - It is not part of the default-merge, so a settings schema change can
//!   never reset it.
//! - It is not in the reactive store; nothing subscribes to it.
//!
//! The token is opaque: it is written and read back byte-for-byte with no
//! validation, trimming, or encryption.  A missing file means "no token
//! configured yet" and is reported as `Ok(None)`, not as an error.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::host::{HostStorage, StorageError};

/// Reads and writes the API token file.
pub struct TokenStore {
    storage: Arc<dyn HostStorage>,
    path: PathBuf,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn HostStorage>, path: PathBuf) -> Self {
        Self { storage, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token, or `None` if no token file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] for any read failure other than "not found".
    pub async fn read_token(&self) -> Result<Option<String>, StorageError> {
        match self.storage.read(&self.path).await {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no API token file at {}", self.path.display());
                Ok(None)
            }
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Overwrites the token file with `token`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the write fails.
    pub async fn write_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage
            .write(&self.path, token)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!("API token written to {}", self.path.display());
        Ok(())
    }
}
