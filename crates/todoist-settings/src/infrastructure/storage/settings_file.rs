//! Settings file persistence.
//!
//! [`FileSettingsRepository`] is the only writer of the settings file.  It
//! implements the application's [`SettingsRepository`] port on top of
//! [`HostStorage`].
//!
//! # File format
//!
//! The format follows the file extension:
//!
//! - `.toml` – pretty-printed TOML.
//! - anything else (normally `data.json`) – pretty-printed JSON, the format
//!   the host uses for plugin data.
//!
//! Either way the keys are the camelCase field names of
//! [`Settings`](todoist_settings_core::Settings), e.g.:
//!
//! ```json
//! {
//!   "fadeToggle": true,
//!   "autoRefreshToggle": false,
//!   "autoRefreshInterval": 60,
//!   ...
//! }
//! ```
//!
//! # Loading never fails
//!
//! A missing file is the first-run case and yields the defaults.  An
//! unreadable or unparsable file is logged and also yields the defaults;
//! the next successful save replaces it.  Fields are merged one by one (see
//! [`merge`]), so a file from an older version keeps whatever it does contain.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use todoist_settings_core::{merge, Settings, SettingsOverrides};
use tracing::{debug, info, warn};

use super::host::{HostStorage, StorageError};
use crate::application::update_settings::{PersistError, SettingsRepository};

/// Serialization format of the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    /// Picks the format from the file extension; JSON unless it is `.toml`.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => SettingsFormat::Toml,
            _ => SettingsFormat::Json,
        }
    }

    /// Serializes the full record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] if the serializer rejects the record.
    pub fn encode(self, settings: &Settings) -> Result<String, StorageError> {
        match self {
            SettingsFormat::Json => serde_json::to_string_pretty(settings)
                .map_err(|e| StorageError::Encode(e.to_string())),
            SettingsFormat::Toml => {
                toml::to_string_pretty(settings).map_err(|e| StorageError::Encode(e.to_string()))
            }
        }
    }

    /// Parses persisted text into per-field overrides.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse failure when the text is not a
    /// JSON object / TOML table at all.  Individual bad fields are not errors.
    pub fn decode(self, text: &str) -> Result<SettingsOverrides, String> {
        match self {
            SettingsFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            SettingsFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// Reads and writes the settings record through [`HostStorage`].
pub struct FileSettingsRepository {
    storage: Arc<dyn HostStorage>,
    path: PathBuf,
    format: SettingsFormat,
}

impl FileSettingsRepository {
    /// Repository for the file at `path`; the format follows its extension.
    pub fn new(storage: Arc<dyn HostStorage>, path: PathBuf) -> Self {
        let format = SettingsFormat::for_path(&path);
        Self {
            storage,
            path,
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SettingsFormat {
        self.format
    }

    /// Reads the persisted overrides, treating absent or unreadable data as empty.
    pub async fn load_overrides(&self) -> SettingsOverrides {
        let text = match self.storage.read(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no settings file at {}; using defaults", self.path.display());
                return SettingsOverrides::default();
            }
            Err(e) => {
                warn!("could not read settings file {}: {e}; using defaults", self.path.display());
                return SettingsOverrides::default();
            }
        };

        if text.trim().is_empty() {
            return SettingsOverrides::default();
        }

        match self.format.decode(&text) {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!("could not parse settings file {}: {e}; using defaults", self.path.display());
                SettingsOverrides::default()
            }
        }
    }

    /// Writes `settings` in this repository's format.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] or [`StorageError::Io`].
    pub async fn write(&self, settings: &Settings) -> Result<(), StorageError> {
        let content = self.format.encode(settings)?;
        self.storage
            .write(&self.path, &content)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl SettingsRepository for FileSettingsRepository {
    async fn load(&self) -> Settings {
        let overrides = self.load_overrides().await;
        debug!("loaded settings overrides: {overrides:?}");
        merge(Settings::default(), overrides)
    }

    async fn save(&self, settings: &Settings) -> Result<(), PersistError> {
        self.write(settings)
            .await
            .map_err(|e| PersistError::Save(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
