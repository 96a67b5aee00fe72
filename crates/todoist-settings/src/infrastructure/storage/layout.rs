//! Where the plugin's files live inside a vault.
//!
//! ```text
//! <vault root>/
//!  └─ .obsidian/                       ← host config directory
//!      ├─ todoist-token                ← API token (TokenStore)
//!      └─ plugins/
//!          └─ todoist-sync-plugin/
//!              └─ data.json            ← settings record (FileSettingsRepository)
//! ```
//!
//! The token deliberately sits outside the plugin directory: reinstalling or
//! resetting the plugin replaces `data.json` but leaves the token alone.

use std::path::{Path, PathBuf};

/// Default name of the host's per-vault configuration directory.
pub const DEFAULT_CONFIG_DIR: &str = ".obsidian";
/// Default plugin identifier (directory name under `plugins/`).
pub const DEFAULT_PLUGIN_ID: &str = "todoist-sync-plugin";
/// Default settings file name inside the plugin directory.
pub const DEFAULT_SETTINGS_FILE: &str = "data.json";
/// Token file name inside the config directory.
pub const TOKEN_FILE: &str = "todoist-token";

/// Resolves the settings and token paths for one vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLayout {
    root: PathBuf,
    config_dir: String,
    plugin_id: String,
    settings_file: String,
}

impl VaultLayout {
    /// Layout for the vault at `root` using the default names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_dir: DEFAULT_CONFIG_DIR.to_string(),
            plugin_id: DEFAULT_PLUGIN_ID.to_string(),
            settings_file: DEFAULT_SETTINGS_FILE.to_string(),
        }
    }

    /// Overrides the config directory name (hosts allow renaming `.obsidian`).
    pub fn with_config_dir(mut self, name: impl Into<String>) -> Self {
        self.config_dir = name.into();
        self
    }

    pub fn with_plugin_id(mut self, id: impl Into<String>) -> Self {
        self.plugin_id = id.into();
        self
    }

    /// Overrides the settings file name.  A `.toml` name switches the format.
    pub fn with_settings_file_name(mut self, name: impl Into<String>) -> Self {
        self.settings_file = name.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<config dir>`
    pub fn config_path(&self) -> PathBuf {
        self.root.join(&self.config_dir)
    }

    /// `<root>/<config dir>/plugins/<plugin id>`
    pub fn plugin_path(&self) -> PathBuf {
        self.config_path().join("plugins").join(&self.plugin_id)
    }

    /// Full path of the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.plugin_path().join(&self.settings_file)
    }

    /// Full path of the API token file.
    pub fn token_path(&self) -> PathBuf {
        self.config_path().join(TOKEN_FILE)
    }
}
