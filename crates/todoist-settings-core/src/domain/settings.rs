//! The canonical settings record.
//!
//! [`Settings`] is the single source of truth for how the plugin renders task
//! lists and how often queries refresh.  Every field is required and has a
//! documented default; see [`Settings::default`].
//!
//! # Field constraints
//!
//! Two fields carry constraints beyond their type:
//!
//! | field                  | constraint               |
//! |------------------------|--------------------------|
//! | `auto_refresh_interval`| at least 1 second        |
//! | `appended_date_format` | non-empty after trimming |
//!
//! [`Settings::validate`] checks both.  The store never publishes, and the
//! persistence layer never writes, a record that fails validation.
//!
//! # Serialized form
//!
//! Keys are camelCase (`autoRefreshInterval`, `renderDateIcon`, ...) to match
//! the plugin data file the host has always written.  The API token is NOT a
//! field of this record: it lives in its own file so it never appears in a
//! settings export.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default auto-refresh interval in seconds.
pub const DEFAULT_AUTO_REFRESH_INTERVAL: u32 = 60;

/// Default Moment.js-style format for the appended task date.
pub const DEFAULT_APPENDED_DATE_FORMAT: &str = "M/D/YY";

/// Error returned when a settings record violates a field constraint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// `auto_refresh_interval` must be a positive number of seconds.
    #[error("auto-refresh interval must be at least 1 second, got {0}")]
    InvalidAutoRefreshInterval(u32),

    /// `appended_date_format` must contain something other than whitespace.
    #[error("appended date format must not be empty")]
    EmptyAppendedDateFormat,
}

/// Plugin settings persisted per vault.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Fade tasks in and out when they are added or removed.
    pub fade_toggle: bool,

    /// Re-run queries on a timer.
    pub auto_refresh_toggle: bool,
    /// Seconds between automatic refreshes.  Always `>= 1`.
    pub auto_refresh_interval: u32,

    /// Render the list name heading above the tasks.
    pub render_heading: bool,

    /// Render task descriptions.
    pub render_description: bool,

    pub render_date: bool,
    pub render_date_icon: bool,
    /// Append the due date to the task name.
    pub render_append_date: bool,
    /// Format for the appended date.  Never blank.
    pub appended_date_format: String,

    /// Render project and section names.
    pub render_project: bool,
    pub render_project_icon: bool,

    pub render_labels: bool,
    pub render_labels_icon: bool,

    /// Log at `debug` level instead of `info`.
    pub debug_logging: bool,
}

impl Default for Settings {
    /// The settings a fresh vault starts with.
    ///
    /// | Field                  | Default    |
    /// |------------------------|------------|
    /// | fade_toggle            | `true`     |
    /// | auto_refresh_toggle    | `false`    |
    /// | auto_refresh_interval  | `60`       |
    /// | render_heading         | `true`     |
    /// | render_description     | `true`     |
    /// | render_date            | `true`     |
    /// | render_date_icon       | `true`     |
    /// | render_append_date     | `false`    |
    /// | appended_date_format   | `"M/D/YY"` |
    /// | render_project         | `true`     |
    /// | render_project_icon    | `true`     |
    /// | render_labels          | `true`     |
    /// | render_labels_icon     | `true`     |
    /// | debug_logging          | `false`    |
    fn default() -> Self {
        Self {
            fade_toggle: true,
            auto_refresh_toggle: false,
            auto_refresh_interval: DEFAULT_AUTO_REFRESH_INTERVAL,
            render_heading: true,
            render_description: true,
            render_date: true,
            render_date_icon: true,
            render_append_date: false,
            appended_date_format: DEFAULT_APPENDED_DATE_FORMAT.to_string(),
            render_project: true,
            render_project_icon: true,
            render_labels: true,
            render_labels_icon: true,
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Checks every field constraint.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] found, checking the interval first.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_auto_refresh_interval(self.auto_refresh_interval)?;
        validate_appended_date_format(&self.appended_date_format)?;
        Ok(())
    }
}

pub(crate) fn validate_auto_refresh_interval(seconds: u32) -> Result<(), SettingsError> {
    if seconds == 0 {
        return Err(SettingsError::InvalidAutoRefreshInterval(seconds));
    }
    Ok(())
}

pub(crate) fn validate_appended_date_format(format: &str) -> Result<(), SettingsError> {
    if format.trim().is_empty() {
        return Err(SettingsError::EmptyAppendedDateFormat);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
