//! SettingsForm: turns raw settings-page input into settings changes.
//!
//! The settings page hands over exactly what the user typed or clicked.  This
//! module decides whether that input becomes a commit:
//!
//! | input                      | empty / blank | valid                 | invalid                 |
//! |----------------------------|---------------|-----------------------|-------------------------|
//! | auto-refresh interval text | `Unchanged`   | `Committed(save)`     | `Rejected { restore }`  |
//! | appended date format text  | `Unchanged`   | `Committed(save)`     | (cannot happen)         |
//! | toggle switch              | n/a           | `Committed(save)`     | n/a                     |
//!
//! A rejection is purely corrective: the page puts `restore` back into the
//! text field.  Nothing is logged and no error is raised.

use std::sync::Arc;

use todoist_settings_core::{parse_positive_integer, Toggle};

use super::update_settings::{PendingSave, SettingsService};

/// Result of submitting one field.
#[derive(Debug)]
#[must_use]
pub enum FieldOutcome {
    /// Input was blank; the stored value is kept and nothing is saved.
    Unchanged,
    /// The change was committed; the save is in flight.
    Committed(PendingSave),
    /// Input was malformed; show `restore` (the last-known-good value) instead.
    Rejected { restore: String },
}

/// Input boundary between the settings page and [`SettingsService`].
pub struct SettingsForm {
    service: Arc<SettingsService>,
}

impl SettingsForm {
    pub fn new(service: Arc<SettingsService>) -> Self {
        Self { service }
    }

    /// Text the interval field should currently display.
    pub fn auto_refresh_interval_text(&self) -> String {
        self.service.current().auto_refresh_interval.to_string()
    }

    /// Handles text typed into the auto-refresh interval field.
    ///
    /// The interval is a `u32`, so a digit string larger than `u32::MAX`
    /// (e.g. `"99999999999"`) is rejected like any other invalid input, even
    /// though it passes [`is_positive_integer`](todoist_settings_core::is_positive_integer).
    pub fn submit_auto_refresh_interval(&self, text: &str) -> FieldOutcome {
        let text = text.trim();
        if text.is_empty() {
            return FieldOutcome::Unchanged;
        }

        let Some(seconds) = parse_positive_integer(text) else {
            return FieldOutcome::Rejected {
                restore: self.auto_refresh_interval_text(),
            };
        };

        match self
            .service
            .write_options(|s| s.auto_refresh_interval = seconds)
        {
            Ok(save) => FieldOutcome::Committed(save),
            Err(_) => FieldOutcome::Rejected {
                restore: self.auto_refresh_interval_text(),
            },
        }
    }

    /// Handles text typed into the appended date format field.
    ///
    /// The trimmed text is stored as-is; format syntax is not checked.
    pub fn submit_appended_date_format(&self, text: &str) -> FieldOutcome {
        let text = text.trim();
        if text.is_empty() {
            return FieldOutcome::Unchanged;
        }

        let format = text.to_string();
        match self.service.write_options(|s| s.appended_date_format = format) {
            Ok(save) => FieldOutcome::Committed(save),
            Err(_) => FieldOutcome::Rejected {
                restore: self.service.current().appended_date_format.clone(),
            },
        }
    }

    /// Handles a switch being flipped.
    pub fn set_toggle(&self, toggle: Toggle, value: bool) -> FieldOutcome {
        match self.service.write_options(|s| toggle.set(s, value)) {
            Ok(save) => FieldOutcome::Committed(save),
            // Toggles carry no constraint, so the current record stays valid.
            Err(_) => FieldOutcome::Unchanged,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
