//! # todoist-settings-core
//!
//! Pure domain types for the Todoist plugin settings: the canonical
//! [`Settings`] record, its defaults and field constraints, the
//! default-merge used when loading persisted data, and the validator for
//! user-entered numeric text.
//!
//! This crate is shared by every consumer of the settings (the reactive store,
//! the persistence layer, and whatever renders the settings page).  It has no
//! dependencies on the file system, the async runtime, or the host
//! application.
//!
//! # Architecture overview (for beginners)
//!
//! The plugin keeps one settings record per vault.  The user edits it on a
//! settings page; the rest of the plugin (task rendering, auto-refresh)
//! reads it.  This crate defines:
//!
//! - **`domain`** – The `Settings` record itself, the partial
//!   `SettingsOverrides` read back from disk, the `merge` function that turns
//!   the latter into the former, and the `Toggle` catalogue of boolean
//!   switches.
//!
//! - **`input`** – Validation of raw text typed into the settings page
//!   before it is allowed anywhere near the record.

pub mod domain;
pub mod input;

pub use domain::overrides::{merge, SettingsOverrides};
pub use domain::settings::{Settings, SettingsError};
pub use domain::toggle::Toggle;
pub use input::numeric::{is_positive_integer, parse_positive_integer, to_int};
