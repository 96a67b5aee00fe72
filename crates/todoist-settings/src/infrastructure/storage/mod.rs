//! Storage infrastructure: settings file and API token persistence.
//!
//! This module is a thin adapter between the application and the host's
//! file storage:
//!
//! - **`host`**          – The [`host::HostStorage`] capability and its
//!   `tokio::fs` implementation.
//! - **`layout`**        – Where the settings file and token file live in a vault.
//! - **`settings_file`** – Reads the settings file at startup (merging onto the
//!   defaults) and writes it after every change.
//! - **`token`**         – Reads and writes the API token file, which is kept
//!   out of the settings record entirely.
//!
//! The settings file and the token file are disjoint; nothing here keeps
//! them consistent with each other.

pub mod host;
pub mod layout;
pub mod settings_file;
pub mod token;
