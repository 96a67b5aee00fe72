//! Infrastructure layer for the settings crate.
//!
//! Contains host-facing adapters: file storage for the settings record and
//! the API token, and the logging backend.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `todoist_settings_core`, but MUST NOT be imported by the `application`
//! layer.

pub mod logging;
pub mod storage;
