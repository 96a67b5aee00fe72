//! Application layer: the reactive store and the settings use cases.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (the `Settings` record in `todoist-settings-core`) and the infrastructure
//! (files on disk, the logging backend).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain objects to fulfil a user goal (e.g., "change the
//!   auto-refresh interval and make sure it survives a restart").
//! - **Depends on abstractions** such as [`update_settings::SettingsRepository`]
//!   rather than on the file system, so the use cases are unit-testable.
//! - **Contains no file system access**.
//!
//! # Sub-modules
//!
//! - **`store`**           – The live settings snapshot and its ordered
//!   subscriber list.
//! - **`update_settings`** – `write_options`: commit synchronously, save
//!   asynchronously.
//! - **`settings_form`**   – Input boundary for the settings page: trims,
//!   validates and rejects raw field input.

pub mod settings_form;
pub mod store;
pub mod update_settings;
