//! todoist-settings library entry point.
//!
//! Settings synchronization for the Todoist plugin: a reactive store holding
//! the live [`Settings`](todoist_settings_core::Settings), a single
//! `write_options` mutation path that commits synchronously and saves
//! asynchronously, and a separate store for the API token.
//!
//! Most callers only need [`SettingsContext`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use todoist_settings::{FsHostStorage, ServiceOptions, SettingsContext, VaultLayout};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = SettingsContext::initialise(
//!     Arc::new(FsHostStorage),
//!     VaultLayout::new("/path/to/vault"),
//!     ServiceOptions::default(),
//! )
//! .await?;
//!
//! let _sub = ctx.store().subscribe(|s| println!("interval is now {}", s.auto_refresh_interval));
//! ctx.write_options(|s| s.auto_refresh_interval = 120)?.await?;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod context;
pub mod infrastructure;

pub use application::settings_form::{FieldOutcome, SettingsForm};
pub use application::store::{ConfigurationStore, Subscription};
pub use application::update_settings::{
    PendingSave, PersistError, SaveOrdering, ServiceOptions, SettingsRepository, SettingsService,
    WriteError,
};
pub use context::{ContextError, SettingsContext};
pub use infrastructure::logging::{DebugLoggingController, LoggingError};
pub use infrastructure::storage::host::{FsHostStorage, HostStorage, StorageError};
pub use infrastructure::storage::layout::VaultLayout;
pub use infrastructure::storage::settings_file::{FileSettingsRepository, SettingsFormat};
pub use infrastructure::storage::token::TokenStore;
