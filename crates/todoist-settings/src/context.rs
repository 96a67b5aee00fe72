//! Plugin-wide settings context.
//!
//! [`SettingsContext`] is built once when the plugin loads and handed by
//! reference to everything that needs settings: the settings page, the task
//! renderers, the auto-refresh timer.  It replaces a module-level global: there
//! is exactly one store per plugin instance, but it is passed explicitly.
//!
//! # Startup sequence
//!
//! ```text
//! SettingsContext::initialise()
//!  ├─ FileSettingsRepository::load()   -- defaults merged with data.json
//!  ├─ ConfigurationStore::new(loaded)
//!  ├─ SettingsService / SettingsForm   -- write path
//!  └─ TokenStore                       -- independent, not loaded eagerly
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::{Handle, TryCurrentError};
use tracing::info;

use crate::application::settings_form::SettingsForm;
use crate::application::store::{ConfigurationStore, Subscription};
use crate::application::update_settings::{
    PendingSave, ServiceOptions, SettingsRepository, SettingsService, WriteError,
};
use crate::infrastructure::logging::{self, DebugLoggingController, LoggingError};
use crate::infrastructure::storage::host::HostStorage;
use crate::infrastructure::storage::layout::VaultLayout;
use crate::infrastructure::storage::settings_file::FileSettingsRepository;
use crate::infrastructure::storage::token::TokenStore;
use todoist_settings_core::Settings;
use tracing_subscriber::Registry;

/// Error type for context construction.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Saves are spawned on the current Tokio runtime, so one must exist.
    #[error("settings context must be initialised inside a Tokio runtime: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

/// Everything the plugin needs to read and change its settings and token.
pub struct SettingsContext {
    layout: VaultLayout,
    store: Arc<ConfigurationStore>,
    service: Arc<SettingsService>,
    form: SettingsForm,
    tokens: TokenStore,
}

impl SettingsContext {
    /// Loads the settings for `layout` and wires up the store and services.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NoRuntime`] when not called from within a Tokio
    /// runtime.  Missing or unreadable settings files are not errors.
    pub async fn initialise(
        storage: Arc<dyn HostStorage>,
        layout: VaultLayout,
        options: ServiceOptions,
    ) -> Result<Self, ContextError> {
        let runtime = Handle::try_current()?;

        let repository = Arc::new(FileSettingsRepository::new(
            Arc::clone(&storage),
            layout.settings_path(),
        ));
        let settings = repository.load().await;
        info!("settings loaded from {}", layout.settings_path().display());

        let store = Arc::new(ConfigurationStore::new(settings));
        let service = Arc::new(SettingsService::new(
            Arc::clone(&store),
            repository as Arc<dyn SettingsRepository>,
            runtime,
            options,
        ));
        let form = SettingsForm::new(Arc::clone(&service));
        let tokens = TokenStore::new(storage, layout.token_path());

        Ok(Self {
            layout,
            store,
            service,
            form,
            tokens,
        })
    }

    pub fn layout(&self) -> &VaultLayout {
        &self.layout
    }

    /// The reactive store; subscribe here to follow settings changes.
    pub fn store(&self) -> &Arc<ConfigurationStore> {
        &self.store
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> Arc<Settings> {
        self.store.get()
    }

    /// See [`SettingsService::write_options`].
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Invalid`] if the change breaks a field constraint.
    pub fn write_options<F>(&self, mutate: F) -> Result<PendingSave, WriteError>
    where
        F: FnOnce(&mut Settings),
    {
        self.service.write_options(mutate)
    }

    pub fn service(&self) -> &Arc<SettingsService> {
        &self.service
    }

    /// Input boundary for the settings page.
    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    /// API token storage, independent of the settings record.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Installs the global `tracing` subscriber and keeps its level in step
    /// with the `debugLogging` setting.
    ///
    /// # Errors
    ///
    /// Returns [`LoggingError::Init`] if a global subscriber already exists.
    pub fn install_logging(
        &self,
    ) -> Result<(DebugLoggingController<Registry>, Subscription), LoggingError> {
        let controller = logging::install(&self.store.get())?;
        let subscription = controller.follow(&self.store);
        Ok((controller, subscription))
    }
}
