//! Structured logging driven by the `debugLogging` setting.
//!
//! [`install`] sets up the global `tracing` subscriber with its level filter
//! behind a `reload` layer.  [`DebugLoggingController::follow`] then
//! subscribes to the [`ConfigurationStore`] and swaps the filter between
//! `info` and `debug` whenever the user flips the "Debug logging" switch, so
//! the change takes effect without a restart.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use todoist_settings_core::Settings;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::application::store::{ConfigurationStore, Subscription};

/// Error type for logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// The filter directive for `settings`.
pub fn level_for(settings: &Settings) -> &'static str {
    if settings.debug_logging {
        "debug"
    } else {
        "info"
    }
}

/// Installs the global subscriber using the level from `settings`.
///
/// # Errors
///
/// Returns [`LoggingError::Init`] if the process already has a global subscriber.
pub fn install(settings: &Settings) -> Result<DebugLoggingController<Registry>, LoggingError> {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(level_for(settings)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()?;
    Ok(DebugLoggingController::new(handle, settings.debug_logging))
}

/// Keeps the reloadable level filter in step with `debug_logging`.
pub struct DebugLoggingController<S> {
    handle: reload::Handle<EnvFilter, S>,
    enabled: Arc<AtomicBool>,
}

impl<S: 'static> DebugLoggingController<S> {
    /// Wraps a reload handle whose filter currently reflects `debug_enabled`.
    pub fn new(handle: reload::Handle<EnvFilter, S>, debug_enabled: bool) -> Self {
        Self {
            handle,
            enabled: Arc::new(AtomicBool::new(debug_enabled)),
        }
    }

    /// `true` while the filter is at `debug`.
    pub fn debug_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Subscribes to `store` and reloads the filter when `debug_logging` changes.
    pub fn follow(&self, store: &ConfigurationStore) -> Subscription {
        let handle = self.handle.clone();
        let enabled = Arc::clone(&self.enabled);

        store.subscribe(move |settings| {
            let wanted = settings.debug_logging;
            if enabled.swap(wanted, Ordering::AcqRel) == wanted {
                return;
            }
            match handle.reload(EnvFilter::new(level_for(settings))) {
                Ok(()) => info!("log level set to {}", level_for(settings)),
                Err(e) => warn!("could not change log level: {e}"),
            }
        })
    }
}
