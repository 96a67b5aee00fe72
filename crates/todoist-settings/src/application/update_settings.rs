//! UpdateSettingsUseCase: the single entry point for changing settings.
//!
//! [`SettingsService::write_options`] is the only sanctioned way to modify the
//! live settings.  It runs in two phases:
//!
//! ```text
//! write_options(mutate)
//!  ├─ synchronous ─ clone snapshot → mutate clone → validate → commit to store
//!  │                (subscribers have seen the change when this returns)
//!  └─ asynchronous ─ spawn repository.save(snapshot) → PendingSave
//! ```
//!
//! The caller gets back a [`PendingSave`].  Awaiting it reports whether the
//! record reached storage; dropping it leaves the save running in the
//! background.  There is no retry and no cancellation.
//!
//! # Save ordering
//!
//! Each save is an independent Tokio task.  Under
//! [`SaveOrdering::Concurrent`] (the default) two quick edits may finish
//! saving in either order, and whichever save lands last is what the file
//! holds.  [`SaveOrdering::LatestWins`] serializes saves and skips a save
//! whose commit has been superseded by the time its turn comes, so the file
//! always ends at the newest commit.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use async_trait::async_trait;
use thiserror::Error;
use todoist_settings_core::{Settings, SettingsError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::store::ConfigurationStore;

/// Error reported by a save.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistError {
    /// The repository could not write the record.
    #[error("failed to save settings: {0}")]
    Save(String),
    /// The save task panicked or the runtime shut down before it finished.
    #[error("settings save did not complete: {0}")]
    Interrupted(String),
}

/// Error returned by [`SettingsService::write_options`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WriteError {
    /// The mutated record broke a field constraint; nothing was committed.
    #[error("rejected settings change: {0}")]
    Invalid(#[from] SettingsError),
}

/// Storage port for the settings record.
///
/// The infrastructure implementation reads and writes the plugin data file;
/// tests use in-memory recorders.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the persisted record merged onto the defaults.
    ///
    /// Absent or unreadable data is not an error: the defaults are returned.
    async fn load(&self) -> Settings;

    /// Overwrites the persisted record with `settings`.
    async fn save(&self, settings: &Settings) -> Result<(), PersistError>;
}

/// How concurrent saves are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveOrdering {
    /// Saves run independently; the last one to complete wins.
    #[default]
    Concurrent,
    /// Saves are serialized and superseded ones skipped; the newest commit wins.
    LatestWins,
}

/// Tunables for [`SettingsService`].
#[derive(Debug, Clone, Default)]
pub struct ServiceOptions {
    pub save_ordering: SaveOrdering,
}

/// An in-flight save started by [`SettingsService::write_options`].
///
/// Resolves to the save result.  Dropping it does not cancel the save.
/// Under [`SaveOrdering::LatestWins`] a save skipped because a newer commit
/// exists resolves to `Ok(())`.
#[must_use = "dropping a PendingSave ignores whether the settings reached storage"]
#[derive(Debug)]
pub struct PendingSave {
    commit: u64,
    handle: JoinHandle<Result<(), PersistError>>,
}

impl PendingSave {
    /// Sequence number of the commit this save persists (first commit is 1).
    pub fn commit(&self) -> u64 {
        self.commit
    }
}

impl Future for PendingSave {
    type Output = Result<(), PersistError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => Poll::Ready(Err(PersistError::Interrupted(e.to_string()))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Applies settings changes: commit to the store, then save in the background.
pub struct SettingsService {
    store: Arc<ConfigurationStore>,
    repository: Arc<dyn SettingsRepository>,
    runtime: Handle,
    options: ServiceOptions,
    /// Held across clone → mutate → commit so concurrent writers cannot lose updates.
    write_lock: Mutex<()>,
    commits: Arc<AtomicU64>,
    /// Serializes saves under `LatestWins`.
    save_lock: Arc<tokio::sync::Mutex<()>>,
}

impl SettingsService {
    /// Creates a service that spawns saves on `runtime`.
    pub fn new(
        store: Arc<ConfigurationStore>,
        repository: Arc<dyn SettingsRepository>,
        runtime: Handle,
        options: ServiceOptions,
    ) -> Self {
        Self {
            store,
            repository,
            runtime,
            options,
            write_lock: Mutex::new(()),
            commits: Arc::new(AtomicU64::new(0)),
            save_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// The store this service commits into.
    pub fn store(&self) -> &Arc<ConfigurationStore> {
        &self.store
    }

    /// Current snapshot.
    pub fn current(&self) -> Arc<Settings> {
        self.store.get()
    }

    /// Applies `mutate` to a copy of the current settings, commits it, and
    /// starts saving it.
    ///
    /// `mutate` runs while the write lock is held and must not call back into
    /// this service.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Invalid`] if the mutated copy fails validation.
    /// The store and storage are untouched in that case.
    pub fn write_options<F>(&self, mutate: F) -> Result<PendingSave, WriteError>
    where
        F: FnOnce(&mut Settings),
    {
        let (snapshot, commit) = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

            let mut draft = Settings::clone(&self.store.get());
            mutate(&mut draft);

            let snapshot = self.store.commit(draft)?;
            let commit = self.commits.fetch_add(1, Ordering::AcqRel) + 1;
            (snapshot, commit)
        };

        debug!("commit #{commit} applied; scheduling save");
        Ok(self.spawn_save(snapshot, commit))
    }

    fn spawn_save(&self, snapshot: Arc<Settings>, commit: u64) -> PendingSave {
        let repository = Arc::clone(&self.repository);

        let handle = match self.options.save_ordering {
            SaveOrdering::Concurrent => self.runtime.spawn(async move {
                let result = repository.save(&snapshot).await;
                report(commit, &result);
                result
            }),
            SaveOrdering::LatestWins => {
                let save_lock = Arc::clone(&self.save_lock);
                let commits = Arc::clone(&self.commits);
                self.runtime.spawn(async move {
                    let _turn = save_lock.lock().await;
                    let latest = commits.load(Ordering::Acquire);
                    if latest > commit {
                        debug!("skipping save of commit #{commit}; superseded by #{latest}");
                        return Ok(());
                    }
                    let result = repository.save(&snapshot).await;
                    report(commit, &result);
                    result
                })
            }
        };

        PendingSave { commit, handle }
    }
}

fn report(commit: u64, result: &Result<(), PersistError>) {
    match result {
        Ok(()) => debug!("commit #{commit} saved"),
        Err(e) => warn!("commit #{commit} was not saved: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
