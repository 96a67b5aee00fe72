//! Host storage capability: whole-file text reads and writes.
//!
//! The plugin host owns the vault and decides how files are actually stored.
//! Everything in this crate that touches disk goes through [`HostStorage`],
//! so tests can swap in a mock and an embedding host can route the calls to
//! its own adapter.  [`FsHostStorage`] is the plain `tokio::fs`
//! implementation.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Error type for storage adapters in this module tree.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings record could not be serialized.
    #[error("failed to encode settings: {0}")]
    Encode(String),
}

/// Whole-file text storage provided by the host.
///
/// `read` must report a missing file with [`io::ErrorKind::NotFound`];
/// callers rely on that kind to tell "absent" apart from a real failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostStorage: Send + Sync {
    /// Reads the entire file at `path` as UTF-8 text.
    async fn read(&self, path: &Path) -> io::Result<String>;

    /// Replaces the file at `path` with `contents`, creating it if needed.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// [`HostStorage`] backed directly by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsHostStorage;

#[async_trait]
impl HostStorage for FsHostStorage {
    async fn read(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        // Ensure directory exists before writing.
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(path, contents).await
    }
}
