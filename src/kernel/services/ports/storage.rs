//! Storage port for the persisted keybinding document.

use serde_json::Value;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    InvalidPath(PathBuf),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::InvalidPath(p) => write!(f, "Invalid storage path: {}", p.display()),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::InvalidPath(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// A single JSON document at a well-known location.
///
/// Only storage-level failures are errors. A document that exists but holds
/// nothing usable reads as `Ok(None)`.
#[allow(async_fn_in_trait)]
pub trait BindingStorage {
    async fn exists(&self) -> bool;

    async fn read_document(&self) -> Result<Option<Value>>;

    async fn write(&self, text: &str) -> Result<()>;

    /// Creates the document as an empty resource inside its storage directory.
    async fn create(&self) -> Result<()>;
}
