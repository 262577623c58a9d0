//! Service ports: traits + data contracts.

pub mod config;
pub mod editor;
pub mod storage;

pub use config::StoreConfig;
pub use editor::{CommandTable, Notifier};
pub use storage::{BindingStorage, Result as StorageResult, StorageError};
