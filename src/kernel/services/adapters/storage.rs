//! 快捷键文档存储
//!
//! - JsonFileStorage: 本地 JSON 文件（tokio fs）
//! - MemoryStorage: 内存文档，可克隆共享（嵌入方与测试使用）

use crate::kernel::services::ports::config::StoreConfig;
use crate::kernel::services::ports::storage::{BindingStorage, Result, StorageError};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct JsonFileStorage {
    dir: PathBuf,
    file_name: String,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.storage_dir.clone(), config.file_name.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

impl BindingStorage for JsonFileStorage {
    async fn exists(&self) -> bool {
        tokio::fs::try_exists(self.path()).await.unwrap_or(false)
    }

    async fn read_document(&self) -> Result<Option<Value>> {
        let path = self.path();
        let text = tokio::fs::read_to_string(&path).await?;
        Ok(parse_document(&path, &text))
    }

    async fn write(&self, text: &str) -> Result<()> {
        tokio::fs::write(self.path(), text).await?;
        Ok(())
    }

    async fn create(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(StorageError::InvalidPath(self.path()));
        }
        if !self.dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(&self.dir).await?;
        }
        tokio::fs::File::create(self.path()).await?;
        Ok(())
    }
}

fn parse_document(path: &Path, text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "keybindings document is not valid json");
            None
        }
    }
}

#[derive(Default)]
struct MemoryDocument {
    text: RefCell<Option<String>>,
    writes: Cell<usize>,
}

/// In-memory document. Clones share the same document.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<MemoryDocument>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let storage = Self::new();
        *storage.inner.text.borrow_mut() = Some(text.into());
        storage
    }

    pub fn text(&self) -> Option<String> {
        self.inner.text.borrow().clone()
    }

    /// Number of successful `write` calls.
    pub fn writes(&self) -> usize {
        self.inner.writes.get()
    }
}

impl BindingStorage for MemoryStorage {
    async fn exists(&self) -> bool {
        self.inner.text.borrow().is_some()
    }

    async fn read_document(&self) -> Result<Option<Value>> {
        let text = self.inner.text.borrow();
        Ok(text
            .as_deref()
            .and_then(|text| parse_document(Path::new("<memory>"), text)))
    }

    async fn write(&self, text: &str) -> Result<()> {
        *self.inner.text.borrow_mut() = Some(text.to_string());
        self.inner.writes.set(self.inner.writes.get() + 1);
        Ok(())
    }

    async fn create(&self) -> Result<()> {
        self.inner.text.borrow_mut().get_or_insert_with(String::new);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/storage.rs"]
mod tests;
