use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_NAME: &str = "keybindings.json";
pub const DEFAULT_UPDATED_MESSAGE: &str = "Keybindings updated";
pub const JSON_INDENT: &[u8] = b"    ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the keybindings document. Empty means the current directory.
    pub storage_dir: PathBuf,
    pub file_name: String,
    /// Shown through the notifier after a user-facing update.
    pub updated_message: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            updated_message: DEFAULT_UPDATED_MESSAGE.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.storage_dir.join(&self.file_name)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/config.rs"]
mod tests;
