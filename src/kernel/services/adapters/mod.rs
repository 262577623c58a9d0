//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod keybinding;
pub mod settings;
pub mod storage;

pub use keybinding::{default_keybindings, InMemoryCommandTable, TracingNotifier};
pub use settings::{
    ensure_log_dir, get_keybindings_dir, get_keybindings_path, get_log_dir, store_config,
};
pub use storage::{JsonFileStorage, MemoryStorage};
