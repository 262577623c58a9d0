//! zbind - 编辑器快捷键存储库
//!
//! 模块结构：
//! - core: 快捷键映射、监听事件、命令合并（无 IO）
//! - kernel: BindingStore 以及服务层（ports + adapters）

pub mod core;
pub mod kernel;

pub use crate::core::{BindingKey, BindingMap, BindingValue, ListenerArgs, ListenerEvent, ListenerId};
pub use crate::kernel::services::adapters::{
    default_keybindings, InMemoryCommandTable, JsonFileStorage, MemoryStorage, TracingNotifier,
};
pub use crate::kernel::services::ports::{BindingStorage, CommandTable, Notifier, StoreConfig};
pub use crate::kernel::{BindingStore, StoreError, UpdateRequest};
