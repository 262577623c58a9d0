//! 核心模块
//!
//! 与 IO 无关的快捷键数据与协议：
//! - binding: 映射类型、结构比较、schema 修复
//! - event: 监听事件（类型 × 阶段 × key）
//! - listener: 监听器注册表与分发
//! - command: 命令记录与快捷键合并

pub mod binding;
pub mod command;
pub mod event;
pub mod listener;

pub use binding::{BindingKey, BindingMap, BindingValue};
pub use command::CommandRecord;
pub use event::{ListenerArgs, ListenerEvent, Phase};
pub use listener::{DispatchError, ListenerId, ListenerRegistry, ListenerResult};
