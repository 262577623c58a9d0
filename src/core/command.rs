//! 命令记录与快捷键合并
//!
//! 编辑器的命令表以命令名索引 `CommandRecord`。快捷键描述会被浅合并到
//! 命令记录上（描述中的字段优先）后重新注册。

use serde_json::{Map, Value};

use super::binding::BindingValue;

/// The editor's representation of a registered action.
pub type CommandRecord = Map<String, Value>;

pub const COMMAND_NAME_FIELD: &str = "name";
/// Platform specific binding field understood by the command table.
pub const BIND_KEY_FIELD: &str = "bindKey";
/// Legacy single-platform shortcut field.
pub const LEGACY_KEY_FIELD: &str = "key";

pub const PLATFORM_WIN: &str = "win";
pub const PLATFORM_MAC: &str = "mac";

/// Returns the descriptor in the shape the command table expects, or `None`
/// when it cannot be merged into a command record.
///
/// A legacy `key` field (or a bare string descriptor) is rewritten into
/// `bindKey: { win, mac }`. The input is never modified.
pub fn normalize_shortcut(descriptor: &BindingValue) -> Option<Map<String, Value>> {
    match descriptor {
        Value::Object(fields) => {
            let mut normalized = fields.clone();
            if let Some(key) = normalized.remove(LEGACY_KEY_FIELD) {
                normalized.insert(BIND_KEY_FIELD.to_string(), platform_binding(key));
            }
            Some(normalized)
        }
        Value::String(_) => {
            let mut normalized = Map::new();
            normalized.insert(
                BIND_KEY_FIELD.to_string(),
                platform_binding(descriptor.clone()),
            );
            Some(normalized)
        }
        _ => None,
    }
}

fn platform_binding(key: Value) -> Value {
    let mut binding = Map::new();
    binding.insert(PLATFORM_WIN.to_string(), key.clone());
    binding.insert(PLATFORM_MAC.to_string(), key);
    Value::Object(binding)
}

/// Shallow merge; `shortcut` fields replace the command's own.
pub fn merge_command(command: &CommandRecord, shortcut: Map<String, Value>) -> CommandRecord {
    let mut merged = command.clone();
    for (field, value) in shortcut {
        merged.insert(field, value);
    }
    merged
}

pub fn command_name(record: &CommandRecord) -> Option<&str> {
    record.get(COMMAND_NAME_FIELD).and_then(Value::as_str)
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
