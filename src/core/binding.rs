//! 快捷键映射：命令名 → 快捷键描述
//!
//! BindingValue 是不透明的 JSON 值，这里只负责结构比较：
//! - `changed_keys`: 基线与当前映射的差异（按基线顺序）
//! - `heal_document`: 持久化文档与默认值的 schema 修复

use serde_json::{Map, Value};

/// Logical command name, e.g. `"save"` or `"find"`.
pub type BindingKey = String;

/// Opaque shortcut descriptor. Only compared structurally.
pub type BindingValue = Value;

/// Ordered command → descriptor mapping (insertion order is iteration order).
pub type BindingMap = Map<BindingKey, BindingValue>;

/// Coarse runtime shape of a descriptor, used to detect stale persisted schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueShape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueShape::Null,
            Value::Bool(_) => ValueShape::Bool,
            Value::Number(_) => ValueShape::Number,
            Value::String(_) => ValueShape::String,
            Value::Array(_) => ValueShape::Array,
            Value::Object(_) => ValueShape::Object,
        }
    }
}

pub fn same_shape(a: &Value, b: &Value) -> bool {
    ValueShape::of(a) == ValueShape::of(b)
}

/// Keys of `baseline` whose value differs structurally in `current`.
///
/// Keys that only exist in `current` are never reported, and a missing
/// baseline (nothing persisted yet) yields an empty set.
pub fn changed_keys(baseline: Option<&BindingMap>, current: &BindingMap) -> Vec<BindingKey> {
    let Some(baseline) = baseline else {
        return Vec::new();
    };

    baseline
        .iter()
        .filter(|(key, old)| current.get(key.as_str()) != Some(*old))
        .map(|(key, _)| key.clone())
        .collect()
}

/// Builds a mapping with exactly the key set of `defaults`, taking each value
/// from `document` when it exists there with the same shape as the default.
///
/// Returns the healed mapping and the keys that fell back to their default.
pub fn heal_document(defaults: &BindingMap, document: &BindingMap) -> (BindingMap, Vec<BindingKey>) {
    let mut healed = BindingMap::with_capacity(defaults.len());
    let mut replaced = Vec::new();

    for (key, default) in defaults {
        match document.get(key) {
            Some(value) if same_shape(value, default) => {
                healed.insert(key.clone(), value.clone());
            }
            _ => {
                replaced.push(key.clone());
                healed.insert(key.clone(), default.clone());
            }
        }
    }

    (healed, replaced)
}

/// Overwrites the entries of `target` named in `patch`; keys `target` doesn't
/// already have are skipped and returned.
pub fn apply_patch(target: &mut BindingMap, patch: &BindingMap) -> Vec<BindingKey> {
    let mut ignored = Vec::new();
    for (key, value) in patch {
        match target.get_mut(key) {
            Some(slot) => *slot = value.clone(),
            None => ignored.push(key.clone()),
        }
    }
    ignored
}

#[cfg(test)]
#[path = "../../tests/unit/core/binding.rs"]
mod tests;
