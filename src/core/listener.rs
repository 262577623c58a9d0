//! 监听器注册表
//!
//! 两级结构：事件类型（update / reset）× 阶段 × 可选的 key。
//! 每个列表保持注册顺序，移除不改变其余监听器的相对顺序。

use rustc_hash::FxHashMap;

use super::binding::{BindingMap, BindingValue};
use super::event::{ListenerArgs, ListenerEvent, Phase};

pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;
pub type ListenerResult = std::result::Result<(), ListenerError>;
pub type Listener = Box<dyn FnMut(&ListenerArgs<'_>) -> ListenerResult>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// A listener failed; dispatch stopped at `event`.
#[derive(Debug)]
pub struct DispatchError {
    pub event: ListenerEvent,
    pub source: ListenerError,
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener for '{}' failed: {}", self.event, self.source)
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

struct Entry {
    id: ListenerId,
    callback: Listener,
}

#[derive(Default)]
struct PhaseTable {
    any: Vec<Entry>,
    by_key: FxHashMap<String, Vec<Entry>>,
}

impl PhaseTable {
    fn slot_mut(&mut self, key: Option<&str>) -> &mut Vec<Entry> {
        match key {
            None => &mut self.any,
            Some(key) => self.by_key.entry(key.to_string()).or_default(),
        }
    }

    fn remove(&mut self, key: Option<&str>, id: ListenerId) -> bool {
        let list = match key {
            None => &mut self.any,
            Some(key) => match self.by_key.get_mut(key) {
                Some(list) => list,
                None => return false,
            },
        };
        let Some(pos) = list.iter().position(|e| e.id == id) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            if let Some(key) = key {
                self.by_key.remove(key);
            }
        }
        true
    }

    fn len(&self, key: Option<&str>) -> usize {
        match key {
            None => self.any.len(),
            Some(key) => self.by_key.get(key).map_or(0, Vec::len),
        }
    }
}

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    before: PhaseTable,
    after: PhaseTable,
    reset: Vec<Entry>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, event: ListenerEvent, callback: F) -> ListenerId
    where
        F: FnMut(&ListenerArgs<'_>) -> ListenerResult + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        let entry = Entry {
            id,
            callback: Box::new(callback),
        };

        match event {
            ListenerEvent::Reset => self.reset.push(entry),
            ListenerEvent::Update { key, phase } => {
                self.table_mut(phase).slot_mut(key.as_deref()).push(entry)
            }
        }
        id
    }

    /// Removes a listener. Returns `false` if it was never registered for `event`.
    pub fn off(&mut self, event: &ListenerEvent, id: ListenerId) -> bool {
        match event {
            ListenerEvent::Reset => match self.reset.iter().position(|e| e.id == id) {
                Some(pos) => {
                    self.reset.remove(pos);
                    true
                }
                None => false,
            },
            ListenerEvent::Update { key, phase } => {
                self.table_mut(*phase).remove(key.as_deref(), id)
            }
        }
    }

    pub fn len(&self, event: &ListenerEvent) -> usize {
        match event {
            ListenerEvent::Reset => self.reset.len(),
            ListenerEvent::Update { key, phase } => self.table(*phase).len(key.as_deref()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reset.is_empty()
            && self.before.any.is_empty()
            && self.before.by_key.is_empty()
            && self.after.any.is_empty()
            && self.after.by_key.is_empty()
    }

    /// Calls the generic listeners of `phase`, then the ones registered for
    /// `key`, with `key`'s value. The first failure stops the dispatch.
    pub fn dispatch_binding(
        &mut self,
        phase: Phase,
        key: &str,
        value: &BindingValue,
    ) -> Result<(), DispatchError> {
        let args = ListenerArgs::Binding { key, value };
        let table = self.table_mut(phase);

        for entry in table.any.iter_mut() {
            (entry.callback)(&args).map_err(|source| DispatchError {
                event: ListenerEvent::Update { key: None, phase },
                source,
            })?;
        }

        if let Some(list) = table.by_key.get_mut(key) {
            for entry in list.iter_mut() {
                (entry.callback)(&args).map_err(|source| DispatchError {
                    event: ListenerEvent::Update {
                        key: Some(key.to_string()),
                        phase,
                    },
                    source,
                })?;
            }
        }

        Ok(())
    }

    pub fn dispatch_reset(&mut self, bindings: &BindingMap) -> Result<(), DispatchError> {
        let args = ListenerArgs::Reset { bindings };
        for entry in self.reset.iter_mut() {
            (entry.callback)(&args).map_err(|source| DispatchError {
                event: ListenerEvent::Reset,
                source,
            })?;
        }
        Ok(())
    }

    fn table(&self, phase: Phase) -> &PhaseTable {
        match phase {
            Phase::Before => &self.before,
            Phase::After => &self.after,
        }
    }

    fn table_mut(&mut self, phase: Phase) -> &mut PhaseTable {
        match phase {
            Phase::Before => &mut self.before,
            Phase::After => &mut self.after,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/listener.rs"]
mod tests;
