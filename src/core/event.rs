//! Listener events.
//!
//! Events are addressed by kind, phase and an optional binding key instead of
//! concatenated strings. The string form (`update`, `update:after`,
//! `update:<key>`, `update:<key>:after`, `reset`) is still accepted through
//! `FromStr` and printed through `Display`.

use std::fmt;
use std::str::FromStr;

use super::binding::{BindingMap, BindingValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Before the new mapping is persisted.
    #[default]
    Before,
    /// After the new mapping is persisted.
    After,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerEvent {
    Update { key: Option<String>, phase: Phase },
    Reset,
}

impl ListenerEvent {
    pub fn update() -> Self {
        Self::Update {
            key: None,
            phase: Phase::Before,
        }
    }

    pub fn update_after() -> Self {
        Self::Update {
            key: None,
            phase: Phase::After,
        }
    }

    pub fn update_key(key: impl Into<String>) -> Self {
        Self::Update {
            key: Some(key.into()),
            phase: Phase::Before,
        }
    }

    pub fn update_key_after(key: impl Into<String>) -> Self {
        Self::Update {
            key: Some(key.into()),
            phase: Phase::After,
        }
    }

    pub fn reset() -> Self {
        Self::Reset
    }
}

impl fmt::Display for ListenerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerEvent::Reset => write!(f, "reset"),
            ListenerEvent::Update { key, phase } => {
                write!(f, "update")?;
                if let Some(key) = key {
                    write!(f, ":{}", key)?;
                }
                if *phase == Phase::After {
                    write!(f, ":after")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEventError(pub String);

impl fmt::Display for ParseEventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown listener event: {}", self.0)
    }
}

impl std::error::Error for ParseEventError {}

impl FromStr for ListenerEvent {
    type Err = ParseEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "reset" {
            return Ok(ListenerEvent::Reset);
        }
        if s == "update" {
            return Ok(ListenerEvent::update());
        }

        let rest = s
            .strip_prefix("update:")
            .ok_or_else(|| ParseEventError(s.to_string()))?;
        if rest == "after" {
            return Ok(ListenerEvent::update_after());
        }

        let (key, phase) = match rest.strip_suffix(":after") {
            Some(key) => (key, Phase::After),
            None => (rest, Phase::Before),
        };
        if key.is_empty() {
            return Err(ParseEventError(s.to_string()));
        }

        Ok(ListenerEvent::Update {
            key: Some(key.to_string()),
            phase,
        })
    }
}

/// What a listener is called with.
#[derive(Debug, Clone, Copy)]
pub enum ListenerArgs<'a> {
    /// A single changed binding and its current value.
    Binding {
        key: &'a str,
        value: &'a BindingValue,
    },
    /// The whole mapping after a reset.
    Reset { bindings: &'a BindingMap },
}

impl<'a> ListenerArgs<'a> {
    pub fn key(&self) -> Option<&'a str> {
        match *self {
            ListenerArgs::Binding { key, .. } => Some(key),
            ListenerArgs::Reset { .. } => None,
        }
    }

    pub fn value(&self) -> Option<&'a BindingValue> {
        match *self {
            ListenerArgs::Binding { value, .. } => Some(value),
            ListenerArgs::Reset { .. } => None,
        }
    }

    pub fn bindings(&self) -> Option<&'a BindingMap> {
        match *self {
            ListenerArgs::Reset { bindings } => Some(bindings),
            ListenerArgs::Binding { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
