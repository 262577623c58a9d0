//! The keybinding store.
//!
//! Owns the default snapshot, the live mapping and the last persisted
//! snapshot. Every update diffs the live mapping against what was last
//! written, then runs, in order:
//!
//! ```text
//! before listeners (per changed key) → editor sync → save → notify → after listeners (per changed key)
//! ```

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::core::binding::{self, BindingKey, BindingMap, BindingValue};
use crate::core::command::{merge_command, normalize_shortcut};
use crate::core::event::{ListenerArgs, ListenerEvent, Phase};
use crate::core::listener::{DispatchError, ListenerId, ListenerRegistry, ListenerResult};
use crate::kernel::services::adapters::keybinding::TracingNotifier;
use crate::kernel::services::ports::config::{StoreConfig, JSON_INDENT};
use crate::kernel::services::ports::editor::{CommandTable, Notifier};
use crate::kernel::services::ports::storage::{BindingStorage, StorageError};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Serialize(serde_json::Error),
    Listener(DispatchError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Storage(e) => write!(f, "Storage error: {}", e),
            StoreError::Serialize(e) => write!(f, "Serialize keybindings failed: {}", e),
            StoreError::Listener(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Storage(e) => Some(e),
            StoreError::Serialize(e) => Some(e),
            StoreError::Listener(e) => Some(e),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialize(e)
    }
}

impl From<DispatchError> for StoreError {
    fn from(e: DispatchError) -> Self {
        StoreError::Listener(e)
    }
}

/// Arguments of [`BindingStore::update`].
///
/// A bare `bool` converts to a request without a patch, where the flag is
/// the `notify` setting.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub patch: Option<BindingMap>,
    pub notify: bool,
    pub persist: bool,
}

impl Default for UpdateRequest {
    fn default() -> Self {
        Self {
            patch: None,
            notify: true,
            persist: true,
        }
    }
}

impl UpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patch(patch: BindingMap) -> Self {
        Self {
            patch: Some(patch),
            ..Self::default()
        }
    }

    pub fn notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }

    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }
}

impl From<BindingMap> for UpdateRequest {
    fn from(patch: BindingMap) -> Self {
        Self::with_patch(patch)
    }
}

impl From<Option<BindingMap>> for UpdateRequest {
    fn from(patch: Option<BindingMap>) -> Self {
        Self {
            patch,
            ..Self::default()
        }
    }
}

impl From<bool> for UpdateRequest {
    fn from(notify: bool) -> Self {
        Self::default().notify(notify)
    }
}

pub struct BindingStore<S> {
    storage: S,
    config: StoreConfig,
    defaults: BindingMap,
    current: BindingMap,
    persisted: Option<BindingMap>,
    listeners: ListenerRegistry,
    editor: Option<Box<dyn CommandTable>>,
    notifier: Box<dyn Notifier>,
    initialized: bool,
}

impl<S: BindingStorage> BindingStore<S> {
    /// `defaults` is copied; the store never shares it with the caller.
    pub fn new(defaults: &BindingMap, storage: S) -> Self {
        Self {
            storage,
            config: StoreConfig::default(),
            defaults: defaults.clone(),
            current: defaults.clone(),
            persisted: None,
            listeners: ListenerRegistry::new(),
            editor: None,
            notifier: Box::new(TracingNotifier),
            initialized: false,
        }
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_notifier<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The live mapping.
    pub fn value(&self) -> &BindingMap {
        &self.current
    }

    pub fn defaults(&self) -> &BindingMap {
        &self.defaults
    }

    /// Snapshot written by the last successful save, if any.
    pub fn persisted(&self) -> Option<&BindingMap> {
        self.persisted.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&BindingValue> {
        self.current.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.current.contains_key(key)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn editor(&self) -> Option<&dyn CommandTable> {
        self.editor.as_deref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut (dyn CommandTable + 'static)> {
        self.editor.as_deref_mut()
    }

    pub fn on<F>(&mut self, event: ListenerEvent, callback: F) -> ListenerId
    where
        F: FnMut(&ListenerArgs<'_>) -> ListenerResult + 'static,
    {
        self.listeners.on(event, callback)
    }

    pub fn off(&mut self, event: &ListenerEvent, id: ListenerId) -> bool {
        self.listeners.off(event, id)
    }

    /// Loads the persisted document and attaches the editor. Runs once; later
    /// calls return immediately.
    pub async fn initialize<E>(&mut self, editor: E) -> Result<()>
    where
        E: CommandTable + 'static,
    {
        if self.initialized {
            tracing::debug!("keybinding store already initialized");
            return Ok(());
        }
        self.editor = Some(Box::new(editor));

        if !self.storage.exists().await {
            tracing::info!("no persisted keybindings, writing defaults");
            self.current = self.defaults.clone();
            self.save().await?;
            self.finish_initialize();
            return Ok(());
        }

        let document = match self.storage.read_document().await? {
            Some(Value::Object(document)) => document,
            _ => {
                tracing::warn!("persisted keybindings unusable, keeping defaults");
                self.finish_initialize();
                return Ok(());
            }
        };

        let (healed, replaced) = binding::heal_document(&self.defaults, &document);
        if !replaced.is_empty() {
            tracing::debug!(keys = ?replaced, "keybindings restored from defaults");
        }

        self.reset_to(healed).await?;
        self.finish_initialize();
        Ok(())
    }

    fn finish_initialize(&mut self) {
        self.initialized = true;
        let keys: Vec<BindingKey> = self.current.keys().cloned().collect();
        let applied = self.apply_bindings(&keys);
        tracing::debug!(applied, total = keys.len(), "keybindings applied to editor");
    }

    /// Merges `request.patch` into the live mapping and runs the update
    /// protocol. Returns the changed keys in mapping order.
    ///
    /// Patch keys the mapping doesn't know are ignored. Persisting and
    /// notifying happen even when nothing changed.
    pub async fn update(&mut self, request: impl Into<UpdateRequest>) -> Result<Vec<BindingKey>> {
        let UpdateRequest {
            patch,
            notify,
            persist,
        } = request.into();

        if let Some(patch) = patch {
            let ignored = binding::apply_patch(&mut self.current, &patch);
            if !ignored.is_empty() {
                tracing::debug!(keys = ?ignored, "unknown keybindings ignored");
            }
        }

        self.run_update(notify, persist).await
    }

    /// Restores the given keys to their defaults, or every key when `keys` is
    /// empty, then fires `reset` listeners with the whole mapping.
    pub async fn reset<I, K>(&mut self, keys: I) -> Result<Vec<BindingKey>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut keys = keys.into_iter().peekable();
        if keys.peek().is_none() {
            return self.reset_all().await;
        }

        for key in keys {
            let key = key.as_ref();
            match self.defaults.get(key) {
                Some(default) => {
                    self.current.insert(key.to_string(), default.clone());
                }
                None => tracing::debug!(key, "reset of unknown keybinding ignored"),
            }
        }

        let changed = self.run_update(false, true).await?;
        self.listeners.dispatch_reset(&self.current)?;
        Ok(changed)
    }

    pub async fn reset_all(&mut self) -> Result<Vec<BindingKey>> {
        let defaults = self.defaults.clone();
        self.reset_to(defaults).await
    }

    async fn reset_to(&mut self, source: BindingMap) -> Result<Vec<BindingKey>> {
        self.current = source;
        let changed = self.run_update(false, true).await?;
        self.listeners.dispatch_reset(&self.current)?;
        Ok(changed)
    }

    async fn run_update(&mut self, notify: bool, persist: bool) -> Result<Vec<BindingKey>> {
        let changed = binding::changed_keys(self.persisted.as_ref(), &self.current);
        if !changed.is_empty() {
            tracing::debug!(keys = ?changed, "keybindings changed");
        }

        for key in &changed {
            let Some(value) = self.current.get(key.as_str()) else {
                continue;
            };
            self.listeners.dispatch_binding(Phase::Before, key, value)?;
        }

        self.apply_bindings(&changed);

        if persist {
            self.save().await?;
        }

        if notify {
            self.notifier.notify(&self.config.updated_message);
        }

        for key in &changed {
            let Some(value) = self.current.get(key.as_str()) else {
                continue;
            };
            self.listeners.dispatch_binding(Phase::After, key, value)?;
        }

        Ok(changed)
    }

    /// Re-registers the editor commands named by `keys` with their current
    /// shortcut merged in. Keys without a command or a usable shortcut are
    /// skipped. Returns how many commands were registered.
    pub fn apply_bindings<I, K>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let Some(editor) = self.editor.as_mut() else {
            tracing::trace!("no editor attached, skip command sync");
            return 0;
        };

        let mut applied = 0;
        for key in keys {
            let key = key.as_ref();
            let Some(command) = editor.command(key) else {
                tracing::trace!(key, "no command registered");
                continue;
            };
            let Some(shortcut) = self.current.get(key).and_then(normalize_shortcut) else {
                tracing::trace!(key, "no shortcut configured");
                continue;
            };
            let merged = merge_command(command, shortcut);
            editor.add_command(merged);
            applied += 1;
        }
        applied
    }

    async fn save(&mut self) -> Result<()> {
        let text = to_json_text(&self.current)?;
        if !self.storage.exists().await {
            self.storage.create().await?;
        }
        self.storage.write(&text).await?;
        self.persisted = Some(self.current.clone());
        tracing::debug!(bindings = self.current.len(), "keybindings persisted");
        Ok(())
    }
}

fn to_json_text(bindings: &BindingMap) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    bindings.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
