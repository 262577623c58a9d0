//! 默认快捷键与内存命令表

use crate::core::binding::BindingMap;
use crate::core::command::{
    command_name, merge_command, CommandRecord, BIND_KEY_FIELD, COMMAND_NAME_FIELD,
    PLATFORM_MAC, PLATFORM_WIN,
};
use crate::kernel::services::ports::editor::{CommandTable, Notifier};
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

fn bind(win: &str, mac: &str) -> Value {
    let mut platforms = Map::new();
    platforms.insert(PLATFORM_WIN.to_string(), Value::from(win));
    platforms.insert(PLATFORM_MAC.to_string(), Value::from(mac));

    let mut descriptor = Map::new();
    descriptor.insert(BIND_KEY_FIELD.to_string(), Value::Object(platforms));
    Value::Object(descriptor)
}

/// Built-in bindings shipped with the editor.
pub fn default_keybindings() -> BindingMap {
    let mut bindings = BindingMap::new();

    bindings.insert("save".into(), bind("Ctrl-S", "Command-S"));
    bindings.insert("saveAs".into(), bind("Ctrl-Shift-S", "Command-Shift-S"));
    bindings.insert("closeTab".into(), bind("Ctrl-W", "Command-W"));
    bindings.insert("nextTab".into(), bind("Ctrl-Tab", "Ctrl-Tab"));
    bindings.insert("prevTab".into(), bind("Ctrl-Shift-Tab", "Ctrl-Shift-Tab"));
    bindings.insert("quit".into(), bind("Ctrl-Q", "Command-Q"));

    bindings.insert("undo".into(), bind("Ctrl-Z", "Command-Z"));
    bindings.insert("redo".into(), bind("Ctrl-Y", "Command-Shift-Z"));
    bindings.insert("selectAll".into(), bind("Ctrl-A", "Command-A"));
    bindings.insert("duplicateLine".into(), bind("Ctrl-Shift-D", "Command-Shift-D"));
    bindings.insert("removeLine".into(), bind("Ctrl-Shift-K", "Command-Shift-K"));
    bindings.insert("toggleComment".into(), bind("Ctrl-/", "Command-/"));

    bindings.insert("find".into(), bind("Ctrl-F", "Command-F"));
    bindings.insert("findNext".into(), bind("F3", "Command-G"));
    bindings.insert("findPrev".into(), bind("Shift-F3", "Command-Shift-G"));
    bindings.insert("replace".into(), bind("Ctrl-H", "Command-Option-F"));
    bindings.insert("gotoLine".into(), bind("Ctrl-G", "Command-L"));

    bindings.insert("commandPalette".into(), bind("Ctrl-Shift-P", "Command-Shift-P"));
    bindings.insert("toggleSidebar".into(), bind("Ctrl-B", "Command-B"));
    bindings.insert("openSettings".into(), bind("Ctrl-,", "Command-,"));

    bindings
}

/// Command table kept in memory, keyed by command name.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCommandTable {
    commands: FxHashMap<String, CommandRecord>,
}

impl InMemoryCommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One command per binding: `{ "name": <key> }` merged with its descriptor.
    pub fn from_bindings(bindings: &BindingMap) -> Self {
        let mut table = Self::new();
        for (name, descriptor) in bindings {
            let mut record = CommandRecord::new();
            record.insert(COMMAND_NAME_FIELD.to_string(), Value::from(name.as_str()));
            let record = match descriptor {
                Value::Object(fields) => merge_command(&record, fields.clone()),
                _ => record,
            };
            table.add_command(record);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl CommandTable for InMemoryCommandTable {
    fn command(&self, name: &str) -> Option<&CommandRecord> {
        self.commands.get(name)
    }

    fn add_command(&mut self, record: CommandRecord) {
        let Some(name) = command_name(&record).map(str::to_string) else {
            tracing::warn!("command record without a name ignored");
            return;
        };
        self.commands.insert(name, record);
    }
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(message, "notify");
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
