use crate::core::command::CommandRecord;

/// The editor's command table, looked up by command name.
pub trait CommandTable {
    fn command(&self, name: &str) -> Option<&CommandRecord>;

    /// Registers `record`, replacing any command with the same name.
    fn add_command(&mut self, record: CommandRecord);
}

/// Receives the user-visible "updated" message. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message)
    }
}
