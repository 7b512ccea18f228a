//! An ordered command sink with a side channel for compile-time warnings.

use crate::commands::Command;

/// A diagnostic raised during compilation; surfaced to the caller alongside
/// the command stream instead of aborting the compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    /// The raw template text the warning refers to, when available.
    pub context: String,
}

#[derive(Debug, Default)]
pub struct PushStream {
    commands: Vec<Command>,
    warnings: Vec<Warning>,
}

impl PushStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn warn(&mut self, message: impl Into<String>, context: impl Into<String>) {
        let warning = Warning {
            message: message.into(),
            context: context.into(),
        };
        log::warn!("{} ({})", warning.message, warning.context);
        self.warnings.push(warning);
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}
