//! Undo, redo and the entered-command log.

use crate::command::{Command, CommandOutcome, CommandResult};
use crate::service::model_manager::ModelManager;

/// Raw command lines entered this session, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one entered line. Blank lines are skipped.
    pub fn add(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.trim().is_empty() {
            self.entries.push(line);
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Restores the previous committed diary state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoCommand;

impl UndoCommand {
    pub const WORD: &'static str = "undo";
}

impl Command for UndoCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        model.undo_food_diary()?;
        Ok(CommandOutcome::message("Undo success!"))
    }
}

/// Re-applies the most recently undone state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedoCommand;

impl RedoCommand {
    pub const WORD: &'static str = "redo";
}

impl Command for RedoCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        model.redo_food_diary()?;
        Ok(CommandOutcome::message("Redo success!"))
    }
}

/// Lists entered command lines, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub const WORD: &'static str = "history";
}

impl Command for HistoryCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        _model: &mut ModelManager,
        history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        if history.is_empty() {
            return Ok(CommandOutcome::message(
                "You have not yet entered any commands.",
            ));
        }
        let lines: Vec<&str> = history.entries().iter().rev().map(String::as_str).collect();
        Ok(CommandOutcome::message(format!(
            "Entered commands (from most recent to earliest):\n{}",
            lines.join("\n")
        )))
    }
}
