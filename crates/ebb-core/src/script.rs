//! Command scripts
//!
//! A script is a JSON array of command objects in the [`schema`] format.
//! Every entry is validated before anything is rendered, so a script either
//! produces its full output or an error naming the first bad entry.
//!
//! [`schema`]: crate::protocol::schema

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::protocol::{schema, Command, ValidationError};

/// Errors that can occur while loading a script
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The script file could not be read
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// The script is not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The top-level value is not an array
    #[error("Script must be a JSON array of commands")]
    NotAnArray,

    /// An entry failed validation
    #[error("Command {index}: {source}")]
    InvalidCommand {
        /// Position of the entry in the array
        index: usize,
        /// Why the entry was rejected
        #[source]
        source: ValidationError,
    },
}

/// An ordered, validated list of commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandScript {
    commands: Vec<Command>,
}

impl CommandScript {
    /// Wrap already-typed commands
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }

    /// Parse a script from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ScriptError> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    /// Load a script file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validate every entry of a parsed JSON array
    pub fn from_value(value: &Value) -> Result<Self, ScriptError> {
        let entries = value.as_array().ok_or(ScriptError::NotAnArray)?;

        let commands = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                schema::parse_command(entry).map_err(|source| {
                    tracing::warn!(index, %source, "rejected script command");
                    ScriptError::InvalidCommand { index, source }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = commands.len(), "loaded command script");
        Ok(Self { commands })
    }

    /// Append a command
    pub fn push(&mut self, command: impl Into<Command>) {
        self.commands.push(command.into());
    }

    /// Commands in order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the script has no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Command lines in order, one per command
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.commands.iter().map(Command::to_wire)
    }

    /// All command lines concatenated, ready to stream to the EBB
    pub fn render(&self) -> String {
        self.lines().collect()
    }
}

impl<'a> IntoIterator for &'a CommandScript {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SetPenState;

    #[test]
    fn test_render_concatenates_lines() {
        let script = CommandScript::from_json(
            r#"[
                {"command": "EM", "enable1": "GLOBAL_STEP_MODE_1_16", "enable2": 1},
                {"command": "SP", "value": "LOWER"},
                {"command": "QG"}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.len(), 3);
        assert_eq!(script.render(), "EM,1,1\rSP,1\rQG\r");
    }

    #[test]
    fn test_first_invalid_entry_is_reported() {
        let err = CommandScript::from_json(
            r#"[{"command": "V"}, {"command": "SP", "value": "UP"}, {"command": "XX"}]"#,
        )
        .unwrap_err();

        match err {
            ScriptError::InvalidCommand { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.field, "value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_not_an_array() {
        let err = CommandScript::from_json(r#"{"command": "V"}"#).unwrap_err();
        assert!(matches!(err, ScriptError::NotAnArray));

        let err = CommandScript::from_json("[").unwrap_err();
        assert!(matches!(err, ScriptError::JsonError(_)));
    }

    #[test]
    fn test_push() {
        let mut script = CommandScript::default();
        assert!(script.is_empty());
        script.push(SetPenState::raise());
        script.push(Command::Version);
        assert_eq!(script.render(), "SP,0\rV\r");
        assert_eq!((&script).into_iter().count(), 2);
    }
}
