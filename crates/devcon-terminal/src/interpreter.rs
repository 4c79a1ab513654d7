//! Command trait and registry.
//!
//! Names are stored lowercased; lookups are case-insensitive. A name that
//! is empty or contains whitespace is rejected, as is any name that
//! collides with one already registered (the first registration wins).

use std::collections::HashMap;
use std::sync::Arc;

use devcon_types::error::{ConsoleError, Result};

use crate::pipeline::OutputSink;

/// Where a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandKind {
    /// On whichever thread submitted it.
    #[default]
    Direct,
    /// Queued and run during the next [`Console::tick`](crate::Console::tick).
    Deferred,
}

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Command produced no visible output.
    None,
    /// Text logged at info severity.
    Text(String),
    /// Signal to clear the output buffer.
    Clear,
    /// Signal to rebuild the registry from the command catalog.
    Reload,
    /// Signal to allow or forbid cheat commands.
    Cheats {
        enable: bool,
    },
}

/// What a running command can see.
pub struct CommandContext<'a> {
    /// The registry snapshot the command was resolved from.
    pub registry: &'a CommandRegistry,
    /// Console output channels.
    pub output: &'a OutputSink,
}

/// A single executable command.
pub trait Command: Send + Sync {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn help(&self) -> &str;

    /// Usage string (e.g. "help \[command\]").
    fn usage(&self) -> &str {
        self.name()
    }

    /// Whether this command runs on the caller or the console's own thread.
    fn kind(&self) -> CommandKind {
        CommandKind::Direct
    }

    /// Cheat commands only run once cheats are enabled.
    fn is_cheat(&self) -> bool {
        false
    }

    /// Execute the command with the given arguments.
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
    names: Vec<String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a catalog, returning the rejected registrations
    /// alongside it.
    pub fn from_commands(
        commands: impl IntoIterator<Item = Box<dyn Command>>,
    ) -> (Self, Vec<ConsoleError>) {
        let mut registry = Self::new();
        let errors = registry.reload(commands);
        (registry, errors)
    }

    /// Register a command. Invalid or duplicate names are rejected and the
    /// registry is left unchanged.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        let name = cmd.name();
        if name.contains(['\n', '\r']) {
            return Err(ConsoleError::InvalidName {
                name: name.to_string(),
                reason: "NewLine",
            });
        }
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(ConsoleError::InvalidName {
                name: name.to_string(),
                reason: "whitespace",
            });
        }

        let key = name.to_lowercase();
        if self.commands.contains_key(&key) {
            return Err(ConsoleError::DuplicateName(key));
        }

        let pos = self.names.binary_search(&key).unwrap_or_else(|p| p);
        self.names.insert(pos, key.clone());
        self.commands.insert(key, Arc::from(cmd));
        Ok(())
    }

    /// Drop every command and register `commands` in order. Returns the
    /// registrations that were rejected.
    pub fn reload(
        &mut self,
        commands: impl IntoIterator<Item = Box<dyn Command>>,
    ) -> Vec<ConsoleError> {
        self.commands.clear();
        self.names.clear();

        let mut errors = Vec::new();
        for cmd in commands {
            if let Err(e) = self.register(cmd) {
                log::warn!("{e}");
                errors.push(e);
            }
        }
        self.names.sort();
        errors
    }

    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(&name.to_lowercase()).cloned()
    }

    /// Sorted, lowercased names of every registered command.
    pub fn all_names(&self) -> Vec<String> {
        self.names.clone()
    }

    /// Borrow the sorted name listing.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.names.iter().filter_map(|n| self.commands.get(n))
    }
}

/// `Usage: name [a] [b]` line for a command's arguments.
pub fn usage_line(name: &str, arg_names: &[&str]) -> String {
    let mut out = format!("Usage: {name}");
    for arg in arg_names {
        out.push_str(&format!(" [{arg}]"));
    }
    out
}

/// True for "true" (any case) or an integer greater than zero.
pub fn argument_is_true(arg: &str) -> bool {
    arg.eq_ignore_ascii_case("true") || arg.parse::<i64>().is_ok_and(|n| n > 0)
}

/// Parse `arg` as an integer within `min..=max`.
pub fn argument_in_range(arg: &str, min: i64, max: i64) -> Option<i64> {
    arg.parse::<i64>()
        .ok()
        .filter(|n| (min..=max).contains(n))
}
