//! Error types for devcon.

use std::io;

/// Errors produced by the console core.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Command '{name}' contains invalid {reason} characters and will not be loaded.")]
    InvalidName { name: String, reason: &'static str },

    #[error(
        "A command with the name '{0}' has already been loaded. Duplicate command will not be loaded."
    )]
    DuplicateName(String),

    #[error("'{0}' command could not be found.")]
    UnknownCommand(String),

    #[error("{0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConsoleError>;
