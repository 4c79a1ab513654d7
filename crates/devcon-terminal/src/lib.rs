//! Embedded developer console core.
//!
//! Commands implement the [`Command`] trait and are collected into a
//! [`CommandRegistry`] from a catalog. Input lines are parsed, resolved by
//! name, and either run on the submitting thread or deferred to the
//! console's own thread. Output from any thread flows through a
//! double-buffered [`OutputPipeline`] into a bounded [`TextRing`] that the
//! host renders once per tick.

mod commands;
mod console;
mod dispatch;
mod history;
mod interpreter;
pub mod logger;
pub mod parser;
mod pipeline;
mod ring;
pub mod suggest;

/// The default command catalog (help, list, find, print, clear, reload, enable_cheats).
pub use commands::builtin_commands;
/// The console and its thread-safe handle.
pub use console::{Catalog, Console, ConsoleHandle};
/// Submission history with recall.
pub use history::History;
/// Command trait, registry, and authoring helpers.
pub use interpreter::{
    Command, CommandContext, CommandKind, CommandOutput, CommandRegistry, argument_in_range,
    argument_is_true, usage_line,
};
/// `log` facade bridge.
pub use logger::ConsoleLogger;
/// Line parsing.
pub use parser::{ParsedInvocation, parse};
/// Output queueing between producers and the tick.
pub use pipeline::{LogEntry, OutputDrain, OutputPipeline, OutputSink};
/// Bounded output buffer.
pub use ring::{Runs, TextRing};
/// Autocomplete.
pub use suggest::{SuggestionCursor, suggest};

pub use devcon_types::{ConsoleConfig, ConsoleError, Severity, Tint};
