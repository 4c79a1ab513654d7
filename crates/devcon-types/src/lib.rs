//! Foundation types for devcon.
//!
//! This crate contains the types shared by every devcon crate: the error
//! enum, output severities and their display tints, and console
//! configuration.

pub mod config;
pub mod error;
pub mod severity;

pub use config::ConsoleConfig;
pub use error::{ConsoleError, Result};
pub use severity::{Severity, Tint};
