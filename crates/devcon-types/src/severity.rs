//! Output severities and the tint each one is drawn with.

/// An RGBA display tint attached to every character in the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    /// Create an opaque tint.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const INFO: Self = Self::rgb(230, 230, 230);
    pub const WARNING: Self = Self::rgb(255, 210, 80);
    pub const ERROR: Self = Self::rgb(255, 96, 96);
}

impl Default for Tint {
    fn default() -> Self {
        Self::INFO
    }
}

/// How serious a piece of console output is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    /// The tint the presentation layer draws this severity with.
    pub fn tint(self) -> Tint {
        match self {
            Severity::Info => Tint::INFO,
            Severity::Warning => Tint::WARNING,
            Severity::Error => Tint::ERROR,
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            _ => Severity::Info,
        }
    }
}
