//! Bridge from the `log` facade into the console.
//!
//! Installed as the global logger, [`ConsoleLogger`] posts every record to
//! the console output (error, warning, or info tint) and optionally
//! forwards it to an inner logger such as `env_logger`. Records emitted by
//! this crate are only forwarded to the inner logger so the console never
//! logs about its own logging.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use devcon_types::Severity;

use crate::pipeline::OutputSink;

const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// A `log::Log` implementation that writes into a console.
pub struct ConsoleLogger {
    sink: OutputSink,
    level: LevelFilter,
    inner: Option<Box<dyn Log>>,
}

impl ConsoleLogger {
    /// Forward records at `level` or more severe into `sink`.
    pub fn new(sink: OutputSink, level: LevelFilter) -> Self {
        Self {
            sink,
            level,
            inner: None,
        }
    }

    /// Also pass every record to `inner`.
    pub fn with_inner(mut self, inner: Box<dyn Log>) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Install as the process-wide logger.
    pub fn install(self, max_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }

    fn forwards_to_console(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && !metadata.target().starts_with(OWN_TARGET)
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.forwards_to_console(metadata)
            || self.inner.as_ref().is_some_and(|inner| inner.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        if self.forwards_to_console(record.metadata()) {
            self.sink
                .log_with(Severity::from(record.level()), record.args().to_string());
        }
        if let Some(inner) = &self.inner {
            inner.log(record);
        }
    }

    fn flush(&self) {
        if let Some(inner) = &self.inner {
            inner.flush();
        }
    }
}
