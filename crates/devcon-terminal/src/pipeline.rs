//! Output pipeline between producer threads and the console tick.
//!
//! Producers append [`LogEntry`] values to the primary queue under a short
//! lock. Once per tick the consumer swaps the primary queue with its own
//! empty secondary queue and, with the lock released, moves every entry
//! into the [`TextRing`]. The same lock guards the deferred-work queue.

use std::collections::VecDeque;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use devcon_types::Severity;

use crate::dispatch::Deferred;
use crate::ring::TextRing;

/// One piece of output and how it should be tinted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub severity: Severity,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    /// Length in characters, the unit the ring buffer counts in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Default)]
struct Pending {
    entries: VecDeque<LogEntry>,
    deferred: VecDeque<Deferred>,
}

/// Lock-protected queues shared by producers and the consumer.
#[derive(Default)]
pub struct OutputPipeline {
    pending: Mutex<Pending>,
}

impl OutputPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an entry for the next tick. Safe from any thread.
    pub fn post(&self, entry: LogEntry) {
        self.lock().entries.push_back(entry);
    }

    /// Entries waiting for the next drain.
    pub fn pending_len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Work items waiting for the next tick.
    pub fn deferred_len(&self) -> usize {
        self.lock().deferred.len()
    }

    /// Exchange the primary queue with the consumer's queue.
    fn swap_entries(&self, secondary: &mut VecDeque<LogEntry>) {
        mem::swap(&mut self.lock().entries, secondary);
    }

    pub(crate) fn defer(&self, work: Deferred) {
        self.lock().deferred.push_back(work);
    }

    pub(crate) fn take_deferred(&self) -> VecDeque<Deferred> {
        mem::take(&mut self.lock().deferred)
    }
}

/// Consumer side of the pipeline. Owned by the thread that ticks.
#[derive(Debug, Default)]
pub struct OutputDrain {
    secondary: VecDeque<LogEntry>,
}

impl OutputDrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move everything posted so far into `ring`, oldest first. Returns the
    /// number of characters appended.
    pub fn drain_tick(&mut self, pipeline: &OutputPipeline, ring: &mut TextRing) -> usize {
        pipeline.swap_entries(&mut self.secondary);
        let mut appended = 0;
        while let Some(entry) = self.secondary.pop_front() {
            appended += entry.char_len();
            ring.append(&entry.text, entry.severity.tint());
        }
        appended
    }
}

/// Cloneable handle for writing console output from any thread.
///
/// `print*` posts text verbatim; `log*` adds a trailing newline when the
/// text lacks one.
#[derive(Clone, Default)]
pub struct OutputSink {
    pipeline: Arc<OutputPipeline>,
}

impl OutputSink {
    pub fn new(pipeline: Arc<OutputPipeline>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Arc<OutputPipeline> {
        &self.pipeline
    }

    pub fn post(&self, entry: LogEntry) {
        self.pipeline.post(entry);
    }

    pub fn print_with(&self, severity: Severity, text: impl Into<String>) {
        self.post(LogEntry::new(text, severity));
    }

    pub fn log_with(&self, severity: Severity, text: impl Into<String>) {
        let mut text = text.into();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        self.post(LogEntry::new(text, severity));
    }

    pub fn print(&self, text: impl Into<String>) {
        self.print_with(Severity::Info, text);
    }

    pub fn print_warning(&self, text: impl Into<String>) {
        self.print_with(Severity::Warning, text);
    }

    pub fn print_error(&self, text: impl Into<String>) {
        self.print_with(Severity::Error, text);
    }

    pub fn log(&self, text: impl Into<String>) {
        self.log_with(Severity::Info, text);
    }

    pub fn log_warning(&self, text: impl Into<String>) {
        self.log_with(Severity::Warning, text);
    }

    pub fn log_error(&self, text: impl Into<String>) {
        self.log_with(Severity::Error, text);
    }
}
