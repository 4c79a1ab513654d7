//! Command dispatch: direct execution on the caller's thread or deferral to
//! the console tick.
//!
//! Every command runs behind [`Shared::run_guarded`], which turns an `Err`
//! or a panic into one error line so a failing command never reaches the
//! caller or stalls the rest of the deferred queue.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use devcon_types::error::ConsoleError;

use crate::interpreter::{Command, CommandContext, CommandKind, CommandOutput, CommandRegistry};
use crate::parser::parse;
use crate::pipeline::OutputSink;

pub(crate) const CHEATS_DISABLED: &str =
    "Executing cheat commands is not enabled. Set enable_cheats 1 to allow these commands.";

/// Effects only the ticking thread may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    Clear,
    Reload,
}

/// A command invocation waiting for the tick.
pub(crate) struct DeferredCall {
    command: Arc<dyn Command>,
    args: Vec<String>,
    registry: Arc<CommandRegistry>,
}

/// Items in the deferred-work queue, run in FIFO order.
pub(crate) enum Deferred {
    Call(DeferredCall),
    Signal(Signal),
}

/// State reachable from every [`ConsoleHandle`](crate::ConsoleHandle).
pub(crate) struct Shared {
    pub(crate) sink: OutputSink,
    registry: RwLock<Arc<CommandRegistry>>,
    cheats: AtomicBool,
}

impl Shared {
    pub(crate) fn new(sink: OutputSink, allow_cheats: bool) -> Self {
        Self {
            sink,
            registry: RwLock::new(Arc::new(CommandRegistry::new())),
            cheats: AtomicBool::new(allow_cheats),
        }
    }

    /// Snapshot of the current registry.
    pub(crate) fn registry(&self) -> Arc<CommandRegistry> {
        Arc::clone(&self.registry.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Install a freshly built registry. Snapshots already handed out keep
    /// the old one alive until dropped.
    pub(crate) fn replace_registry(&self, registry: CommandRegistry) {
        *self.registry.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(registry);
    }

    pub(crate) fn cheats_enabled(&self) -> bool {
        self.cheats.load(Ordering::Acquire)
    }

    pub(crate) fn set_cheats(&self, enable: bool) -> bool {
        self.cheats.swap(enable, Ordering::AcqRel)
    }

    /// Parse a line and dispatch it.
    pub(crate) fn submit(&self, line: &str) {
        let Some(invocation) = parse(line) else {
            return;
        };
        self.execute(&invocation.name, invocation.args);
    }

    /// Resolve `name` and run or defer it.
    pub(crate) fn execute(&self, name: &str, args: Vec<String>) {
        let registry = self.registry();
        let Some(command) = registry.find(name) else {
            self.sink
                .log_error(ConsoleError::UnknownCommand(name.to_string()).to_string());
            return;
        };
        if !self.may_run(command.as_ref()) {
            return;
        }

        match command.kind() {
            CommandKind::Direct => {
                if let Some(signal) = self.run_guarded(&registry, command.as_ref(), &args) {
                    self.sink.pipeline().defer(Deferred::Signal(signal));
                }
            },
            CommandKind::Deferred => {
                log::debug!("deferring '{}'", command.name());
                self.sink.pipeline().defer(Deferred::Call(DeferredCall {
                    command,
                    args,
                    registry,
                }));
            },
        }
    }

    /// Queue `command` for the tick regardless of its kind.
    pub(crate) fn execute_deferred(&self, command: Arc<dyn Command>, args: Vec<String>) {
        if !self.may_run(command.as_ref()) {
            return;
        }
        let registry = self.registry();
        self.sink.pipeline().defer(Deferred::Call(DeferredCall {
            command,
            args,
            registry,
        }));
    }

    /// Run a queued call. Called only from the tick.
    pub(crate) fn run_call(&self, call: DeferredCall) -> Option<Signal> {
        self.run_guarded(&call.registry, call.command.as_ref(), &call.args)
    }

    fn may_run(&self, command: &dyn Command) -> bool {
        if command.is_cheat() && !self.cheats_enabled() {
            self.sink.log(CHEATS_DISABLED);
            return false;
        }
        true
    }

    fn run_guarded(
        &self,
        registry: &CommandRegistry,
        command: &dyn Command,
        args: &[String],
    ) -> Option<Signal> {
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let mut ctx = CommandContext {
            registry,
            output: &self.sink,
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| command.execute(&arg_refs, &mut ctx)));
        let failure = match result {
            Ok(Ok(output)) => return self.settle(output),
            Ok(Err(e)) => single_line(&e.to_string()),
            Err(payload) => format!("panicked: {}", single_line(&panic_message(payload.as_ref()))),
        };

        log::warn!("command '{}' failed: {failure}", command.name());
        self.sink.log_error(format!(
            "Error occurred while executing command '{}': {failure}",
            command.name()
        ));
        None
    }

    /// Apply what a command returned. Effects owned by the ticking thread
    /// are handed back as a [`Signal`].
    fn settle(&self, output: CommandOutput) -> Option<Signal> {
        match output {
            CommandOutput::None => None,
            CommandOutput::Text(text) => {
                if !text.is_empty() {
                    self.sink.log(text);
                }
                None
            },
            CommandOutput::Clear => Some(Signal::Clear),
            CommandOutput::Reload => Some(Signal::Reload),
            CommandOutput::Cheats { enable } => {
                let was = self.set_cheats(enable);
                let msg = match (was, enable) {
                    (false, true) => "Cheats enabled.",
                    (true, true) => "Cheats are already enabled.",
                    (true, false) => "Cheats disabled.",
                    (false, false) => "Cheats are already disabled.",
                };
                self.sink.log(msg);
                None
            },
        }
    }
}

/// Collapse a multi-line description into one line, joining the non-blank
/// lines with `; `.
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
