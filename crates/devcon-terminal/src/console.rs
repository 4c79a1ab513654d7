//! The console: one owned instance tying registry, pipeline, and buffer
//! together.
//!
//! [`Console`] lives on the designated thread (usually the render loop) and
//! owns the output buffer. [`ConsoleHandle`] is the cheap, thread-safe
//! side used by producers to post output and submit lines.

use std::sync::Arc;

use devcon_types::ConsoleConfig;

use crate::commands::builtin_commands;
use crate::dispatch::{Deferred, Shared, Signal};
use crate::history::History;
use crate::interpreter::{Command, CommandRegistry};
use crate::pipeline::{LogEntry, OutputDrain, OutputPipeline, OutputSink};
use crate::ring::TextRing;
use crate::suggest::suggest;

/// Supplies the full command set each time the registry is (re)built.
pub type Catalog = Box<dyn Fn() -> Vec<Box<dyn Command>> + Send>;

/// An embedded developer console.
pub struct Console {
    config: ConsoleConfig,
    shared: Arc<Shared>,
    catalog: Catalog,
    ring: TextRing,
    drain: OutputDrain,
    history: History,
}

impl Console {
    /// Create a console and load its commands from `catalog`.
    pub fn new<F>(config: ConsoleConfig, catalog: F) -> Self
    where
        F: Fn() -> Vec<Box<dyn Command>> + Send + 'static,
    {
        let sink = OutputSink::new(Arc::new(OutputPipeline::new()));
        let mut console = Self {
            ring: TextRing::new(config.buffer_capacity),
            history: History::new(config.history_limit),
            shared: Arc::new(Shared::new(sink, config.allow_cheats)),
            catalog: Box::new(catalog),
            drain: OutputDrain::new(),
            config,
        };
        console.reload();
        console
    }

    /// Create a console with only the built-in commands.
    pub fn with_builtins(config: ConsoleConfig) -> Self {
        Self::new(config, builtin_commands)
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// A thread-safe handle for producers.
    pub fn handle(&self) -> ConsoleHandle {
        ConsoleHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Output channels for this console.
    pub fn sink(&self) -> OutputSink {
        self.shared.sink.clone()
    }

    /// Rebuild the registry from the catalog, reporting rejected commands
    /// on the error channel. Returns how many commands were loaded.
    pub fn reload(&mut self) -> usize {
        let (registry, errors) = CommandRegistry::from_commands((self.catalog)());
        let sink = &self.shared.sink;
        for e in &errors {
            sink.log_error(e.to_string());
        }

        let count = registry.len();
        self.shared.replace_registry(registry);
        log::info!("{count} console commands loaded, {} rejected", errors.len());
        sink.log(format!("{count} commands loaded."));
        count
    }

    /// Submit a line typed into the console input.
    ///
    /// Records it in history, echoes it when configured to, then dispatches.
    pub fn submit(&mut self, line: &str) {
        self.history.push(line);
        let trimmed = line.trim();
        if self.config.echo_input && !trimmed.is_empty() {
            self.shared.sink.log(format!("] {trimmed}"));
        }
        self.shared.submit(line);
    }

    /// Run one cadence step: execute deferred work, then move pending
    /// output into the buffer. Returns the number of characters appended.
    pub fn tick(&mut self) -> usize {
        let mut appended = 0;
        for work in self.shared.sink.pipeline().take_deferred() {
            let signal = match work {
                Deferred::Call(call) => self.shared.run_call(call),
                Deferred::Signal(signal) => Some(signal),
            };
            match signal {
                Some(Signal::Clear) => {
                    // Output posted before the clear is cleared with it.
                    appended += self.drain.drain_tick(self.shared.sink.pipeline(), &mut self.ring);
                    self.ring.clear();
                },
                Some(Signal::Reload) => {
                    self.reload();
                },
                None => {},
            }
        }
        appended + self.drain.drain_tick(self.shared.sink.pipeline(), &mut self.ring)
    }

    /// The output buffer, for rendering.
    pub fn buffer(&self) -> &TextRing {
        &self.ring
    }

    /// The buffer's contents as a string.
    pub fn text(&self) -> String {
        self.ring.text()
    }

    /// Empty the output buffer immediately.
    pub fn clear(&mut self) {
        self.ring.clear();
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn all_names(&self) -> Vec<String> {
        self.shared.registry().all_names()
    }

    pub fn find(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.shared.registry().find(name)
    }

    /// Suggestions for `text` against the current command names.
    pub fn suggest(&self, text: &str, skip: usize, count: usize) -> Vec<String> {
        suggest(self.shared.registry().names(), text, skip, count)
    }

    pub fn cheats_enabled(&self) -> bool {
        self.shared.cheats_enabled()
    }
}

/// Thread-safe access to a [`Console`] from any thread.
#[derive(Clone)]
pub struct ConsoleHandle {
    shared: Arc<Shared>,
}

impl ConsoleHandle {
    /// Output channels for this console.
    pub fn sink(&self) -> OutputSink {
        self.shared.sink.clone()
    }

    /// Queue an entry for the next tick.
    pub fn post(&self, entry: LogEntry) {
        self.shared.sink.post(entry);
    }

    /// Parse and dispatch a line. Direct commands run on this thread.
    pub fn submit(&self, line: &str) {
        self.shared.submit(line);
    }

    /// Run a command by name with pre-split arguments.
    pub fn execute(&self, name: &str, args: &[&str]) {
        self.shared
            .execute(name, args.iter().map(|a| a.to_string()).collect());
    }

    /// Queue `command` to run on the console's thread at the next tick.
    pub fn execute_deferred(&self, command: Arc<dyn Command>, args: Vec<String>) {
        self.shared.execute_deferred(command, args);
    }

    pub fn all_names(&self) -> Vec<String> {
        self.shared.registry().all_names()
    }

    pub fn find(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.shared.registry().find(name)
    }

    /// Snapshot of the current registry.
    pub fn registry(&self) -> Arc<CommandRegistry> {
        self.shared.registry()
    }

    /// Suggestions for `text` against the current command names.
    pub fn suggest(&self, text: &str, skip: usize, count: usize) -> Vec<String> {
        suggest(self.shared.registry().names(), text, skip, count)
    }

    pub fn cheats_enabled(&self) -> bool {
        self.shared.cheats_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{CommandContext, CommandKind, CommandOutput};
    use devcon_types::{Result, Severity, Tint};
    use std::thread;

    fn quiet_config() -> ConsoleConfig {
        ConsoleConfig {
            echo_input: false,
            ..ConsoleConfig::default()
        }
    }

    /// Console with the load report already drained and cleared.
    fn fresh(config: ConsoleConfig) -> Console {
        let mut console = Console::with_builtins(config);
        console.tick();
        console.clear();
        console
    }

    struct Spawn;
    impl Command for Spawn {
        fn name(&self) -> &str {
            "spawn"
        }
        fn help(&self) -> &str {
            "Spawn an entity on the scene thread"
        }
        fn kind(&self) -> CommandKind {
            CommandKind::Deferred
        }
        fn execute(&self, args: &[&str], _: &mut CommandContext<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::Text(format!(
                "spawned {} on {:?}",
                args.first().unwrap_or(&"?"),
                thread::current().name()
            )))
        }
    }

    #[test]
    fn list_on_reloaded_registry() {
        let catalog = || -> Vec<Box<dyn Command>> {
            builtin_commands()
                .into_iter()
                .filter(|c| c.name() == "list" || c.name() == "help")
                .collect()
        };
        let mut console = Console::new(quiet_config(), catalog);
        console.tick();
        assert_eq!(console.text(), "2 commands loaded.\n");
        console.clear();

        console.submit("list");
        console.tick();
        assert_eq!(console.text(), "help\nlist\n");
        assert!(console.buffer().tints().iter().all(|t| *t == Tint::INFO));
    }

    #[test]
    fn load_report_counts_builtins() {
        let mut console = Console::with_builtins(quiet_config());
        console.tick();
        let expected = format!("{} commands loaded.\n", builtin_commands().len());
        assert_eq!(console.text(), expected);
    }

    #[test]
    fn rejected_commands_reported_as_errors() {
        struct Bad;
        impl Command for Bad {
            fn name(&self) -> &str {
                "bad name"
            }
            fn help(&self) -> &str {
                ""
            }
            fn execute(&self, _: &[&str], _: &mut CommandContext<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::None)
            }
        }
        let mut console = Console::new(quiet_config(), || vec![Box::new(Bad) as Box<dyn Command>]);
        console.tick();
        let text = console.text();
        assert!(text.starts_with("Command 'bad name' contains invalid whitespace"));
        assert!(text.ends_with("0 commands loaded.\n"));
        assert_eq!(console.buffer().tints()[0], Severity::Error.tint());
        assert!(console.all_names().is_empty());
    }

    #[test]
    fn duplicate_differing_by_case_reported_once() {
        struct Named(&'static str);
        impl Command for Named {
            fn name(&self) -> &str {
                self.0
            }
            fn help(&self) -> &str {
                ""
            }
            fn execute(&self, _: &[&str], _: &mut CommandContext<'_>) -> Result<CommandOutput> {
                Ok(CommandOutput::None)
            }
        }
        let mut console = Console::new(quiet_config(), || -> Vec<Box<dyn Command>> {
            vec![Box::new(Named("Echo")), Box::new(Named("echo"))]
        });
        console.tick();

        let text = console.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "A command with the name 'echo' has already been loaded. Duplicate command will not be loaded.",
                "1 commands loaded.",
            ]
        );
        let error_len = lines[0].chars().count() + 1;
        let tints = console.buffer().tints();
        assert!(tints[..error_len].iter().all(|t| *t == Tint::ERROR));
        assert!(tints[error_len..].iter().all(|t| *t == Tint::INFO));
        assert_eq!(console.all_names(), vec!["echo"]);
        assert_eq!(console.find("ECHO").map(|c| c.name().to_string()), Some("Echo".to_string()));
    }

    #[test]
    fn echo_precedes_output() {
        let mut console = fresh(ConsoleConfig::default());
        console.submit("  print hi  ");
        console.tick();
        assert_eq!(console.text(), "] print hi\nhi\n");
    }

    #[test]
    fn submit_records_history() {
        let mut console = fresh(quiet_config());
        console.submit("print a");
        console.submit("   ");
        console.submit("list");
        assert_eq!(console.history().iter().collect::<Vec<_>>(), vec!["list", "print a"]);
    }

    #[test]
    fn unknown_command_is_error_line() {
        let mut console = fresh(quiet_config());
        console.submit("nope");
        console.tick();
        assert_eq!(console.text(), "'nope' command could not be found.\n");
        assert!(console.buffer().tints().iter().all(|t| *t == Tint::ERROR));
    }

    #[test]
    fn clear_wipes_earlier_output() {
        let mut console = fresh(ConsoleConfig::default());
        console.submit("print before");
        console.tick();
        console.submit("clear");
        console.tick();
        assert_eq!(console.text(), "");
        console.submit("print after");
        console.tick();
        assert_eq!(console.text(), "] print after\nafter\n");
    }

    #[test]
    fn reload_command_rebuilds_registry() {
        let mut console = fresh(quiet_config());
        console.submit("reload");
        assert_eq!(console.text(), "");
        console.tick();
        let expected = format!("{} commands loaded.\n", builtin_commands().len());
        assert_eq!(console.text(), expected);
    }

    #[test]
    fn cheats_follow_config() {
        let console = Console::with_builtins(ConsoleConfig {
            allow_cheats: true,
            ..quiet_config()
        });
        assert!(console.cheats_enabled());
        assert!(console.handle().cheats_enabled());
    }

    #[test]
    fn deferred_runs_on_ticking_thread() {
        let mut console = Console::new(quiet_config(), || {
            let mut commands = builtin_commands();
            commands.push(Box::new(Spawn));
            commands
        });
        console.tick();
        console.clear();

        let handle = console.handle();
        thread::Builder::new()
            .name("producer".into())
            .spawn(move || handle.submit("spawn crate"))
            .unwrap()
            .join()
            .unwrap();

        let ticker = thread::current().name().map(str::to_string);
        console.tick();
        assert_eq!(console.text(), format!("spawned crate on {ticker:?}\n"));
    }

    #[test]
    fn execute_deferred_queues_any_command() {
        let mut console = fresh(quiet_config());
        let handle = console.handle();
        let print = handle.find("print").unwrap();
        handle.execute_deferred(print, vec!["queued".to_string()]);
        assert_eq!(console.sink().pipeline().deferred_len(), 1);
        console.tick();
        assert_eq!(console.text(), "queued\n");
    }

    #[test]
    fn handle_execute_with_split_args() {
        let mut console = fresh(quiet_config());
        console.handle().execute("PRINT", &["two words", "x"]);
        console.tick();
        assert_eq!(console.text(), "two words x\n");
    }

    #[test]
    fn producers_on_many_threads() {
        let mut console = fresh(quiet_config());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let handle = console.handle();
                thread::spawn(move || {
                    for _ in 0..50 {
                        handle.post(LogEntry::new(format!("{i}"), Severity::Warning));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(console.tick(), 200);
        assert_eq!(console.buffer().len(), 200);
        assert_eq!(console.tick(), 0);
    }

    #[test]
    fn buffer_stays_bounded() {
        let mut console = fresh(ConsoleConfig {
            buffer_capacity: 64,
            ..quiet_config()
        });
        let sink = console.sink();
        for i in 0..1000 {
            sink.log(format!("line {i}"));
        }
        console.tick();
        assert_eq!(console.buffer().len(), 64);
        assert!(console.text().ends_with("line 999\n"));
    }

    #[test]
    fn suggestions_from_registry() {
        let console = fresh(quiet_config());
        assert_eq!(console.suggest("he", 0, 5), vec!["help", "enable_cheats"]);
        assert_eq!(console.handle().suggest("l", 0, 5), vec!["list"]);
        assert!(console.suggest("", 0, 5).is_empty());
    }
}
