//! Commands owned by the host rather than the console core.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use devcon_terminal::{
    Command, CommandContext, CommandKind, CommandOutput, argument_in_range, builtin_commands,
    usage_line,
};
use devcon_types::{ConsoleError, Result};

/// Built-ins plus the host's own commands.
pub fn catalog(quit: Arc<AtomicBool>) -> impl Fn() -> Vec<Box<dyn Command>> + Send + 'static {
    move || {
        let mut cmds = builtin_commands();
        cmds.push(Box::new(QuitCmd {
            flag: Arc::clone(&quit),
        }));
        cmds.push(Box::new(SpawnCmd));
        cmds
    }
}

// ---------------------------------------------------------------------------
// quit
// ---------------------------------------------------------------------------

struct QuitCmd {
    flag: Arc<AtomicBool>,
}

impl Command for QuitCmd {
    fn name(&self) -> &str {
        "quit"
    }
    fn help(&self) -> &str {
        "Exit the host after the current tick."
    }
    fn execute(&self, _args: &[&str], _ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        self.flag.store(true, Ordering::Release);
        Ok(CommandOutput::Text("Shutting down.".to_string()))
    }
}

// ---------------------------------------------------------------------------
// spawn
// ---------------------------------------------------------------------------

const MAX_SPAWN: i64 = 64;

/// Touches world state, so it runs on the ticking thread.
struct SpawnCmd;

impl Command for SpawnCmd {
    fn name(&self) -> &str {
        "spawn"
    }
    fn help(&self) -> &str {
        "Spawn test entities at the origin."
    }
    fn usage(&self) -> &str {
        "spawn [count]"
    }
    fn kind(&self) -> CommandKind {
        CommandKind::Deferred
    }
    fn is_cheat(&self) -> bool {
        true
    }
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        let Some(&arg) = args.first() else {
            return Ok(CommandOutput::Text(usage_line(self.name(), &["count"])));
        };
        let count = argument_in_range(arg, 1, MAX_SPAWN).ok_or_else(|| {
            ConsoleError::Command(format!("count must be between 1 and {MAX_SPAWN}, got '{arg}'"))
        })?;
        for i in 0..count {
            ctx.output.log(format!("  entity #{i} at (0, 0)"));
        }
        Ok(CommandOutput::Text(format!("Spawned {count} entities.")))
    }
}
