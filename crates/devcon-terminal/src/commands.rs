//! Built-in console commands.

use devcon_types::error::Result;

use crate::interpreter::{
    Command, CommandContext, CommandKind, CommandOutput, argument_is_true, usage_line,
};

/// The default catalog: every built-in command, freshly constructed.
pub fn builtin_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(HelpCmd),
        Box::new(ListCmd),
        Box::new(FindCmd),
        Box::new(PrintCmd),
        Box::new(ClearCmd),
        Box::new(ReloadCmd),
        Box::new(EnableCheatsCmd),
    ]
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn help(&self) -> &str {
        "Print the help message for a command to the console."
    }
    fn usage(&self) -> &str {
        "help [command]"
    }
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        let Some(&target) = args.first() else {
            return Ok(CommandOutput::Text(usage_line(self.name(), &["command"])));
        };
        match ctx.registry.find(target) {
            Some(cmd) => Ok(CommandOutput::Text(format!(
                "'{}' - {}\n  Usage: {}",
                cmd.name(),
                cmd.help(),
                cmd.usage()
            ))),
            None => Ok(CommandOutput::Text(format!(
                "Command '{target}' could not be found."
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

struct ListCmd;
impl Command for ListCmd {
    fn name(&self) -> &str {
        "list"
    }
    fn help(&self) -> &str {
        "Print all available console commands."
    }
    fn execute(&self, _args: &[&str], ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        let mut out = String::new();
        for name in ctx.registry.names() {
            out.push_str(name);
            out.push('\n');
        }
        Ok(CommandOutput::Text(out))
    }
}

// ---------------------------------------------------------------------------
// find
// ---------------------------------------------------------------------------

struct FindCmd;
impl Command for FindCmd {
    fn name(&self) -> &str {
        "find"
    }
    fn help(&self) -> &str {
        "Search all command names and help messages that contain the specified text."
    }
    fn usage(&self) -> &str {
        "find [text]"
    }
    fn execute(&self, args: &[&str], ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::Text(usage_line(self.name(), &["text"])));
        }
        let query = args.join(" ").to_lowercase();

        let mut out = String::new();
        for cmd in ctx.registry.iter() {
            if cmd.name().to_lowercase().contains(&query)
                || cmd.help().to_lowercase().contains(&query)
            {
                out.push_str(cmd.name());
                out.push('\n');
            }
        }
        if out.is_empty() {
            out = format!("No commands found from query '{query}'");
        }
        Ok(CommandOutput::Text(out))
    }
}

// ---------------------------------------------------------------------------
// print
// ---------------------------------------------------------------------------

struct PrintCmd;
impl Command for PrintCmd {
    fn name(&self) -> &str {
        "print"
    }
    fn help(&self) -> &str {
        "Print a message to the console."
    }
    fn usage(&self) -> &str {
        "print [text]"
    }
    fn execute(&self, args: &[&str], _ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::Text(usage_line(self.name(), &["text"])));
        }
        Ok(CommandOutput::Text(args.join(" ")))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

/// Runs on the console thread, which owns the output buffer.
struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn help(&self) -> &str {
        "Clear the console of all text."
    }
    fn kind(&self) -> CommandKind {
        CommandKind::Deferred
    }
    fn execute(&self, _args: &[&str], _ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// reload
// ---------------------------------------------------------------------------

struct ReloadCmd;
impl Command for ReloadCmd {
    fn name(&self) -> &str {
        "reload"
    }
    fn help(&self) -> &str {
        "Rebuild the command list from the command catalog."
    }
    fn execute(&self, _args: &[&str], _ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Reload)
    }
}

// ---------------------------------------------------------------------------
// enable_cheats
// ---------------------------------------------------------------------------

struct EnableCheatsCmd;
impl Command for EnableCheatsCmd {
    fn name(&self) -> &str {
        "enable_cheats"
    }
    fn help(&self) -> &str {
        "Enable or disable the execution of cheat console commands."
    }
    fn usage(&self) -> &str {
        "enable_cheats [enable]"
    }
    fn execute(&self, args: &[&str], _ctx: &mut CommandContext<'_>) -> Result<CommandOutput> {
        match args.first() {
            Some(arg) => Ok(CommandOutput::Cheats {
                enable: argument_is_true(arg),
            }),
            None => Ok(CommandOutput::Text(usage_line(self.name(), &["enable"]))),
        }
    }
}
