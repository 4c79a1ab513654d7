//! devcon terminal host.
//!
//! Stands in for a game's render loop: reads lines from stdin, ticks the
//! console at the configured cadence, and paints newly appended output to
//! stdout in its severity colours. A background thread logs through the
//! `log` facade to show output arriving from other threads.
//! Type `list` for commands, a partial name followed by `?` for completions,
//! and `quit` or end-of-input to exit.

mod host_commands;
mod render;

use std::io::{self, BufRead};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::LevelFilter;

use devcon_terminal::{Console, ConsoleLogger};
use devcon_types::ConsoleConfig;

fn main() -> Result<()> {
    let inner =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let max_level = inner.filter();

    // Resolve config from CLI arg or DEVCON_CONFIG, else defaults.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DEVCON_CONFIG").ok())
    {
        Some(path) => ConsoleConfig::load(&path)
            .with_context(|| format!("loading console config from {path}"))?,
        None => ConsoleConfig::default(),
    };
    let tick = Duration::from_millis(config.tick_interval_ms);

    let quit = Arc::new(AtomicBool::new(false));
    let mut console = Console::new(config, host_commands::catalog(Arc::clone(&quit)));
    ConsoleLogger::new(console.sink(), LevelFilter::Info)
        .with_inner(Box::new(inner))
        .install(max_level)
        .context("installing console logger")?;
    log::info!(
        "Starting devcon ({} char buffer, {}ms tick)",
        console.config().buffer_capacity,
        console.config().tick_interval_ms,
    );

    spawn_loader();
    let lines = spawn_stdin_reader();
    let mut stdout = io::stdout();

    'running: loop {
        loop {
            match lines.try_recv() {
                Ok(line) => match completion_query(&line) {
                    Some(partial) => show_suggestions(&console, partial),
                    None => console.submit(&line),
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    quit.store(true, Ordering::Release);
                    break;
                },
            }
        }

        let appended = console.tick();
        if appended > 0 {
            let runs = render::tail_runs(console.buffer(), appended);
            render::write_ansi(&mut stdout, &runs).context("writing console output")?;
        }

        if quit.load(Ordering::Acquire) {
            break 'running;
        }
        thread::sleep(tick);
    }

    log::info!("Shutting down devcon");
    Ok(())
}

/// A bare partial command name followed by `?`, such as `he?`. Lines with
/// arguments are ordinary submissions even when they end in `?`.
fn completion_query(line: &str) -> Option<&str> {
    let partial = line.trim().strip_suffix('?')?;
    (!partial.is_empty() && !partial.contains(char::is_whitespace)).then_some(partial)
}

fn show_suggestions(console: &Console, partial: &str) {
    let found = console.suggest(partial, 0, console.config().suggestion_count);
    let sink = console.sink();
    if found.is_empty() {
        sink.log_warning(format!("No commands match '{partial}'"));
    } else {
        sink.log(found.join("  "));
    }
}

/// Forward stdin lines to the main loop. The channel closes at end of input.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Simulated asset loading reporting through `log`, off the main thread.
fn spawn_loader() {
    thread::spawn(|| {
        for (i, asset) in ["textures", "sounds", "levels"].iter().enumerate() {
            thread::sleep(Duration::from_millis(50 * (i as u64 + 1)));
            log::info!("Loaded {asset}");
        }
        log::warn!("Shader cache missing, rebuilding");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_partial_name_is_completion_query() {
        assert_eq!(completion_query("he?"), Some("he"));
        assert_eq!(completion_query("  li?  "), Some("li"));
    }

    #[test]
    fn question_with_arguments_is_submitted() {
        assert_eq!(completion_query("print are you there?"), None);
        assert_eq!(completion_query("he ?"), None);
    }

    #[test]
    fn lone_question_mark_or_plain_line_is_submitted() {
        assert_eq!(completion_query("?"), None);
        assert_eq!(completion_query("list"), None);
        assert_eq!(completion_query(""), None);
    }
}
