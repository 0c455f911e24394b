//! `TerminalLogger`: Presentation-layer implementation of `Logger`.
//!
//! Wraps `&OutputContext` so application services can log without depending
//! on any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::Logger;
use crate::output::OutputContext;

/// Log severity as seen by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Error,
}

/// Terminal logger that wraps an `OutputContext`.
///
/// - `info()` prints the message, echoed command lines styled (suppressed when `quiet`)
/// - `debug()` prints a dimmed line (only when `verbose`, never when `quiet`)
/// - `error()` prints a red line (never suppressed)
pub struct TerminalLogger<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalLogger<'a> {
    /// Create a new `TerminalLogger` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// The line `level` would print for `message`, or `None` when the
    /// context suppresses it.
    #[must_use]
    pub fn render(&self, level: Level, message: &str) -> Option<String> {
        let styles = &self.ctx.styles;
        match level {
            Level::Error => Some(format!("{}", message.style(styles.error))),
            _ if self.ctx.quiet => None,
            Level::Debug if !self.ctx.verbose => None,
            Level::Debug => Some(format!("{}", message.style(styles.dim))),
            Level::Info if message.starts_with("$ ") => {
                Some(format!("{}", message.style(styles.command)))
            }
            Level::Info => Some(message.to_string()),
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if let Some(line) = self.render(level, message) {
            eprintln!("{line}");
        }
    }
}

impl Logger for TerminalLogger<'_> {
    fn blank_line(&self) {
        if !self.ctx.quiet {
            eprintln!();
        }
    }

    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }
}
