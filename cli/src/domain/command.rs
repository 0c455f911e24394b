//! Child process descriptions handed to the `CommandRunner` port.
//!
//! A `CommandSpec` is plain data: program, argument vector, environment
//! overlay, stdin payload, and where each output stream goes. Building one
//! performs no I/O, so services can be tested by inspecting what they built.

use std::ffi::OsString;
use std::fmt;

/// Routing for a child's stdout or stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamMode {
    /// Pipe the stream back to the runner.
    Capture,
    /// Share the parent's stream.
    Inherit,
    /// Send the stream to the null device.
    #[default]
    Discard,
}

/// A fully described child process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name, resolved through `PATH`.
    pub program: String,
    /// Argument vector, passed through verbatim (no shell).
    pub args: Vec<OsString>,
    /// `NAME=VALUE` overlays merged onto the inherited environment.
    pub env: Vec<(String, String)>,
    /// Bytes written to the child's stdin before it is closed.
    pub stdin: Option<Vec<u8>>,
    pub stdout: StreamMode,
    pub stderr: StreamMode,
}

impl CommandSpec {
    /// Start a spec for `program` with no arguments and both streams discarded.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            stdin: None,
            stdout: StreamMode::Discard,
            stderr: StreamMode::Discard,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    #[must_use]
    pub fn stdout(mut self, mode: StreamMode) -> Self {
        self.stdout = mode;
        self
    }

    #[must_use]
    pub fn stderr(mut self, mode: StreamMode) -> Self {
        self.stderr = mode;
        self
    }

    /// Value of an environment overlay, if this spec sets `name`.
    #[must_use]
    pub fn env_value(&self, name: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render the effective argument vector as a command line an operator can
    /// paste into a shell. Quoting is for display only; the child never sees it.
    #[must_use]
    pub fn printable(&self) -> String {
        let mut words = vec![shell_quote(&self.program)];
        words.extend(self.args.iter().map(|a| shell_quote(&a.to_string_lossy())));
        words.join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.printable())
    }
}

/// POSIX single-quote `arg` unless it consists only of characters that need
/// no quoting.
pub(crate) fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:@%+,".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
