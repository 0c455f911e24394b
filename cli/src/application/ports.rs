//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::{AgentError, CommandSpec};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Every run mode blocks until the child exits. There is no timeout.
pub trait CommandRunner {
    /// Run `spec` and return its captured stdout with surrounding whitespace
    /// trimmed.
    ///
    /// # Errors
    ///
    /// [`AgentError::Launch`] if the program cannot be started,
    /// [`AgentError::Exit`] if it exits non-zero.
    fn output(&self, spec: &CommandSpec) -> Result<String, AgentError>;

    /// Run `spec` and return its exit code. A child killed by a signal
    /// reports `-1`.
    ///
    /// # Errors
    ///
    /// [`AgentError::Launch`] if the program cannot be started.
    fn exit_code(&self, spec: &CommandSpec) -> Result<i32, AgentError>;

    /// Run `spec` and treat any non-zero exit as failure.
    ///
    /// # Errors
    ///
    /// [`AgentError::Launch`] if the program cannot be started,
    /// [`AgentError::Exit`] if it exits non-zero.
    fn run(&self, spec: &CommandSpec) -> Result<(), AgentError> {
        match self.exit_code(spec)? {
            0 => Ok(()),
            code => Err(AgentError::Exit {
                program: spec.program.clone(),
                code,
            }),
        }
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn output(&self, spec: &CommandSpec) -> Result<String, AgentError> {
        (**self).output(spec)
    }

    fn exit_code(&self, spec: &CommandSpec) -> Result<i32, AgentError> {
        (**self).exit_code(spec)
    }

    fn run(&self, spec: &CommandSpec) -> Result<(), AgentError> {
        (**self).run(spec)
    }
}

// ── Logging Port ──────────────────────────────────────────────────────────────

/// Line-oriented log sink. Implementations must not fail; a sink that cannot
/// write drops the line.
pub trait Logger {
    /// Emit an empty line.
    fn blank_line(&self);
    /// Emit an informational line.
    fn info(&self, message: &str);
    /// Emit a diagnostic line, usually hidden unless verbose.
    fn debug(&self, message: &str);
    /// Emit an error line. Never suppressed.
    fn error(&self, message: &str);
}

impl<T: Logger + ?Sized> Logger for &T {
    fn blank_line(&self) {
        (**self).blank_line();
    }

    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn debug(&self, message: &str) {
        (**self).debug(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Abstracts writing files to the local filesystem.
pub trait FileWriter {
    /// Write `content` to `path`, creating parent directories as needed.
    /// On Unix the file is created with permission bits `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    fn write(&self, path: &Path, content: &[u8], mode: u32) -> Result<()>;
}

impl<T: FileWriter + ?Sized> FileWriter for &T {
    fn write(&self, path: &Path, content: &[u8], mode: u32) -> Result<()> {
        (**self).write(path, content, mode)
    }
}

/// Abstracts allocation of temporary directories that live as long as the
/// provider does.
pub trait TempDirProvider {
    /// Create a fresh directory whose name starts with `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_temp_dir(&self, prefix: &str) -> Result<PathBuf>;
}

impl<T: TempDirProvider + ?Sized> TempDirProvider for &T {
    fn create_temp_dir(&self, prefix: &str) -> Result<PathBuf> {
        (**self).create_temp_dir(prefix)
    }
}

// ── SSH Agent Port ────────────────────────────────────────────────────────────

/// Lifecycle control for an `ssh-agent` process and its identities.
///
/// Every method runs exactly one child process and holds no state between
/// calls.
pub trait SshAgent {
    /// Start a new agent and return its environment block, trimmed.
    ///
    /// # Errors
    ///
    /// Launch failure or non-zero exit of `ssh-agent`.
    fn start(&self) -> Result<String, AgentError>;

    /// Kill the agent named by the ambient environment and return the exit
    /// code of `ssh-agent -k`. Non-zero is not an error.
    ///
    /// # Errors
    ///
    /// Launch failure of `ssh-agent`.
    fn kill(&self) -> Result<i32, AgentError>;

    /// Probe the agent with `ssh-add -l` and return the raw exit code.
    ///
    /// # Errors
    ///
    /// Launch failure of `ssh-add`.
    fn list_keys(&self) -> Result<i32, AgentError>;

    /// Load `key_path` without ever prompting on the terminal. An empty
    /// `socket` keeps the inherited `SSH_AUTH_SOCK`.
    ///
    /// # Errors
    ///
    /// Launch failure of `ssh-add`, or [`AgentError::Passphrase`] when the
    /// key could not be loaded.
    fn add_key(&self, key_path: &Path, socket: &str) -> Result<(), AgentError>;

    /// Remove every identity from the agent.
    ///
    /// # Errors
    ///
    /// Launch failure or non-zero exit of `ssh-add -D`.
    fn delete_keys(&self) -> Result<(), AgentError>;
}
