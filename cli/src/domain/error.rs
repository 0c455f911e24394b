//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::process`. All error types
//! implement `thiserror::Error` and convert to `anyhow::Error` via the `?`
//! operator.

use thiserror::Error;

// ── Agent control errors ──────────────────────────────────────────────────────

/// Errors surfaced by the agent controller operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The external binary could not be started at all.
    #[error("failed to launch {program}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external binary ran but exited non-zero.
    #[error("{program} exited with code {code}")]
    Exit { program: String, code: i32 },

    /// `ssh-add` refused the key. Wrong passphrase and malformed key are not
    /// told apart here because `ssh-add` does not tell them apart reliably.
    #[error("failed to add the SSH key to ssh-agent with an empty passphrase")]
    Passphrase { code: i32 },
}

impl AgentError {
    /// Exit code reported by the child, if it got far enough to produce one.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Launch { .. } => None,
            Self::Exit { code, .. } | Self::Passphrase { code } => Some(*code),
        }
    }
}

// ── Agent environment errors ─────────────────────────────────────────────────

/// Errors from parsing the environment block printed by `ssh-agent`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentEnvError {
    #[error("ssh-agent output does not define SSH_AUTH_SOCK")]
    MissingSocket,

    #[error("ssh-agent output has a non-numeric SSH_AGENT_PID: {0}")]
    InvalidPid(String),
}
