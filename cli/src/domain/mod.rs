//! Domain layer: pure types, parsing, and error definitions.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod command;
pub mod error;
pub mod ssh;

pub use command::{CommandSpec, StreamMode};
pub use error::{AgentEnvError, AgentError};
pub use ssh::{AgentEnv, parse_agent_env};
