//! SSH agent vocabulary: binary names, environment variables, and parsing of
//! the environment block `ssh-agent` prints at startup.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::command::shell_quote;
use crate::domain::error::AgentEnvError;

/// Agent daemon binary.
pub const SSH_AGENT: &str = "ssh-agent";

/// Agent client binary.
pub const SSH_ADD: &str = "ssh-add";

/// Names the agent's listening socket.
pub const SSH_AUTH_SOCK: &str = "SSH_AUTH_SOCK";

/// Names the agent's process id.
pub const SSH_AGENT_PID: &str = "SSH_AGENT_PID";

/// Names the passphrase helper `ssh-add` runs instead of opening the tty.
pub const SSH_ASKPASS: &str = "SSH_ASKPASS";

/// Passphrase helper that echoes its stdin back unchanged.
pub const ASKPASS_ECHO: &str = "cat";

/// Predetermined answer fed to the passphrase helper.
pub const NOPASS: &[u8] = b"nopass";

// `ssh-add -l` exit codes.
pub const LIST_HAS_IDENTITIES: i32 = 0;
pub const LIST_NO_IDENTITIES: i32 = 1;
pub const LIST_AGENT_UNREACHABLE: i32 = 2;

/// Matches `NAME=VALUE;` (sh) and `setenv NAME VALUE;` (csh).
static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"(?:setenv\s+(?P<csh_name>[A-Za-z_][A-Za-z0-9_]*)\s+(?P<csh_value>[^;\n]*)|(?P<name>[A-Za-z_][A-Za-z0-9_]*)=(?P<value>[^;\n]*));",
    )
    .expect("valid regex")
});

/// Connection details for a running agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEnv {
    /// Path of the agent's Unix socket.
    pub auth_sock: String,
    /// Agent process id, when the output advertised one.
    pub agent_pid: Option<u32>,
}

impl AgentEnv {
    /// Render `export` lines a POSIX shell can `eval`.
    #[must_use]
    pub fn exports(&self) -> String {
        let mut out = format!("export {SSH_AUTH_SOCK}={}", shell_quote(&self.auth_sock));
        if let Some(pid) = self.agent_pid {
            out.push_str(&format!("\nexport {SSH_AGENT_PID}={pid}"));
        }
        out
    }
}

/// Parse the startup output of `ssh-agent`.
///
/// Later assignments win. Unknown variables are ignored.
///
/// # Errors
///
/// Returns [`AgentEnvError::MissingSocket`] when no non-empty `SSH_AUTH_SOCK`
/// is assigned, or [`AgentEnvError::InvalidPid`] when `SSH_AGENT_PID` is not
/// a number.
pub fn parse_agent_env(output: &str) -> Result<AgentEnv, AgentEnvError> {
    let mut auth_sock = None;
    let mut agent_pid = None;

    for caps in ASSIGNMENT_RE.captures_iter(output) {
        let (Some(name), Some(value)) = (
            caps.name("name").or_else(|| caps.name("csh_name")),
            caps.name("value").or_else(|| caps.name("csh_value")),
        ) else {
            continue;
        };
        let value = value.as_str().trim();
        match name.as_str() {
            SSH_AUTH_SOCK => auth_sock = Some(value.to_string()),
            SSH_AGENT_PID => {
                let pid = value
                    .parse::<u32>()
                    .map_err(|_| AgentEnvError::InvalidPid(value.to_string()))?;
                agent_pid = Some(pid);
            }
            _ => {}
        }
    }

    let auth_sock = auth_sock
        .filter(|s| !s.is_empty())
        .ok_or(AgentEnvError::MissingSocket)?;
    Ok(AgentEnv {
        auth_sock,
        agent_pid,
    })
}
