//! `sshkey-agent list`: probe the agent for loaded identities.

use anyhow::Result;

use crate::application::ports::SshAgent;
use crate::domain::ssh::{LIST_AGENT_UNREACHABLE, LIST_HAS_IDENTITIES, LIST_NO_IDENTITIES};
use crate::output::OutputContext;

/// Run `sshkey-agent list`. Returns the exit code of `ssh-add -l` unchanged.
///
/// # Errors
///
/// Returns an error only if `ssh-add` cannot be launched.
pub fn run(ctx: &OutputContext, agent: &impl SshAgent) -> Result<i32> {
    let code = agent.list_keys()?;
    match code {
        LIST_HAS_IDENTITIES => ctx.success("ssh-agent holds identities"),
        LIST_NO_IDENTITIES => ctx.warn("ssh-agent has no identities"),
        LIST_AGENT_UNREACHABLE => ctx.warn("no ssh-agent reachable"),
        other => ctx.warn(&format!("ssh-add -l exited with {other}")),
    }
    Ok(code)
}
