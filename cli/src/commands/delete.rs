//! `sshkey-agent delete`: remove every identity from the agent.

use anyhow::Result;

use crate::application::ports::SshAgent;
use crate::output::OutputContext;

/// Run `sshkey-agent delete`.
///
/// # Errors
///
/// Returns an error if `ssh-add -D` cannot be launched or exits non-zero.
pub fn run(ctx: &OutputContext, agent: &impl SshAgent) -> Result<()> {
    agent.delete_keys()?;
    ctx.success("all identities removed");
    Ok(())
}
