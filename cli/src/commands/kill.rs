//! `sshkey-agent kill`: stop the agent named by the environment.

use anyhow::Result;

use crate::application::ports::SshAgent;
use crate::output::OutputContext;

/// Run `sshkey-agent kill`. Returns the exit code of `ssh-agent -k`.
///
/// # Errors
///
/// Returns an error only if `ssh-agent` cannot be launched.
pub fn run(ctx: &OutputContext, agent: &impl SshAgent) -> Result<i32> {
    let code = agent.kill()?;
    if code == 0 {
        ctx.success("ssh-agent stopped");
    } else {
        ctx.warn(&format!("no ssh-agent was stopped (exit code {code})"));
    }
    Ok(code)
}
