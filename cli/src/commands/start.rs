//! `sshkey-agent start`: start an agent and print its environment.

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::SshAgent;
use crate::domain::parse_agent_env;

/// Arguments for the start command.
#[derive(Args)]
pub struct StartArgs {
    /// Print `export` lines instead of the raw ssh-agent output
    #[arg(long)]
    pub print_env: bool,
}

/// Run `sshkey-agent start`.
///
/// # Errors
///
/// Returns an error if `ssh-agent` cannot be started or, with `--print-env`,
/// its output names no socket.
pub fn run(agent: &impl SshAgent, args: &StartArgs) -> Result<()> {
    let output = agent.start()?;
    if args.print_env {
        let env = parse_agent_env(&output).context("reading ssh-agent output")?;
        println!("{}", env.exports());
    } else {
        println!("{output}");
    }
    Ok(())
}
