//! `sshkey-agent add <KEY_PATH>`: load a key without prompting.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::application::ports::SshAgent;
use crate::output::OutputContext;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Private key file to load
    pub key_path: PathBuf,

    /// Agent socket to use instead of the inherited SSH_AUTH_SOCK
    #[arg(long, env = "SSHKEY_AGENT_SOCKET", default_value = "")]
    pub socket: String,
}

/// Run `sshkey-agent add`.
///
/// # Errors
///
/// Returns an error if `ssh-add` cannot be launched or rejects the key.
pub fn run(ctx: &OutputContext, agent: &impl SshAgent, args: &AddArgs) -> Result<()> {
    agent.add_key(&args.key_path, &args.socket)?;
    ctx.success(&format!("added {}", args.key_path.display()));
    Ok(())
}
