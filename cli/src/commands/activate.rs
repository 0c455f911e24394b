//! `sshkey-agent activate`: load a key, starting an agent when needed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::application::ports::{FileWriter, Logger, SshAgent, TempDirProvider};
use crate::application::services::activate::{ActivateRequest, KeySource, activate};
use crate::output::OutputContext;

/// Arguments for the activate command.
#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("key")
        .required(true)
        .args(["key_file", "key_env"]),
))]
pub struct ActivateArgs {
    /// Private key file to load
    #[arg(long)]
    pub key_file: Option<PathBuf>,

    /// Environment variable holding the private key content
    #[arg(long, value_name = "VAR")]
    pub key_env: Option<String>,

    /// Kill the running agent and load the key into a fresh one
    #[arg(long)]
    pub remove_other_identities: bool,
}

impl ActivateArgs {
    fn key_source(&self) -> Result<KeySource> {
        match (&self.key_file, &self.key_env) {
            (Some(path), _) => Ok(KeySource::Path(path.clone())),
            (None, Some(var)) => std::env::var(var)
                .map(KeySource::Content)
                .with_context(|| format!("reading SSH key from ${var}")),
            (None, None) => anyhow::bail!("either --key-file or --key-env is required"),
        }
    }
}

/// Run `sshkey-agent activate`.
///
/// Prints `export` lines on stdout when a new agent was started, so the
/// caller can `eval` them.
///
/// # Errors
///
/// Returns an error if the key cannot be read or written, or any agent
/// operation fails.
pub fn run(
    ctx: &OutputContext,
    agent: &impl SshAgent,
    file_writer: &impl FileWriter,
    temp_dirs: &impl TempDirProvider,
    logger: &impl Logger,
    args: &ActivateArgs,
) -> Result<()> {
    let request = ActivateRequest {
        key: args.key_source()?,
        remove_other_identities: args.remove_other_identities,
    };
    let outcome = activate(agent, file_writer, temp_dirs, logger, &request)?;

    if let Some(env) = &outcome.started {
        println!("{}", env.exports());
    }
    ctx.success("SSH key loaded into ssh-agent");
    Ok(())
}
