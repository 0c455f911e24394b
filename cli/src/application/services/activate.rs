//! Application service: make a private key usable by later build steps.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::{FileWriter, Logger, SshAgent, TempDirProvider};
use crate::domain::ssh::LIST_AGENT_UNREACHABLE;
use crate::domain::{AgentEnv, parse_agent_env};

/// File name used for key content written to a temp directory.
pub const KEY_FILE_NAME: &str = "id_rsa";

/// Prefix of the temp directory holding materialized key content.
pub const TEMP_DIR_PREFIX: &str = "sshkey-agent-";

/// Where the private key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// An existing key file.
    Path(PathBuf),
    /// Raw key material, written to a private temp file before loading.
    Content(String),
}

/// Inputs to [`activate`].
#[derive(Debug, Clone)]
pub struct ActivateRequest {
    pub key: KeySource,
    /// Kill the ambient agent and load the key into a fresh one.
    pub remove_other_identities: bool,
}

/// What [`activate`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateOutcome {
    /// Path handed to `ssh-add`.
    pub key_path: PathBuf,
    /// Environment of the agent started along the way, if any. The caller
    /// must export it for later steps to reach the key.
    pub started: Option<AgentEnv>,
}

/// Load a key into an agent, starting one when needed.
///
/// With `remove_other_identities` the ambient agent is killed (its exit code
/// ignored) and a new one started. Otherwise the ambient agent is probed with
/// `ssh-add -l` and a new one is started only when it is unreachable.
///
/// # Errors
///
/// Returns an error if the key cannot be materialized, an agent binary cannot
/// be launched, `ssh-agent` output lacks a socket, or `ssh-add` rejects the key.
pub fn activate(
    agent: &impl SshAgent,
    file_writer: &impl FileWriter,
    temp_dirs: &impl TempDirProvider,
    logger: &impl Logger,
    request: &ActivateRequest,
) -> Result<ActivateOutcome> {
    let key_path = materialize_key(&request.key, file_writer, temp_dirs)?;

    let started = if request.remove_other_identities {
        logger.info("Removing other identities: restarting ssh-agent");
        let code = agent.kill().context("killing ssh-agent")?;
        logger.debug(&format!("ssh-agent -k exited with {code}"));
        Some(start_agent(agent)?)
    } else {
        let code = agent.list_keys().context("probing ssh-agent")?;
        if code == LIST_AGENT_UNREACHABLE {
            logger.info("No ssh-agent reachable, starting a new one");
            Some(start_agent(agent)?)
        } else {
            logger.debug(&format!("ssh-add -l exited with {code}, reusing agent"));
            None
        }
    };

    let socket = started.as_ref().map_or("", |env| env.auth_sock.as_str());
    agent.add_key(&key_path, socket)?;

    Ok(ActivateOutcome { key_path, started })
}

fn start_agent(agent: &impl SshAgent) -> Result<AgentEnv> {
    let output = agent.start().context("starting ssh-agent")?;
    parse_agent_env(&output).context("reading ssh-agent output")
}

fn materialize_key(
    source: &KeySource,
    file_writer: &impl FileWriter,
    temp_dirs: &impl TempDirProvider,
) -> Result<PathBuf> {
    match source {
        KeySource::Path(path) => {
            anyhow::ensure!(!path.as_os_str().is_empty(), "SSH key path is empty");
            Ok(path.clone())
        }
        KeySource::Content(content) => {
            anyhow::ensure!(!content.trim().is_empty(), "SSH key content is empty");
            let dir = temp_dirs.create_temp_dir(TEMP_DIR_PREFIX)?;
            let path = dir.join(KEY_FILE_NAME);
            // ssh-add rejects PEM keys whose last line is unterminated.
            let mut bytes = content.clone().into_bytes();
            if !bytes.ends_with(b"\n") {
                bytes.push(b'\n');
            }
            file_writer
                .write(&path, &bytes, 0o600)
                .with_context(|| format!("writing SSH key to {}", path.display()))?;
            Ok(path)
        }
    }
}
