//! Application service: `ssh-agent` / `ssh-add` control.
//!
//! `AgentController` turns each agent operation into one `CommandSpec`,
//! echoes it through the injected `Logger`, and hands it to the injected
//! `CommandRunner`. It caches nothing between calls.

use std::path::Path;

use crate::application::ports::{CommandRunner, FileWriter, Logger, SshAgent, TempDirProvider};
use crate::domain::ssh::{ASKPASS_ECHO, NOPASS, SSH_ADD, SSH_AGENT, SSH_ASKPASS, SSH_AUTH_SOCK};
use crate::domain::{AgentError, CommandSpec, StreamMode};

/// Production implementation of the `SshAgent` port.
pub struct AgentController<R, L, W, T> {
    runner: R,
    logger: L,
    // Held but never used: no agent operation touches the filesystem.
    #[allow(dead_code)]
    file_writer: W,
    #[allow(dead_code)]
    temp_dirs: T,
}

impl<R, L, W, T> AgentController<R, L, W, T>
where
    R: CommandRunner,
    L: Logger,
    W: FileWriter,
    T: TempDirProvider,
{
    #[must_use]
    pub fn new(file_writer: W, temp_dirs: T, logger: L, runner: R) -> Self {
        Self {
            runner,
            logger,
            file_writer,
            temp_dirs,
        }
    }

    /// Echo the command line so it can be reproduced by hand.
    fn announce(&self, spec: &CommandSpec, blank_lines: usize) {
        for _ in 0..blank_lines {
            self.logger.blank_line();
        }
        self.logger.info(&format!("$ {}", spec.printable()));
    }
}

impl<R, L, W, T> SshAgent for AgentController<R, L, W, T>
where
    R: CommandRunner,
    L: Logger,
    W: FileWriter,
    T: TempDirProvider,
{
    fn start(&self) -> Result<String, AgentError> {
        let spec = CommandSpec::new(SSH_AGENT)
            .stdout(StreamMode::Capture)
            .stderr(StreamMode::Inherit);
        self.announce(&spec, 1);
        self.runner.output(&spec)
    }

    fn kill(&self) -> Result<i32, AgentError> {
        let spec = CommandSpec::new(SSH_AGENT)
            .arg("-k")
            .stdout(StreamMode::Inherit)
            .stderr(StreamMode::Inherit);
        self.announce(&spec, 1);
        self.runner.exit_code(&spec)
    }

    fn list_keys(&self) -> Result<i32, AgentError> {
        let spec = CommandSpec::new(SSH_ADD)
            .arg("-l")
            .stderr(StreamMode::Inherit);
        self.announce(&spec, 0);
        self.runner.exit_code(&spec)
    }

    fn add_key(&self, key_path: &Path, socket: &str) -> Result<(), AgentError> {
        let mut spec = CommandSpec::new(SSH_ADD)
            .arg(key_path)
            .stdout(StreamMode::Inherit)
            .stderr(StreamMode::Inherit);
        if !socket.is_empty() {
            spec = spec.env(SSH_AUTH_SOCK, socket);
        }
        // ssh-add runs the askpass program instead of opening the tty when
        // stdin is not a terminal; `cat` hands it our stdin verbatim.
        let spec = spec.env(SSH_ASKPASS, ASKPASS_ECHO).stdin(NOPASS);
        self.announce(&spec, 1);

        let code = match self.runner.exit_code(&spec) {
            Ok(code) => code,
            Err(err) => {
                self.logger.debug(&format!("Exit code: {err}"));
                return Err(err);
            }
        };

        if code != 0 {
            self.logger.error(&format!("Exit code: {code}"));
            return Err(AgentError::Passphrase { code });
        }
        Ok(())
    }

    fn delete_keys(&self) -> Result<(), AgentError> {
        let spec = CommandSpec::new(SSH_ADD)
            .arg("-D")
            .stdout(StreamMode::Inherit)
            .stderr(StreamMode::Inherit);
        self.announce(&spec, 2);
        self.runner.run(&spec)
    }
}
