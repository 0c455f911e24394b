//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `StdCommandRunner` is the production implementation. It runs each child
//! with `std::process` and blocks the calling thread until the child exits.

use std::io::Write as _;
use std::process::{Command, Output, Stdio};

use crate::application::ports::CommandRunner;
use crate::domain::{AgentError, CommandSpec, StreamMode};

/// Production `CommandRunner` backed by `std::process::Command`.
///
/// Stdin is the null device unless the spec carries a payload, so a child
/// can never read from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdCommandRunner;

impl StdCommandRunner {
    fn execute(spec: &CommandSpec) -> Result<Output, AgentError> {
        let launch_error = |source: std::io::Error| AgentError::Launch {
            program: spec.program.clone(),
            source,
        };

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k, v)))
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(stdio(spec.stdout))
            .stderr(stdio(spec.stderr))
            .spawn()
            .map_err(launch_error)?;

        // Feed stdin from its own thread so a child that fills its output
        // pipes before reading input cannot deadlock us.
        let writer = match (child.stdin.take(), spec.stdin.clone()) {
            (Some(mut stdin), Some(input)) => Some(std::thread::spawn(move || {
                // A child that exits without reading stdin closes the pipe.
                let _ = stdin.write_all(&input);
            })),
            _ => None,
        };

        let output = child.wait_with_output().map_err(launch_error)?;
        if let Some(writer) = writer {
            let _ = writer.join();
        }
        Ok(output)
    }
}

fn stdio(mode: StreamMode) -> Stdio {
    match mode {
        StreamMode::Capture => Stdio::piped(),
        StreamMode::Inherit => Stdio::inherit(),
        StreamMode::Discard => Stdio::null(),
    }
}

fn code_of(output: &Output) -> i32 {
    output.status.code().unwrap_or(-1)
}

impl CommandRunner for StdCommandRunner {
    fn output(&self, spec: &CommandSpec) -> Result<String, AgentError> {
        let output = Self::execute(spec)?;
        let code = code_of(&output);
        if code != 0 {
            return Err(AgentError::Exit {
                program: spec.program.clone(),
                code,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn exit_code(&self, spec: &CommandSpec) -> Result<i32, AgentError> {
        Self::execute(spec).map(|output| code_of(&output))
    }
}
