//! sshkey-agent - ssh-agent lifecycle broker for ephemeral build environments

#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;

use sshkey_agent::cli::Cli;
use sshkey_agent::infra::bootstrap;

#[allow(unsafe_code)]
fn main() {
    // SAFETY: single-threaded at this point; nothing else touches the environment.
    unsafe { bootstrap::bootstrap() };

    let cli = Cli::parse();
    match cli.run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
