//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::builder::FalseyValueParser;
use clap::{Parser, Subcommand};

use crate::application::services::agent_control::AgentController;
use crate::commands;
use crate::infra::{LocalFs, ProcessTempDirs, StdCommandRunner};
use crate::output::{OutputContext, TerminalLogger};

/// Start ssh-agent and load keys without passphrase prompts
#[derive(Parser)]
#[command(
    name = "sshkey-agent",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show debug output
    #[arg(
        short,
        long,
        global = true,
        env = "SSHKEY_AGENT_VERBOSE",
        value_parser = FalseyValueParser::new()
    )]
    pub verbose: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a new ssh-agent and print its environment
    Start(commands::start::StartArgs),

    /// Kill the ssh-agent named by SSH_AGENT_PID
    Kill,

    /// List loaded identities (exit 0: some, 1: none, 2: no agent)
    List,

    /// Add a private key without prompting for a passphrase
    Add(commands::add::AddArgs),

    /// Remove all identities from the agent
    Delete,

    /// Load a key, starting an agent when none is reachable
    Activate(commands::activate::ActivateArgs),
}

impl Cli {
    /// Execute the CLI command and return the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<i32> {
        let Cli {
            quiet,
            verbose,
            no_color,
            command,
        } = self;

        let ctx = OutputContext::new(no_color, quiet, verbose);
        let logger = TerminalLogger::new(&ctx);
        let fs = LocalFs;
        let temp_dirs = ProcessTempDirs::new();
        let agent = AgentController::new(&fs, &temp_dirs, &logger, StdCommandRunner);

        match command {
            Command::Start(args) => commands::start::run(&agent, &args).map(|()| 0),
            Command::Kill => commands::kill::run(&ctx, &agent),
            Command::List => commands::list::run(&ctx, &agent),
            Command::Add(args) => commands::add::run(&ctx, &agent, &args).map(|()| 0),
            Command::Delete => commands::delete::run(&ctx, &agent).map(|()| 0),
            Command::Activate(args) => {
                commands::activate::run(&ctx, &agent, &fs, &temp_dirs, &logger, &args).map(|()| 0)
            }
        }
    }
}
