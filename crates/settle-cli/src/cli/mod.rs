//! CLI for waiting on eventually-consistent state.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use settle_core::config::{self, PollConfig};

use commands::{run_completions, run_config, run_exec, run_tcp};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "settle")]
#[command(about = "settle: wait until a condition holds, and keeps holding", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the `[poll]` section of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct PollArgs {
    /// Total time budget in milliseconds.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
    /// Extra consecutive successful checks required after the first one.
    #[arg(long, value_name = "N")]
    pub debounce: Option<u32>,
    /// Pause between checks in milliseconds (at least 1).
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: Option<u64>,
}

impl PollArgs {
    /// Config values with any flag given on the command line taking precedence.
    pub fn apply(&self, base: PollConfig) -> PollConfig {
        PollConfig {
            timeout_ms: self.timeout_ms.unwrap_or(base.timeout_ms),
            debounce: self.debounce.unwrap_or(base.debounce),
            interval_ms: self.interval_ms.unwrap_or(base.interval_ms),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Wait until a command exits successfully.
    Exec {
        #[command(flatten)]
        poll: PollArgs,
        /// Command and arguments to run on every check.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Wait until a TCP endpoint accepts connections.
    Tcp {
        /// Address as host:port.
        addr: String,
        #[command(flatten)]
        poll: PollArgs,
        /// Per-check connect timeout in milliseconds.
        #[arg(long, default_value = "1000", value_name = "MS")]
        connect_timeout_ms: u64,
    },

    /// Show the config file path and effective polling defaults.
    Config,

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// How a command finished; mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to wait for (config, completions).
    Done,
    /// The condition held for the full debounce streak.
    Settled,
    /// The time budget ran out first.
    TimedOut,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Done | Outcome::Settled => 0,
            Outcome::TimedOut => 2,
        }
    }

    fn from_settled(settled: bool) -> Self {
        if settled {
            Outcome::Settled
        } else {
            Outcome::TimedOut
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<Outcome> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let outcome = match cli.command {
            CliCommand::Exec { poll, command } => {
                Outcome::from_settled(run_exec(&poll.apply(cfg.poll), &command).await?)
            }
            CliCommand::Tcp {
                addr,
                poll,
                connect_timeout_ms,
            } => Outcome::from_settled(
                run_tcp(&poll.apply(cfg.poll), &addr, connect_timeout_ms).await?,
            ),
            CliCommand::Config => {
                run_config(&cfg)?;
                Outcome::Done
            }
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Outcome::Done
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests;
