//! CLI command definitions and dispatch.

pub mod create;
pub mod ps;
pub mod rm;
pub mod running;
pub mod serve;
pub mod start;
pub mod stop;

use clap::{Parser, Subcommand};
use warden_common::constants;
use warden_common::types::WorkloadCommand;

/// Warden — minimal Linux container manager.
#[derive(Parser, Debug)]
#[command(name = constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Control endpoint of the Warden server.
    #[arg(long, global = true, env = "WARDEN_ENDPOINT", default_value_t = constants::default_endpoint())]
    pub endpoint: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the control-plane server (and, by default, an executor).
    Serve(serve::ServeArgs),
    /// Create a container record in the ready state.
    Create(create::CreateArgs),
    /// Start a ready container.
    Start(start::StartArgs),
    /// Request shutdown of a running container.
    Stop(stop::StopArgs),
    /// Delete a dead container record.
    Rm(rm::RmArgs),
    /// List containers and their states.
    Ps(ps::PsArgs),
    /// List the tags of all active containers.
    Running(running::RunningArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => serve::execute(args).await,
        Command::Create(args) => create::execute(&cli.endpoint, args).await,
        Command::Start(args) => start::execute(&cli.endpoint, args).await,
        Command::Stop(args) => stop::execute(&cli.endpoint, args).await,
        Command::Rm(args) => rm::execute(&cli.endpoint, args).await,
        Command::Ps(args) => ps::execute(&cli.endpoint, args).await,
        Command::Running(args) => running::execute(&cli.endpoint, args).await,
    }
}

/// Builds a workload command from trailing CLI words, `None` when empty.
fn workload_from_argv(argv: &[String]) -> Option<WorkloadCommand> {
    let (cmd, args) = argv.split_first()?;
    Some(WorkloadCommand::new(cmd.clone(), args.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argv_means_no_command() {
        assert!(workload_from_argv(&[]).is_none());
    }

    #[test]
    fn argv_splits_into_cmd_and_args() {
        let argv = vec!["/bin/sleep".to_owned(), "5".to_owned()];
        let command = workload_from_argv(&argv).expect("command");
        assert_eq!(command.cmd, "/bin/sleep");
        assert_eq!(command.args, vec!["5"]);
    }
}
