//! `wrd running` — List the tags of all active containers.

use clap::Args;
use warden_proto::Client;

use crate::output;

/// Arguments for the `running` command.
#[derive(Args, Debug)]
pub struct RunningArgs {}

/// Executes the `running` command.
///
/// # Errors
///
/// Returns an error if the server is unreachable.
pub async fn execute(endpoint: &str, _args: RunningArgs) -> anyhow::Result<()> {
    let mut client = Client::connect(endpoint).await?;
    let tags = client.running().await?;
    output::print_tags(&tags);
    Ok(())
}
