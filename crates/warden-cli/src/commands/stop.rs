//! `wrd stop` — Request shutdown of a running container.
//!
//! The state machine moves to `stopping` immediately; poll `wrd ps`
//! until the container reports dead, if you care to know.

use clap::Args;
use warden_common::types::Tag;
use warden_proto::Client;

/// Arguments for the `stop` command.
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Tag of the container to stop.
    pub tag: String,
}

/// Executes the `stop` command.
///
/// # Errors
///
/// Returns an error if the container is not running or the server is
/// unreachable.
pub async fn execute(endpoint: &str, args: StopArgs) -> anyhow::Result<()> {
    let mut client = Client::connect(endpoint).await?;
    client.stop(Tag::new(args.tag.as_str())).await?;
    tracing::info!(tag = %args.tag, "container stopping");
    Ok(())
}
