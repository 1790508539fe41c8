//! `wrd ps` — List containers and their states.

use clap::Args;
use warden_common::types::Tag;
use warden_proto::Client;

use crate::output;

/// Arguments for the `ps` command.
#[derive(Args, Debug)]
pub struct PsArgs {
    /// Tags to show; all known containers when empty.
    pub tags: Vec<String>,
}

/// Executes the `ps` command.
///
/// # Errors
///
/// Returns an error if the server is unreachable.
pub async fn execute(endpoint: &str, args: PsArgs) -> anyhow::Result<()> {
    let tags: Vec<Tag> = args.tags.iter().map(|tag| Tag::new(tag.clone())).collect();
    let mut client = Client::connect(endpoint).await?;
    let containers = client.list(tags).await?;
    output::print_container_table(&containers);
    Ok(())
}
