//! `wrd rm` — Delete a dead container record.

use clap::Args;
use warden_common::types::Tag;
use warden_proto::Client;

/// Arguments for the `rm` command.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Tags of the containers to delete.
    #[arg(required = true)]
    pub tags: Vec<String>,
}

/// Executes the `rm` command.
///
/// # Errors
///
/// Returns an error if a tag is unknown, a container is still active,
/// or the server is unreachable.
pub async fn execute(endpoint: &str, args: RmArgs) -> anyhow::Result<()> {
    let mut client = Client::connect(endpoint).await?;
    for tag in &args.tags {
        client.delete(Tag::new(tag.as_str())).await?;
        tracing::info!(%tag, "container deleted");
    }
    Ok(())
}
