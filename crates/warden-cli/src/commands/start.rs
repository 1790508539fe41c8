//! `wrd start` — Start a ready container.

use clap::Args;
use warden_common::types::Tag;
use warden_proto::Client;

/// Arguments for the `start` command.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Tag of the container to start.
    pub tag: String,

    /// Workload command and arguments, e.g. `-- /bin/sleep infinity`.
    /// Falls back to the command recorded at creation time.
    #[arg(last = true)]
    pub command: Vec<String>,
}

/// Executes the `start` command.
///
/// # Errors
///
/// Returns an error if the container is not ready, has no known
/// command, or the server is unreachable.
pub async fn execute(endpoint: &str, args: StartArgs) -> anyhow::Result<()> {
    let command = super::workload_from_argv(&args.command);
    let mut client = Client::connect(endpoint).await?;
    client.start(Tag::new(args.tag.as_str()), command).await?;
    tracing::info!(tag = %args.tag, "container started");
    Ok(())
}
