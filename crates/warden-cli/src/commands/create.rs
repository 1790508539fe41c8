//! `wrd create` — Create a container record in the ready state.

#![allow(clippy::print_stdout)]

use clap::Args;
use warden_common::types::Tag;
use warden_proto::Client;

/// Arguments for the `create` command.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Tag for the new container; generated when omitted.
    pub tag: Option<String>,

    /// Workload command and arguments, e.g. `-- /bin/sleep infinity`.
    /// When supplied, the executor can launch the container without a
    /// separate start.
    #[arg(last = true)]
    pub command: Vec<String>,
}

/// Executes the `create` command, printing the (possibly generated) tag.
///
/// # Errors
///
/// Returns an error if the tag already exists or the server is
/// unreachable.
pub async fn execute(endpoint: &str, args: CreateArgs) -> anyhow::Result<()> {
    let tag = args.tag.map_or_else(Tag::generate, Tag::new);
    let command = super::workload_from_argv(&args.command);

    let mut client = Client::connect(endpoint).await?;
    client.create(tag.clone(), command).await?;
    tracing::info!(%tag, "container created");
    println!("{tag}");
    Ok(())
}
