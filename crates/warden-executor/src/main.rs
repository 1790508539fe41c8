//! # warden-executor binary
//!
//! Runs the drain-and-launch loop against a Warden server. Normally
//! spawned by `wrd serve`, but can be run standalone against any
//! control endpoint.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use warden_common::constants;
use warden_executor::{Executor, resolve_shim_bin};

/// Deferred-work executor for the Warden control plane.
#[derive(Parser, Debug)]
#[command(name = constants::EXECUTOR_BIN_NAME, version, about, long_about = None)]
struct Args {
    /// Control endpoint of the Warden server.
    #[arg(long, default_value_t = constants::default_endpoint())]
    endpoint: String,

    /// Path to the assistant manager binary; resolved from the current
    /// executable's directory or PATH when unset.
    #[arg(long)]
    shim_bin: Option<PathBuf>,

    /// Milliseconds between drain passes.
    #[arg(long, default_value_t = constants::DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let shim_bin = resolve_shim_bin(args.shim_bin)?;
    let executor = Executor::new(
        args.endpoint,
        shim_bin,
        Duration::from_millis(args.poll_interval_ms),
    );
    executor.run().await?;
    Ok(())
}
