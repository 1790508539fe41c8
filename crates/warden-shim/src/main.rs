//! # warden-shim — assistant manager binary
//!
//! Supervises exactly one container workload on behalf of the Warden
//! registry. Spawned by the executor with the container's tag.

use std::time::Duration;

use clap::Parser;
use warden_common::constants;
use warden_common::types::Tag;
use warden_shim::{AssistantManager, ShimOutcome};

/// Assistant manager for one Warden container.
#[derive(Parser, Debug)]
#[command(name = constants::SHIM_BIN_NAME, version, about, long_about = None)]
struct Args {
    /// Tag of the container to supervise.
    tag: String,

    /// Control endpoint of the Warden server.
    #[arg(long, default_value_t = constants::default_endpoint())]
    endpoint: String,

    /// Milliseconds between status reports.
    #[arg(long, default_value_t = constants::DEFAULT_REPORT_INTERVAL_MS)]
    report_interval_ms: u64,

    /// Milliseconds to wait after SIGTERM before escalating to SIGKILL.
    #[arg(long, default_value_t = constants::DEFAULT_STOP_GRACE_MS)]
    stop_grace_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let manager = AssistantManager::new(
        args.endpoint,
        Tag::new(args.tag),
        Duration::from_millis(args.report_interval_ms),
        Duration::from_millis(args.stop_grace_ms),
    );

    match manager.run().await? {
        ShimOutcome::WorkloadExited(info) => {
            tracing::info!(exit_info = %info, "workload supervised to completion, exiting");
            Ok(())
        }
        ShimOutcome::Aborted => {
            anyhow::bail!("registry aborted this shim; workload killed ungracefully")
        }
    }
}
