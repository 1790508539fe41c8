//! `wrd serve` — Run the control-plane server.
//!
//! By default an executor child process is spawned alongside to drive
//! the state machine; Ctrl-C kills the executor along with the server.

use std::path::PathBuf;
use std::sync::Mutex;

use clap::Args;
use warden_common::config::WardenConfig;
use warden_common::constants;
use warden_registry::RegistryHandle;
use warden_server::Server;

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind the control interface to.
    #[arg(long, default_value = constants::DEFAULT_HOST)]
    pub host: String,

    /// Port to bind the control interface to.
    #[arg(long, short, default_value_t = constants::DEFAULT_PORT)]
    pub port: u16,

    /// Do not spawn an executor process to help drive the state machine.
    #[arg(long)]
    pub no_executor: bool,

    /// Path to the executor binary; resolved from the current
    /// executable's directory or PATH when unset.
    #[arg(long)]
    pub executor_bin: Option<PathBuf>,

    /// Path to the shim binary, passed through to the executor.
    #[arg(long)]
    pub shim_bin: Option<PathBuf>,
}

/// Executes the `serve` command.
///
/// # Errors
///
/// Returns an error if the endpoint cannot be bound or the executor
/// cannot be spawned.
pub async fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let config = WardenConfig {
        host: args.host,
        port: args.port,
        shim_bin: args.shim_bin,
        ..WardenConfig::default()
    };
    let endpoint = config.endpoint();
    let listener = Server::bind(&endpoint).await?;

    if args.no_executor {
        tracing::info!("running without an executor; drive the state machine manually");
    } else {
        let executor_bin = resolve_executor_bin(args.executor_bin)?;
        let mut command = std::process::Command::new(&executor_bin);
        let _ = command.arg("--endpoint").arg(&endpoint);
        if let Some(shim_bin) = config.shim_bin {
            let _ = command.arg("--shim-bin").arg(shim_bin);
        }
        let child = command.spawn()?;
        tracing::info!(pid = child.id(), bin = %executor_bin.display(), "executor spawned");
        register_shutdown(child)?;
    }

    let server = Server::new(RegistryHandle::new());
    server.serve(listener).await?;
    Ok(())
}

/// Resolves the executor binary: an explicit path wins, then a sibling
/// of the current executable, then `PATH`.
fn resolve_executor_bin(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(constants::EXECUTOR_BIN_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }
    Ok(which::which(constants::EXECUTOR_BIN_NAME)?)
}

/// Kills the executor child alongside the server on Ctrl-C. Reaping is
/// best effort; worst case the child is reparented and reaped by init.
fn register_shutdown(child: std::process::Child) -> anyhow::Result<()> {
    let child = Mutex::new(Some(child));
    ctrlc::set_handler(move || {
        if let Ok(mut guard) = child.lock() {
            if let Some(mut child) = guard.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
        std::process::exit(0);
    })?;
    Ok(())
}
