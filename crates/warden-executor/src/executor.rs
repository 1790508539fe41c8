//! The drain-and-launch loop.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;
use warden_common::constants::SHIM_BIN_NAME;
use warden_common::error::{Result, WardenError};
use warden_common::types::Tag;
use warden_proto::Client;

/// How long the executor waits for the server on its first connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Claims ready containers and launches an assistant manager for each.
#[derive(Debug)]
pub struct Executor {
    endpoint: String,
    shim_bin: PathBuf,
    poll_interval: Duration,
}

impl Executor {
    /// Creates an executor against the control endpoint, launching shims
    /// from the given binary.
    #[must_use]
    pub const fn new(endpoint: String, shim_bin: PathBuf, poll_interval: Duration) -> Self {
        Self {
            endpoint,
            shim_bin,
            poll_interval,
        }
    }

    /// Drives the state machine forever: drain the ready queue, launch
    /// an assistant manager per claimed tag, reap dead children, sleep.
    ///
    /// # Errors
    ///
    /// Returns an error only if the server never comes up within the
    /// connect timeout; a connection lost later is re-established.
    pub async fn run(&self) -> Result<()> {
        let mut client = Client::connect_retry(&self.endpoint, CONNECT_TIMEOUT).await?;
        tracing::info!(endpoint = %self.endpoint, shim_bin = %self.shim_bin.display(), "executor started");

        loop {
            match client.dequeue_ready().await {
                Ok(tags) => {
                    for tag in tags {
                        self.launch(&mut client, tag).await;
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "drain failed, reconnecting");
                    client = Client::connect_retry(&self.endpoint, CONNECT_TIMEOUT).await?;
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Launches the assistant manager for one claimed tag.
    ///
    /// Tags without a recorded workload command are skipped with a
    /// warning; the operator-start path covers them instead.
    async fn launch(&self, client: &mut Client, tag: Tag) {
        match client.assistant_status(tag.clone()).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(tag = %tag, "no workload command recorded, skipping");
                return;
            }
            Err(err) => {
                tracing::warn!(tag = %tag, error = %err, "descriptor lookup failed, skipping");
                return;
            }
        }

        match Command::new(&self.shim_bin)
            .arg(tag.as_str())
            .arg("--endpoint")
            .arg(&self.endpoint)
            .spawn()
        {
            Ok(mut child) => {
                tracing::info!(tag = %tag, pid = ?child.id(), "assistant manager launched");
                let _ = tokio::spawn(async move {
                    // reap the zombie; its exit information is useful
                    // when a shim dies before it could report
                    match child.wait().await {
                        Ok(status) => {
                            tracing::info!(tag = %tag, %status, "assistant manager exited");
                        }
                        Err(err) => {
                            tracing::warn!(tag = %tag, error = %err, "failed to reap assistant manager");
                        }
                    }
                });
            }
            Err(err) => {
                tracing::error!(tag = %tag, error = %err, "failed to launch assistant manager");
            }
        }
    }
}

/// Resolves the shim binary: an explicit path wins, then a sibling of
/// the current executable, then `PATH`.
///
/// # Errors
///
/// Returns an error if no candidate resolves.
pub fn resolve_shim_bin(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let candidate = dir.join(SHIM_BIN_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }
    which::which(SHIM_BIN_NAME).map_err(|err| WardenError::Config {
        message: format!("cannot locate {SHIM_BIN_NAME}: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_shim_path_wins() {
        let path = PathBuf::from("/opt/warden/warden-shim");
        let resolved = resolve_shim_bin(Some(path.clone())).expect("resolve");
        assert_eq!(resolved, path);
    }
}
