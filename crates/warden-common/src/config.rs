//! Global configuration model for the Warden control plane.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration shared by the server, executor, and shim roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Host the control interface binds to (and clients connect to).
    pub host: String,
    /// Port of the control interface.
    pub port: u16,
    /// Milliseconds between executor drain passes.
    pub poll_interval_ms: u64,
    /// Milliseconds between shim status reports.
    pub report_interval_ms: u64,
    /// Milliseconds a shim waits after SIGTERM before escalating to SIGKILL.
    pub stop_grace_ms: u64,
    /// Explicit path to the shim binary; resolved from `PATH` or the
    /// current executable's directory when unset.
    pub shim_bin: Option<PathBuf>,
}

impl WardenConfig {
    /// Returns the control endpoint as a `host:port` address string.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            host: crate::constants::DEFAULT_HOST.to_owned(),
            port: crate::constants::DEFAULT_PORT,
            poll_interval_ms: crate::constants::DEFAULT_POLL_INTERVAL_MS,
            report_interval_ms: crate::constants::DEFAULT_REPORT_INTERVAL_MS,
            stop_grace_ms: crate::constants::DEFAULT_STOP_GRACE_MS,
            shim_bin: None,
        }
    }
}
