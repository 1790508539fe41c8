//! System-wide constants and defaults.

/// Default host the control interface binds and clients connect to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for the control interface.
pub const DEFAULT_PORT: u16 = 9090;

/// Interval between executor drain passes, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Interval between shim status reports, in milliseconds.
pub const DEFAULT_REPORT_INTERVAL_MS: u64 = 1000;

/// Grace period between SIGTERM and SIGKILL during workload shutdown,
/// in milliseconds.
pub const DEFAULT_STOP_GRACE_MS: u64 = 2000;

/// Application name used in CLI output and log lines.
pub const APP_NAME: &str = "warden";

/// Binary name for the operator CLI.
pub const BIN_NAME: &str = "wrd";

/// Binary name for the assistant manager shim.
pub const SHIM_BIN_NAME: &str = "warden-shim";

/// Binary name for the executor.
pub const EXECUTOR_BIN_NAME: &str = "warden-executor";

/// Returns the default control endpoint as a `host:port` address string.
#[must_use]
pub fn default_endpoint() -> String {
    format!("{DEFAULT_HOST}:{DEFAULT_PORT}")
}
