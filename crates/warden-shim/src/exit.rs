//! Workload exit-status decoding.

use std::process::ExitStatus;

use warden_common::types::{ExitInfo, ExitKind};

/// Exit status reported when the workload could not be spawned at all.
pub const SPAWN_FAILURE_STATUS: i32 = 127;

/// Decodes a wait status into the registry's exit representation:
/// a plain exit carries the status code, a signal death carries the
/// signal number.
#[must_use]
pub fn exit_info_from_status(status: ExitStatus) -> ExitInfo {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ExitInfo {
                kind: ExitKind::Signal,
                status: signal,
            };
        }
    }
    ExitInfo {
        kind: ExitKind::Exit,
        status: status.code().unwrap_or(SPAWN_FAILURE_STATUS),
    }
}
