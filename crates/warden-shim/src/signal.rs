//! Signal delivery to the supervised workload.

/// Sends SIGTERM to a process, beginning a graceful shutdown.
#[cfg(target_os = "linux")]
pub fn terminate(pid: u32) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    if kill(Pid::from_raw(pid as i32), Signal::SIGTERM).is_ok() {
        tracing::info!(pid, "sent SIGTERM");
    }
}

/// Sends SIGKILL to a process, terminating it ungracefully.
#[cfg(target_os = "linux")]
pub fn kill_hard(pid: u32) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    if kill(Pid::from_raw(pid as i32), Signal::SIGKILL).is_ok() {
        tracing::info!(pid, "sent SIGKILL");
    }
}

/// Sends SIGTERM to a process, beginning a graceful shutdown.
///
/// No-op on non-Linux platforms.
#[cfg(not(target_os = "linux"))]
pub fn terminate(_pid: u32) {}

/// Sends SIGKILL to a process, terminating it ungracefully.
///
/// No-op on non-Linux platforms.
#[cfg(not(target_os = "linux"))]
pub fn kill_hard(_pid: u32) {}
