//! Domain primitive types used across the Warden workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier naming a container record for its entire lifetime.
///
/// Tags are chosen by the creator and immutable; the registry rejects
/// re-use of a tag while a record with that tag still exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    /// Creates a new tag from a string value.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Generates a random tag for callers that do not care to name one.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Lifecycle state of a container record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerState {
    /// Created and awaiting execution; eligible for the ready queue.
    Ready,
    /// The workload is (or is being brought) alive under a shim.
    Running,
    /// A stop was requested; the shim is winding the workload down.
    Stopping,
    /// The workload terminated; exit information is recorded.
    Dead,
    /// Reserved for a future watchdog; no transition produces it today.
    Lost,
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Running => write!(f, "running"),
            Self::Stopping => write!(f, "stopping"),
            Self::Dead => write!(f, "dead"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// How a workload process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitKind {
    /// The process called its own termination with a status code.
    Exit,
    /// The process was terminated by a signal.
    Signal,
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => write!(f, "exit"),
            Self::Signal => write!(f, "signal"),
        }
    }
}

/// Termination details for a dead container.
///
/// Meaningful if and only if the owning record is [`ContainerState::Dead`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitInfo {
    /// Whether the workload exited on its own or was signaled.
    pub kind: ExitKind,
    /// Exit code or signal number, matching `kind`.
    pub status: i32,
}

impl fmt::Display for ExitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.status)
    }
}

/// The executable and argument vector invoked as a container's workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadCommand {
    /// Path to the executable.
    pub cmd: String,
    /// Arguments passed to the executable.
    pub args: Vec<String>,
}

impl WorkloadCommand {
    /// Creates a workload command from an executable path and arguments.
    #[must_use]
    pub fn new(cmd: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            cmd: cmd.into(),
            args,
        }
    }
}

impl fmt::Display for WorkloadCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cmd)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// The registry's synchronous reply to a status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Directive {
    /// Continue supervising as-is.
    Okay,
    /// Begin a graceful shutdown sequence for the workload.
    Stop,
    /// The registry does not recognize the reporting shim; terminate the
    /// workload immediately and ungracefully, then exit.
    Abort,
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Okay => write!(f, "okay"),
            Self::Stop => write!(f, "stop"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

/// Projection of a container record returned by list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    /// Container tag.
    pub tag: Tag,
    /// Current lifecycle state.
    pub state: ContainerState,
    /// Termination details, populated only once the container is dead.
    pub exit_info: Option<ExitInfo>,
}

/// Per-container shim descriptor.
///
/// Mirrors a subset of the registry's own bookkeeping but represents the
/// shim's self-reported view; pids stay zero-valued (`None`) until the
/// shim reports the workload alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantManagerInfo {
    /// Container tag this shim supervises.
    pub tag: Tag,
    /// Workload command the shim is expected to run.
    pub command: WorkloadCommand,
    /// The shim's own process id.
    pub pid: Option<u32>,
    /// The supervised workload's process id.
    pub workload_pid: Option<u32>,
}

impl AssistantManagerInfo {
    /// Creates a descriptor for a shim that has not started its workload.
    #[must_use]
    pub const fn new(tag: Tag, command: WorkloadCommand) -> Self {
        Self {
            tag,
            command,
            pid: None,
            workload_pid: None,
        }
    }
}

/// A shim's push-reported view of its container, sent on every state
/// change (at minimum on workload start and on workload exit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Container tag the report concerns.
    pub tag: Tag,
    /// The state the shim observes.
    pub state: ContainerState,
    /// The shim's own process id.
    pub pid: Option<u32>,
    /// The workload's process id.
    pub workload_pid: Option<u32>,
    /// Termination details, present when reporting a dead workload.
    pub exit_info: Option<ExitInfo>,
}
