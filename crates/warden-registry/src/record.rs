//! The per-container record tracked by the registry.

use warden_common::types::{ContainerInfo, ContainerState, ExitInfo, Tag, WorkloadCommand};

/// Authoritative bookkeeping for one container.
///
/// Fields are only mutated through registry transitions; `exit_info` is
/// populated exactly when the record reaches [`ContainerState::Dead`].
#[derive(Debug, Clone)]
pub struct ContainerRecord {
    /// Unique identifier, immutable for the record's lifetime.
    pub tag: Tag,
    /// Current lifecycle state.
    pub state: ContainerState,
    /// Termination details once the workload is dead.
    pub exit_info: Option<ExitInfo>,
    /// Workload command, supplied at creation or start time.
    pub command: Option<WorkloadCommand>,
    /// The supervising shim's process id, absent until the container runs.
    pub pid: Option<u32>,
    /// The workload's process id, absent until the container runs.
    pub workload_pid: Option<u32>,
    /// ISO-8601 creation timestamp.
    pub created_at: String,
}

impl ContainerRecord {
    /// Creates a record in the `Ready` state.
    #[must_use]
    pub fn new(tag: Tag, command: Option<WorkloadCommand>) -> Self {
        Self {
            tag,
            state: ContainerState::Ready,
            exit_info: None,
            command,
            pid: None,
            workload_pid: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Returns the list-query projection of this record.
    #[must_use]
    pub fn to_info(&self) -> ContainerInfo {
        ContainerInfo {
            tag: self.tag.clone(),
            state: self.state,
            exit_info: self.exit_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_ready_with_no_pids() {
        let r = ContainerRecord::new(Tag::new("web"), None);
        assert_eq!(r.state, ContainerState::Ready);
        assert!(r.pid.is_none());
        assert!(r.workload_pid.is_none());
        assert!(r.exit_info.is_none());
    }

    #[test]
    fn to_info_projects_tag_state_and_exit() {
        let mut r = ContainerRecord::new(Tag::new("web"), None);
        r.state = ContainerState::Dead;
        r.exit_info = Some(ExitInfo {
            kind: warden_common::types::ExitKind::Exit,
            status: 0,
        });
        let info = r.to_info();
        assert_eq!(info.tag.as_str(), "web");
        assert_eq!(info.state, ContainerState::Dead);
        assert!(info.exit_info.is_some());
    }
}
