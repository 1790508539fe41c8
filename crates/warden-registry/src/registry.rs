//! The lifecycle state machine over the shared container table.
//!
//! Legal transitions:
//!
//! ```text
//! unknown --create--> Ready --start--> Running --stop--> Stopping
//!                       |                 |                 |
//!                       |              (report DEAD) <------+
//!                       |                 v
//!                       +-- (report) --> Dead --delete--> unknown
//! ```
//!
//! Every mutation either applies fully or fails with
//! [`WardenError::InvalidOperation`] leaving the table untouched. Status
//! reports never fail: an unrecognized tag is answered in-band with
//! [`Directive::Abort`] because the shim must always receive some
//! directive to act on.

use std::collections::HashMap;

use warden_common::error::{Result, WardenError};
use warden_common::types::{
    AssistantManagerInfo, ContainerInfo, ContainerState, Directive, StatusReport, Tag,
    WorkloadCommand,
};

use crate::queue::ReadyQueue;
use crate::record::ContainerRecord;

/// Authoritative set of container records plus the ready queue and the
/// assistant-manager table.
#[derive(Debug, Default)]
pub struct Registry {
    records: HashMap<Tag, ContainerRecord>,
    assistants: HashMap<Tag, AssistantManagerInfo>,
    ready: ReadyQueue,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container record in the `Ready` state and enqueues its
    /// tag for the executor.
    ///
    /// A command supplied here is recorded for the eventual shim; it can
    /// still be overridden at start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag already exists.
    pub fn create(&mut self, tag: Tag, command: Option<WorkloadCommand>) -> Result<()> {
        if self.records.contains_key(&tag) {
            return Err(WardenError::invalid_operation(format!(
                "container {tag} already exists"
            )));
        }
        if let Some(command) = &command {
            let _ = self
                .assistants
                .insert(tag.clone(), AssistantManagerInfo::new(tag.clone(), command.clone()));
        }
        let _ = self
            .records
            .insert(tag.clone(), ContainerRecord::new(tag.clone(), command));
        self.ready.push(tag.clone());
        tracing::info!(tag = %tag, "container created");
        Ok(())
    }

    /// Transitions a `Ready` container to `Running` and removes its tag
    /// from the ready queue if still present, so the operator-start and
    /// executor-drain paths converge.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is unknown, the record is not
    /// `Ready`, or no workload command is known from either the request
    /// or creation time.
    pub fn start(&mut self, tag: &Tag, command: Option<WorkloadCommand>) -> Result<()> {
        let record = self.get_record(tag)?;
        Self::check_state(record, &[ContainerState::Ready])?;
        let Some(command) = command.or_else(|| record.command.clone()) else {
            return Err(WardenError::invalid_operation(format!(
                "container {tag} has no workload command"
            )));
        };

        let record = self.get_record_mut(tag)?;
        record.command = Some(command.clone());
        record.state = ContainerState::Running;
        self.ready.remove(tag);
        match self.assistants.get_mut(tag) {
            Some(info) => info.command = command,
            None => {
                let _ = self
                    .assistants
                    .insert(tag.clone(), AssistantManagerInfo::new(tag.clone(), command));
            }
        }
        tracing::info!(tag = %tag, "container started");
        Ok(())
    }

    /// Begins the shutdown procedure: `Running → Stopping`. The shim
    /// learns about it through the directive on its next status report.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is unknown or the record is not
    /// `Running`.
    pub fn stop(&mut self, tag: &Tag) -> Result<()> {
        let record = self.get_record(tag)?;
        Self::check_state(record, &[ContainerState::Running])?;
        self.get_record_mut(tag)?.state = ContainerState::Stopping;
        tracing::info!(tag = %tag, "container stopping");
        Ok(())
    }

    /// Erases a record (and its shim descriptor) from the registry.
    ///
    /// Only terminal records may be deleted; removing the bookkeeping
    /// for a live or pending workload would orphan it.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is unknown or the record is not
    /// `Dead` or `Lost`.
    pub fn delete(&mut self, tag: &Tag) -> Result<()> {
        let record = self.get_record(tag)?;
        Self::check_state(record, &[ContainerState::Dead, ContainerState::Lost])?;
        let _ = self.records.remove(tag);
        let _ = self.assistants.remove(tag);
        tracing::info!(tag = %tag, "container deleted");
        Ok(())
    }

    /// Returns info for the requested tags, or for every known container
    /// when `tags` is empty. Unknown tags are omitted, never an error.
    #[must_use]
    pub fn list(&self, tags: &[Tag]) -> Vec<ContainerInfo> {
        let mut infos: Vec<ContainerInfo> = if tags.is_empty() {
            self.records.values().map(ContainerRecord::to_info).collect()
        } else {
            tags.iter()
                .filter_map(|tag| self.records.get(tag))
                .map(ContainerRecord::to_info)
                .collect()
        };
        infos.sort_by(|a, b| a.tag.cmp(&b.tag));
        infos
    }

    /// Atomically returns and empties the ready queue.
    ///
    /// The records' states do not change; the executor is expected to
    /// arrange a start for every returned tag. Because the take happens
    /// in one critical section, a tag is claimed at most once even under
    /// concurrent executors.
    pub fn dequeue_ready(&mut self) -> Vec<Tag> {
        let tags = self.ready.drain();
        if !tags.is_empty() {
            tracing::debug!(count = tags.len(), "ready queue drained");
        }
        tags
    }

    /// Returns the tags of all active containers (`Running` or
    /// `Stopping`).
    #[must_use]
    pub fn running(&self) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .records
            .values()
            .filter(|r| {
                matches!(
                    r.state,
                    ContainerState::Running | ContainerState::Stopping
                )
            })
            .map(|r| r.tag.clone())
            .collect();
        tags.sort();
        tags
    }

    /// Looks up the shim descriptor for a tag. `None` tells the calling
    /// shim it is unmanaged and should exit.
    #[must_use]
    pub fn assistant_status(&self, tag: &Tag) -> Option<AssistantManagerInfo> {
        self.assistants.get(tag).cloned()
    }

    /// Applies a shim's status report and returns the directive that
    /// governs the shim's next action.
    ///
    /// Never fails: a report for a tag the registry does not recognize
    /// (deleted, never created, or forgotten across a restart) yields
    /// [`Directive::Abort`] and is otherwise discarded — an orphaned
    /// supervisor must not keep a workload alive indefinitely.
    pub fn report(&mut self, report: &StatusReport) -> Directive {
        let Some(record) = self.records.get_mut(&report.tag) else {
            tracing::warn!(tag = %report.tag, state = %report.state, "report from unmanaged shim");
            return Directive::Abort;
        };

        match (report.state, record.state) {
            // The executor path: the shim brought the workload up before
            // any operator start; converge to Running. A repeated Running
            // report just refreshes the pids.
            (ContainerState::Running, ContainerState::Ready | ContainerState::Running) => {
                record.state = ContainerState::Running;
                record.pid = report.pid;
                record.workload_pid = report.workload_pid;
                tracing::debug!(tag = %report.tag, pid = ?report.pid, workload_pid = ?report.workload_pid, "workload alive");
            }
            // A container may die without ever receiving a stop request;
            // a dead report is always accepted.
            (ContainerState::Dead, _) => {
                record.state = ContainerState::Dead;
                record.exit_info = report.exit_info;
                tracing::info!(tag = %report.tag, exit_info = ?report.exit_info, "workload dead");
            }
            _ => {}
        }

        let directive = if record.state == ContainerState::Stopping {
            Directive::Stop
        } else {
            Directive::Okay
        };

        // Keep the queue invariant: only Ready tags stay queued.
        if record.state != ContainerState::Ready {
            self.ready.remove(&report.tag);
        }
        if report.state == ContainerState::Running {
            if let Some(info) = self.assistants.get_mut(&report.tag) {
                info.pid = report.pid;
                info.workload_pid = report.workload_pid;
            }
        }
        directive
    }

    /// Returns the number of tags currently queued for the executor.
    #[must_use]
    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    fn get_record(&self, tag: &Tag) -> Result<&ContainerRecord> {
        self.records.get(tag).ok_or_else(|| {
            WardenError::invalid_operation(format!("container {tag} does not exist"))
        })
    }

    fn get_record_mut(&mut self, tag: &Tag) -> Result<&mut ContainerRecord> {
        self.records.get_mut(tag).ok_or_else(|| {
            WardenError::invalid_operation(format!("container {tag} does not exist"))
        })
    }

    fn check_state(record: &ContainerRecord, expected: &[ContainerState]) -> Result<()> {
        if expected.contains(&record.state) {
            return Ok(());
        }
        let expected: Vec<String> = expected.iter().map(ToString::to_string).collect();
        Err(WardenError::invalid_operation(format!(
            "container {} state mismatch: expected {}, actual {}",
            record.tag,
            expected.join("|"),
            record.state
        )))
    }
}
