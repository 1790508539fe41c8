//! The supervision loop for one container workload.

use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::Instant;
use warden_common::error::{Result, WardenError};
use warden_common::types::{
    ContainerState, Directive, ExitInfo, ExitKind, StatusReport, Tag, WorkloadCommand,
};
use warden_proto::Client;

use crate::exit;
use crate::signal;

/// How long the shim waits for the server on its first connection.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why the supervision loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShimOutcome {
    /// The workload exited and its death was reported.
    WorkloadExited(ExitInfo),
    /// The registry does not recognize this shim; the workload was
    /// killed ungracefully.
    Aborted,
}

/// Supervises one container workload on behalf of the registry.
///
/// The shim outlives manager restarts: a failed report is logged and
/// retried on the next tick, so a workload keeps running while its
/// manager is briefly down — until the returning manager answers with
/// a directive again.
#[derive(Debug)]
pub struct AssistantManager {
    endpoint: String,
    tag: Tag,
    report_interval: Duration,
    stop_grace: Duration,
}

impl AssistantManager {
    /// Creates a supervisor for `tag` against the control endpoint.
    #[must_use]
    pub const fn new(
        endpoint: String,
        tag: Tag,
        report_interval: Duration,
        stop_grace: Duration,
    ) -> Self {
        Self {
            endpoint,
            tag,
            report_interval,
            stop_grace,
        }
    }

    /// Fetches the shim descriptor, starts the workload, and supervises
    /// it until it is dead or the registry aborts us.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable at startup, the
    /// registry does not manage this tag, or the workload cannot be
    /// spawned.
    pub async fn run(&self) -> Result<ShimOutcome> {
        let mut conn = Client::connect_retry(&self.endpoint, CONNECT_TIMEOUT).await?;
        let Some(info) = conn.assistant_status(self.tag.clone()).await? else {
            tracing::error!(tag = %self.tag, "unmanaged shim found, exiting");
            return Err(WardenError::invalid_operation(format!(
                "container {} is not managed by the registry",
                self.tag
            )));
        };
        let mut client = Some(conn);

        let child = match spawn_workload(&info.command) {
            Ok(child) => child,
            Err(err) => {
                tracing::error!(tag = %self.tag, command = %info.command, error = %err, "workload failed to spawn");
                let stillborn = ExitInfo {
                    kind: ExitKind::Exit,
                    status: exit::SPAWN_FAILURE_STATUS,
                };
                let _ = self
                    .report_with(&mut client, ContainerState::Dead, None, Some(stillborn))
                    .await;
                return Err(err);
            }
        };
        tracing::info!(tag = %self.tag, workload_pid = ?child.id(), "workload started");

        self.monitor(client, child).await
    }

    /// Supervises the workload: a non-blocking exit check and one status
    /// report per tick, acting on the returned directive.
    async fn monitor(&self, mut client: Option<Client>, mut child: Child) -> Result<ShimOutcome> {
        let workload_pid = child.id();
        let mut term_deadline: Option<Instant> = None;

        loop {
            if let Some(status) = child.try_wait()? {
                let info = exit::exit_info_from_status(status);
                tracing::info!(tag = %self.tag, exit_info = %info, "workload exited");
                let _ = self
                    .report_with(&mut client, ContainerState::Dead, workload_pid, Some(info))
                    .await;
                return Ok(ShimOutcome::WorkloadExited(info));
            }

            // escalate a graceful shutdown that overstayed its grace
            if let Some(deadline) = term_deadline {
                if Instant::now() >= deadline {
                    tracing::warn!(tag = %self.tag, "grace period elapsed, escalating");
                    if let Some(pid) = workload_pid {
                        signal::kill_hard(pid);
                    }
                    term_deadline = None;
                }
            }

            match self
                .report_with(&mut client, ContainerState::Running, workload_pid, None)
                .await
            {
                Some(Directive::Okay) | None => {}
                Some(Directive::Stop) => {
                    if term_deadline.is_none() {
                        tracing::info!(tag = %self.tag, "stop requested, terminating workload");
                        if let Some(pid) = workload_pid {
                            signal::terminate(pid);
                        }
                        term_deadline = Some(Instant::now() + self.stop_grace);
                    }
                }
                Some(Directive::Abort) => {
                    tracing::error!(tag = %self.tag, "registry does not recognize us, aborting");
                    if let Some(pid) = workload_pid {
                        signal::kill_hard(pid);
                    }
                    let _ = child.wait().await;
                    return Ok(ShimOutcome::Aborted);
                }
            }

            tokio::time::sleep(self.report_interval).await;
        }
    }

    /// Sends one status report, (re)connecting as needed. `None` means
    /// the manager is unreachable; the caller reports again next tick.
    async fn report_with(
        &self,
        client: &mut Option<Client>,
        state: ContainerState,
        workload_pid: Option<u32>,
        exit_info: Option<ExitInfo>,
    ) -> Option<Directive> {
        if client.is_none() {
            match Client::connect(&self.endpoint).await {
                Ok(conn) => *client = Some(conn),
                Err(err) => {
                    tracing::warn!(tag = %self.tag, error = %err, "manager unreachable");
                    return None;
                }
            }
        }
        let conn = client.as_mut()?;
        let report = StatusReport {
            tag: self.tag.clone(),
            state,
            pid: Some(std::process::id()),
            workload_pid,
            exit_info,
        };
        match conn.report(report).await {
            Ok(directive) => Some(directive),
            Err(err) => {
                tracing::warn!(tag = %self.tag, error = %err, "status report failed, will retry");
                *client = None;
                None
            }
        }
    }
}

fn spawn_workload(command: &WorkloadCommand) -> Result<Child> {
    let child = Command::new(&command.cmd).args(&command.args).spawn()?;
    Ok(child)
}
