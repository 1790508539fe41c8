//! Request and response message types of the control protocol.

use serde::{Deserialize, Serialize};
use warden_common::types::{
    AssistantManagerInfo, ContainerInfo, ContainerState, Directive, ExitInfo, Tag,
    WorkloadCommand,
};

/// A request from any caller class to the control interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Create a container record in the `Ready` state.
    Create {
        /// Tag for the new record.
        tag: Tag,
        /// Workload command, if known at creation time.
        #[serde(default)]
        command: Option<WorkloadCommand>,
    },
    /// Transition a `Ready` container to `Running`.
    Start {
        /// Tag to start.
        tag: Tag,
        /// Workload command; falls back to the one recorded at creation.
        #[serde(default)]
        command: Option<WorkloadCommand>,
    },
    /// Begin the shutdown procedure for a `Running` container.
    Stop {
        /// Tag to stop.
        tag: Tag,
    },
    /// Erase a terminal record from the registry.
    Delete {
        /// Tag to delete.
        tag: Tag,
    },
    /// Query container info; an empty tag set means all.
    List {
        /// Tags to look up; unknown tags are omitted from the result.
        #[serde(default)]
        tags: Vec<Tag>,
    },
    /// Atomically drain the ready queue (executor surface).
    DequeueReady,
    /// Query the tags of all active containers (executor surface).
    GetRunning,
    /// Look up a shim descriptor (assistant-manager surface).
    AssistantStatus {
        /// Tag of the reporting shim.
        tag: Tag,
    },
    /// Push a status update and receive a directive
    /// (assistant-manager surface).
    Report {
        /// Tag of the reporting shim.
        tag: Tag,
        /// The state the shim observes.
        state: ContainerState,
        /// The shim's own process id.
        #[serde(default)]
        pid: Option<u32>,
        /// The workload's process id.
        #[serde(default)]
        workload_pid: Option<u32>,
        /// Termination details when reporting a dead workload.
        #[serde(default)]
        exit_info: Option<ExitInfo>,
    },
}

/// The control interface's reply to a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Response {
    /// The mutation completed.
    Ok,
    /// Reply to a list query.
    Containers {
        /// Info for every requested (and known) tag.
        containers: Vec<ContainerInfo>,
    },
    /// Reply to a drain or running query.
    Tags {
        /// The tags in question.
        tags: Vec<Tag>,
    },
    /// Reply to a shim descriptor lookup; `None` means unmanaged.
    Assistant {
        /// The descriptor, if the tag is managed.
        info: Option<AssistantManagerInfo>,
    },
    /// Reply to a status report; reports never fail at the protocol
    /// level, the directive carries the verdict in-band.
    Directive {
        /// What the shim must do next.
        directive: Directive,
    },
    /// The request's precondition on current state was violated.
    Error {
        /// Human-readable explanation.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_format_is_op_tagged() {
        let req = Request::Create {
            tag: Tag::new("web"),
            command: None,
        };
        let json = serde_json::to_string(&req).expect("serialize");
        assert!(json.contains(r#""op":"create""#), "got {json}");
        assert!(json.contains(r#""tag":"web""#), "got {json}");
    }

    #[test]
    fn create_request_parses_without_command_field() {
        let req: Request =
            serde_json::from_str(r#"{"op":"create","tag":"web"}"#).expect("deserialize");
        assert_eq!(
            req,
            Request::Create {
                tag: Tag::new("web"),
                command: None
            }
        );
    }

    #[test]
    fn report_request_carries_protocol_state_names() {
        let req = Request::Report {
            tag: Tag::new("web"),
            state: ContainerState::Running,
            pid: Some(42),
            workload_pid: Some(43),
            exit_info: None,
        };
        let json = serde_json::to_string(&req).expect("serialize");
        assert!(json.contains(r#""state":"RUNNING""#), "got {json}");
    }

    #[test]
    fn directive_response_round_trips() {
        let resp = Response::Directive {
            directive: Directive::Abort,
        };
        let json = serde_json::to_string(&resp).expect("serialize");
        assert!(json.contains(r#""directive":"ABORT""#), "got {json}");
        let back: Response = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, resp);
    }

    #[test]
    fn unit_requests_need_only_the_op_field() {
        let req: Request =
            serde_json::from_str(r#"{"op":"dequeue_ready"}"#).expect("deserialize");
        assert_eq!(req, Request::DequeueReady);
    }
}
