//! Maps protocol requests onto registry operations.

use warden_common::error::Result;
use warden_common::types::StatusReport;
use warden_proto::message::{Request, Response};
use warden_registry::RegistryHandle;

/// Executes one request against the registry and builds the response.
///
/// Mutations answer `Ok` or an in-band `Error`; reads always answer
/// their data; reports always answer a directive. Nothing here can take
/// the server down — caller misuse stays a caller problem.
pub async fn dispatch(handle: &RegistryHandle, request: Request) -> Response {
    match request {
        Request::Create { tag, command } => reply(handle.create(tag, command).await),
        Request::Start { tag, command } => reply(handle.start(&tag, command).await),
        Request::Stop { tag } => reply(handle.stop(&tag).await),
        Request::Delete { tag } => reply(handle.delete(&tag).await),
        Request::List { tags } => Response::Containers {
            containers: handle.list(&tags).await,
        },
        Request::DequeueReady => Response::Tags {
            tags: handle.dequeue_ready().await,
        },
        Request::GetRunning => Response::Tags {
            tags: handle.running().await,
        },
        Request::AssistantStatus { tag } => Response::Assistant {
            info: handle.assistant_status(&tag).await,
        },
        Request::Report {
            tag,
            state,
            pid,
            workload_pid,
            exit_info,
        } => {
            let report = StatusReport {
                tag,
                state,
                pid,
                workload_pid,
                exit_info,
            };
            Response::Directive {
                directive: handle.report(&report).await,
            }
        }
    }
}

fn reply(result: Result<()>) -> Response {
    match result {
        Ok(()) => Response::Ok,
        Err(err) => Response::Error {
            message: err.to_string(),
        },
    }
}
