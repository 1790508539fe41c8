//! Supervision tests against a live in-process server.

#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::time::Duration;

use warden_common::types::{ContainerState, ExitKind, Tag, WorkloadCommand};
use warden_registry::RegistryHandle;
use warden_server::Server;
use warden_shim::{AssistantManager, ShimOutcome};

async fn spawn_server() -> (String, RegistryHandle) {
    let handle = RegistryHandle::new();
    let server = Server::new(handle.clone());
    let listener = Server::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();
    drop(tokio::spawn(server.serve(listener)));
    (addr, handle)
}

fn shim(addr: &str, tag: &str) -> AssistantManager {
    AssistantManager::new(
        addr.to_owned(),
        Tag::new(tag),
        Duration::from_millis(50),
        Duration::from_millis(200),
    )
}

async fn wait_for_state(handle: &RegistryHandle, tag: &str, state: ContainerState) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        let infos = handle.list(&[Tag::new(tag)]).await;
        if infos.first().is_some_and(|i| i.state == state) {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {tag} to reach {state}"
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

#[tokio::test]
async fn unmanaged_shim_fails_fast() {
    let (addr, _handle) = spawn_server().await;
    let result = shim(&addr, "rogue").run().await;
    assert!(result.is_err(), "an unmanaged shim must refuse to run");
}

#[tokio::test]
async fn shim_runs_a_short_workload_to_completion() {
    let (addr, handle) = spawn_server().await;
    let tag = Tag::new("short");
    handle
        .create(
            tag.clone(),
            Some(WorkloadCommand::new("/bin/true", Vec::new())),
        )
        .await
        .expect("create");
    handle.start(&tag, None).await.expect("start");

    let outcome = shim(&addr, "short").run().await.expect("supervise");
    let ShimOutcome::WorkloadExited(info) = outcome else {
        panic!("expected a workload exit, got {outcome:?}");
    };
    assert_eq!(info.kind, ExitKind::Exit);
    assert_eq!(info.status, 0);

    wait_for_state(&handle, "short", ContainerState::Dead).await;
    let infos = handle.list(&[tag]).await;
    assert_eq!(infos[0].exit_info, Some(info));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn stop_directive_terminates_a_long_workload() {
    let (addr, handle) = spawn_server().await;
    let tag = Tag::new("long");
    handle
        .create(
            tag.clone(),
            Some(WorkloadCommand::new("/bin/sleep", vec!["30".into()])),
        )
        .await
        .expect("create");
    handle.start(&tag, None).await.expect("start");

    let manager = shim(&addr, "long");
    let supervise = tokio::spawn(async move { manager.run().await });

    // wait until the shim has reported the workload alive
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        let info = handle.assistant_status(&tag).await.expect("managed");
        if info.workload_pid.is_some() {
            break;
        }
        assert!(tokio::time::Instant::now() < deadline, "shim never reported");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    handle.stop(&tag).await.expect("stop");

    let outcome = supervise
        .await
        .expect("join")
        .expect("supervision completes");
    let ShimOutcome::WorkloadExited(info) = outcome else {
        panic!("expected a workload exit, got {outcome:?}");
    };
    assert_eq!(info.kind, ExitKind::Signal);
    assert_eq!(info.status, 15, "sleep should die to SIGTERM");

    wait_for_state(&handle, "long", ContainerState::Dead).await;
}
