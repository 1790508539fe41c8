//! End-to-end test of the control protocol over a real socket.
//!
//! Drives the full container state machine manually through the wire
//! client, standing in for the operator, the executor, and the shims —
//! the same roles that share one server in production.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use warden_common::types::{
    ContainerState, Directive, ExitInfo, ExitKind, StatusReport, Tag, WorkloadCommand,
};
use warden_proto::Client;
use warden_registry::RegistryHandle;
use warden_server::Server;

async fn spawn_server() -> SocketAddr {
    let server = Server::new(RegistryHandle::new());
    let listener = Server::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(tokio::spawn(server.serve(listener)));
    addr
}

fn echo_cmd() -> WorkloadCommand {
    WorkloadCommand::new("/bin/echo", vec!["howdy".into()])
}

fn report(tag: &str, state: ContainerState, exit_info: Option<ExitInfo>) -> StatusReport {
    StatusReport {
        tag: Tag::new(tag),
        state,
        pid: Some(1000),
        workload_pid: Some(2000),
        exit_info,
    }
}

#[tokio::test]
async fn full_lifecycle_over_the_wire() {
    let addr = spawn_server().await;
    let mut client = Client::connect(&addr.to_string()).await.expect("connect");

    // empty registry lists nothing
    assert!(client.list(vec![]).await.expect("list").is_empty());

    // create two containers; a duplicate create must fail
    for tag in ["one", "two"] {
        client.create(Tag::new(tag), None).await.expect("create");
    }
    assert!(client.create(Tag::new("one"), None).await.is_err());
    assert_eq!(client.list(vec![]).await.expect("list").len(), 2);

    // nothing runs until something drives the state machine
    assert!(client.running().await.expect("running").is_empty());

    // the executor's view: both tags claimable exactly once
    let mut tags = client.dequeue_ready().await.expect("drain");
    tags.sort();
    assert_eq!(tags, vec![Tag::new("one"), Tag::new("two")]);
    assert!(client.dequeue_ready().await.expect("drain").is_empty());

    // an unknown shim reporting in is told to abort
    let directive = client
        .report(report("unknown", ContainerState::Running, None))
        .await
        .expect("report");
    assert_eq!(directive, Directive::Abort);
    assert_eq!(client.list(vec![]).await.expect("list").len(), 2);

    // start the first container and let its shim check in
    client
        .start(Tag::new("one"), Some(echo_cmd()))
        .await
        .expect("start");
    assert!(client.start(Tag::new("one"), Some(echo_cmd())).await.is_err());
    let directive = client
        .report(report("one", ContainerState::Running, None))
        .await
        .expect("report");
    assert_eq!(directive, Directive::Okay);
    assert_eq!(client.running().await.expect("running"), vec![Tag::new("one")]);

    // the shim descriptor now carries the reported pids
    let info = client
        .assistant_status(Tag::new("one"))
        .await
        .expect("status")
        .expect("managed");
    assert_eq!(info.command, echo_cmd());
    assert_eq!(info.pid, Some(1000));
    assert_eq!(info.workload_pid, Some(2000));

    // the workload exits on its own
    let exit = ExitInfo {
        kind: ExitKind::Exit,
        status: 0,
    };
    let directive = client
        .report(report("one", ContainerState::Dead, Some(exit)))
        .await
        .expect("report");
    assert_eq!(directive, Directive::Okay);
    let infos = client.list(vec![Tag::new("one")]).await.expect("list");
    assert_eq!(infos[0].state, ContainerState::Dead);
    assert_eq!(infos[0].exit_info, Some(exit));
    assert!(client.running().await.expect("running").is_empty());

    // second container: operator-requested shutdown
    client
        .start(Tag::new("two"), Some(echo_cmd()))
        .await
        .expect("start");
    client.stop(Tag::new("two")).await.expect("stop");
    let infos = client.list(vec![Tag::new("two")]).await.expect("list");
    assert_eq!(infos[0].state, ContainerState::Stopping);

    // deleting an active container must fail
    assert!(client.delete(Tag::new("two")).await.is_err());

    // its shim keeps reporting alive and is told to stop
    let directive = client
        .report(report("two", ContainerState::Running, None))
        .await
        .expect("report");
    assert_eq!(directive, Directive::Stop);

    // the shim winds the workload down and reports the corpse
    let signaled = ExitInfo {
        kind: ExitKind::Signal,
        status: 15,
    };
    let directive = client
        .report(report("two", ContainerState::Dead, Some(signaled)))
        .await
        .expect("report");
    assert_eq!(directive, Directive::Okay);

    // a dead container cannot be restarted
    assert!(client.start(Tag::new("one"), Some(echo_cmd())).await.is_err());

    // clean up both; a second delete must fail
    for tag in ["one", "two"] {
        client.delete(Tag::new(tag)).await.expect("delete");
    }
    assert!(client.delete(Tag::new("two")).await.is_err());
    assert!(client.list(vec![]).await.expect("list").is_empty());
}

#[tokio::test]
async fn deleted_tag_reporting_in_is_aborted() {
    let addr = spawn_server().await;
    let mut client = Client::connect(&addr.to_string()).await.expect("connect");

    client
        .create(Tag::new("gone"), Some(echo_cmd()))
        .await
        .expect("create");
    client.start(Tag::new("gone"), None).await.expect("start");
    let exit = ExitInfo {
        kind: ExitKind::Exit,
        status: 1,
    };
    let _ = client
        .report(report("gone", ContainerState::Dead, Some(exit)))
        .await
        .expect("report");
    client.delete(Tag::new("gone")).await.expect("delete");

    // the registry forgot the tag; a straggling shim must abort
    let directive = client
        .report(report("gone", ContainerState::Running, None))
        .await
        .expect("report");
    assert_eq!(directive, Directive::Abort);
    assert!(client.list(vec![]).await.expect("list").is_empty());
}

#[tokio::test]
async fn concurrent_clients_are_serviced() {
    let addr = spawn_server().await;
    let mut first = Client::connect(&addr.to_string()).await.expect("connect");
    let mut second = Client::connect(&addr.to_string()).await.expect("connect");

    // both connections stay open and interleave requests
    first.create(Tag::new("a"), None).await.expect("create");
    second.create(Tag::new("b"), None).await.expect("create");
    assert_eq!(first.list(vec![]).await.expect("list").len(), 2);
    assert_eq!(second.list(vec![]).await.expect("list").len(), 2);
}

#[tokio::test]
async fn malformed_line_keeps_the_connection_usable() {
    let addr = spawn_server().await;
    let stream = tokio::net::TcpStream::connect(addr).await.expect("connect");
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    writer
        .write_all(b"this is not json\n")
        .await
        .expect("write garbage");
    let reply = lines.next_line().await.expect("read").expect("line");
    assert!(reply.contains("malformed request"), "got {reply}");

    writer
        .write_all(b"{\"op\":\"list\"}\n")
        .await
        .expect("write request");
    let reply = lines.next_line().await.expect("read").expect("line");
    assert!(reply.contains("containers"), "got {reply}");
}
