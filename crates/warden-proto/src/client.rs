//! Async client for the control protocol.
//!
//! One connection serves any number of request/response exchanges. The
//! typed helpers translate in-band [`Response::Error`] replies into
//! [`WardenError::InvalidOperation`]; the status-report helper never
//! does, because reports answer in-band with a directive instead.

use std::time::Duration;

use tokio::io::BufReader;
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use warden_common::error::{Result, WardenError};
use warden_common::types::{
    AssistantManagerInfo, ContainerInfo, Directive, StatusReport, Tag, WorkloadCommand,
};

use crate::codec;
use crate::message::{Request, Response};

/// A connected control-protocol client.
#[derive(Debug)]
pub struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    /// Connects to the control interface at `addr` (`host:port`).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(reader),
            writer,
        })
    }

    /// Connects to the control interface, retrying until `timeout`
    /// elapses. Used by satellites that may come up before the server.
    ///
    /// # Errors
    ///
    /// Returns the last connection error once the timeout is exhausted.
    pub async fn connect_retry(addr: &str, timeout: Duration) -> Result<Self> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match Self::connect(addr).await {
                Ok(client) => return Ok(client),
                Err(err) => {
                    if tokio::time::Instant::now() >= deadline {
                        return Err(err);
                    }
                    tracing::debug!(addr, error = %err, "server not up yet, retrying");
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
            }
        }
    }

    /// Sends one request and reads one response.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the server closes the
    /// connection mid-exchange.
    pub async fn request(&mut self, request: &Request) -> Result<Response> {
        codec::write_message(&mut self.writer, request).await?;
        codec::read_message(&mut self.reader)
            .await?
            .ok_or_else(|| WardenError::Protocol {
                message: "connection closed before a response arrived".to_owned(),
            })
    }

    /// Creates a container record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the tag already exists.
    pub async fn create(&mut self, tag: Tag, command: Option<WorkloadCommand>) -> Result<()> {
        match self.request(&Request::Create { tag, command }).await? {
            Response::Ok => Ok(()),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Starts a `Ready` container.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the record is not `Ready` or has no
    /// command.
    pub async fn start(&mut self, tag: Tag, command: Option<WorkloadCommand>) -> Result<()> {
        match self.request(&Request::Start { tag, command }).await? {
            Response::Ok => Ok(()),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Requests shutdown of a `Running` container.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the record is not `Running`.
    pub async fn stop(&mut self, tag: Tag) -> Result<()> {
        match self.request(&Request::Stop { tag }).await? {
            Response::Ok => Ok(()),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Deletes a terminal container record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the tag is unknown or not terminal.
    pub async fn delete(&mut self, tag: Tag) -> Result<()> {
        match self.request(&Request::Delete { tag }).await? {
            Response::Ok => Ok(()),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Queries container info; an empty tag set means all.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    pub async fn list(&mut self, tags: Vec<Tag>) -> Result<Vec<ContainerInfo>> {
        match self.request(&Request::List { tags }).await? {
            Response::Containers { containers } => Ok(containers),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Atomically drains the ready queue.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    pub async fn dequeue_ready(&mut self) -> Result<Vec<Tag>> {
        match self.request(&Request::DequeueReady).await? {
            Response::Tags { tags } => Ok(tags),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Queries the tags of all active containers.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    pub async fn running(&mut self) -> Result<Vec<Tag>> {
        match self.request(&Request::GetRunning).await? {
            Response::Tags { tags } => Ok(tags),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Looks up a shim descriptor; `None` means the tag is unmanaged.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure.
    pub async fn assistant_status(&mut self, tag: Tag) -> Result<Option<AssistantManagerInfo>> {
        match self.request(&Request::AssistantStatus { tag }).await? {
            Response::Assistant { info } => Ok(info),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Pushes a status report and returns the directive.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure; the unknown-tag case
    /// arrives in-band as [`Directive::Abort`].
    pub async fn report(&mut self, report: StatusReport) -> Result<Directive> {
        let request = Request::Report {
            tag: report.tag,
            state: report.state,
            pid: report.pid,
            workload_pid: report.workload_pid,
            exit_info: report.exit_info,
        };
        match self.request(&request).await? {
            Response::Directive { directive } => Ok(directive),
            other => Err(Self::unexpected(other)),
        }
    }

    fn unexpected(response: Response) -> WardenError {
        match response {
            Response::Error { message } => WardenError::InvalidOperation { message },
            other => WardenError::Protocol {
                message: format!("unexpected response: {other:?}"),
            },
        }
    }
}
