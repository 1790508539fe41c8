//! TCP accept loop for the control interface.

use tokio::io::{AsyncBufReadExt, BufReader, BufWriter};
use tokio::net::{TcpListener, TcpStream};
use warden_common::error::Result;
use warden_proto::codec;
use warden_proto::message::{Request, Response};
use warden_registry::RegistryHandle;

use crate::dispatch;

/// The control-interface server over a shared registry.
#[derive(Debug, Clone)]
pub struct Server {
    handle: RegistryHandle,
}

impl Server {
    /// Creates a server over the given registry handle.
    #[must_use]
    pub const fn new(handle: RegistryHandle) -> Self {
        Self { handle }
    }

    /// Returns the registry handle this server mutates.
    #[must_use]
    pub fn handle(&self) -> RegistryHandle {
        self.handle.clone()
    }

    /// Binds the control endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(addr: &str) -> Result<TcpListener> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "control interface listening");
        Ok(listener)
    }

    /// Accepts connections forever, handling each on its own task.
    ///
    /// # Errors
    ///
    /// Returns an error only if the accept loop itself fails.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        loop {
            let (stream, peer) = listener.accept().await?;
            tracing::debug!(%peer, "connection accepted");
            let handle = self.handle.clone();
            let _ = tokio::spawn(async move {
                if let Err(err) = handle_connection(stream, handle).await {
                    tracing::debug!(%peer, error = %err, "connection closed");
                }
            });
        }
    }
}

/// Serves one connection: any number of request lines, one response
/// line each. A malformed line gets an in-band error and the connection
/// stays usable.
async fn handle_connection(stream: TcpStream, handle: RegistryHandle) -> Result<()> {
    let (reader, writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut writer = BufWriter::new(writer);
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<Request>(line.trim()) {
            Ok(request) => dispatch::dispatch(&handle, request).await,
            Err(err) => {
                tracing::warn!(error = %err, "malformed request line");
                Response::Error {
                    message: format!("malformed request: {err}"),
                }
            }
        };
        codec::write_message(&mut writer, &response).await?;
    }
}
