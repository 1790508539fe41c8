//! Newline-delimited JSON framing over async byte streams.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use warden_common::error::Result;

/// Writes one message as a single JSON line and flushes.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one JSON line and deserializes it.
///
/// Returns `Ok(None)` on a cleanly closed stream. Blank lines between
/// messages are tolerated and skipped.
///
/// # Errors
///
/// Returns an error if the read fails or the line is not a valid
/// message.
pub async fn read_message<R, T>(reader: &mut R) -> Result<Option<T>>
where
    R: AsyncBufRead + Unpin,
    T: DeserializeOwned,
{
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            return Ok(None);
        }
        if line.trim().is_empty() {
            continue;
        }
        return Ok(Some(serde_json::from_str(line.trim())?));
    }
}

#[cfg(test)]
mod tests {
    use warden_common::types::Tag;

    use super::*;
    use crate::message::Request;

    #[tokio::test]
    async fn round_trip_through_a_buffer() {
        let mut buf = Vec::new();
        let req = Request::Stop {
            tag: Tag::new("web"),
        };
        write_message(&mut buf, &req).await.expect("write");
        assert_eq!(buf.last(), Some(&b'\n'));

        let mut reader = buf.as_slice();
        let back: Request = read_message(&mut reader)
            .await
            .expect("read")
            .expect("message present");
        assert_eq!(back, req);
    }

    #[tokio::test]
    async fn closed_stream_yields_none() {
        let mut reader: &[u8] = b"";
        let message: Option<Request> = read_message(&mut reader).await.expect("read");
        assert!(message.is_none());
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let mut buf = b"\n\n".to_vec();
        write_message(&mut buf, &Request::DequeueReady)
            .await
            .expect("write");
        let mut reader = buf.as_slice();
        let back: Request = read_message(&mut reader)
            .await
            .expect("read")
            .expect("message present");
        assert_eq!(back, Request::DequeueReady);
    }
}
