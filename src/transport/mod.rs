//! Peer link: newline-delimited frames over a byte stream, with link events
//! delivered on a channel.

use std::net::SocketAddr;

use anyhow::bail;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;

pub mod in_memory;
pub mod pump;
pub mod tcp;

pub use pump::{lock_session, shared, spawn_session_pump, SharedSession};
pub use tcp::Link;

/// Something that happened on a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A peer is attached. Carries its address for TCP links.
    Connected(Option<SocketAddr>),
    /// One complete frame, newline stripped.
    Frame(String),
    /// The connection ended. Sent once per connection.
    Disconnected,
}

pub type LinkEvents = UnboundedReceiver<LinkEvent>;

/// Read one newline-terminated frame of at most `max_len` bytes.
///
/// Returns `Ok(None)` on a clean end of stream. A frame that is too long or
/// cut off by the end of stream is an error.
pub async fn read_frame<R>(reader: &mut R, max_len: usize) -> anyhow::Result<Option<Vec<u8>>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let limit = max_len as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') {
        if buf.len() > max_len {
            bail!("Frame too large (max: {} bytes)", max_len);
        }
        bail!("Connection closed in the middle of a frame");
    }
    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Some(buf))
}

pub async fn write_frame<W>(writer: &mut W, frame: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(frame.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Skip events until a peer is connected. Returns its address, or an error
/// if the link closed first.
pub async fn wait_connected(events: &mut LinkEvents) -> anyhow::Result<Option<SocketAddr>> {
    while let Some(event) = events.recv().await {
        match event {
            LinkEvent::Connected(addr) => return Ok(addr),
            LinkEvent::Disconnected => bail!("Link closed before a peer connected"),
            LinkEvent::Frame(_) => {}
        }
    }
    bail!("Link dropped before a peer connected")
}
