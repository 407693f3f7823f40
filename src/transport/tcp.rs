use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Context};
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::{read_frame, write_frame, LinkEvent, LinkEvents};
use crate::config::LinkConfig;
use crate::session::FrameSink;

/// Handle to a peer connection. Clones share the same connection.
///
/// Each live connection runs one listener task, which reads frames and
/// reports them as [`LinkEvent`]s, and one writer task fed by [`Link::send`].
#[derive(Clone)]
pub struct Link {
    shared: Arc<Shared>,
}

struct Shared {
    config: LinkConfig,
    events: mpsc::UnboundedSender<LinkEvent>,
    outbound: Mutex<Option<mpsc::UnboundedSender<String>>>,
    stop: Mutex<Option<oneshot::Sender<()>>>,
    accept_task: Mutex<Option<JoinHandle<()>>>,
    writer_task: Mutex<Option<JoinHandle<()>>>,
    connected: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Link {
    pub fn new() -> (Self, LinkEvents) {
        Self::with_config(LinkConfig::default())
    }

    pub fn with_config(config: LinkConfig) -> (Self, LinkEvents) {
        let (events, rx) = mpsc::unbounded_channel();
        let shared = Arc::new(Shared {
            config,
            events,
            outbound: Mutex::new(None),
            stop: Mutex::new(None),
            accept_task: Mutex::new(None),
            writer_task: Mutex::new(None),
            connected: AtomicBool::new(false),
        });
        (Self { shared }, rx)
    }

    /// Listen on all interfaces and accept a single peer in the background.
    /// Returns the bound address; pass port `0` for an ephemeral port.
    pub async fn start_as_host(&self, port: u16) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind port {}", port))?;
        let addr = listener.local_addr()?;
        info!("Hosting on {}", addr);
        let link = self.clone();
        let task = tokio::spawn(async move {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    info!("Peer connected from {}", peer);
                    let (reader, writer) = stream.into_split();
                    if let Err(e) = link.attach_peer(reader, writer, Some(peer)) {
                        warn!("Could not attach peer: {}", e);
                    }
                }
                Err(e) => warn!("Accept failed: {}", e),
            }
        });
        *lock(&self.shared.accept_task) = Some(task);
        Ok(addr)
    }

    /// Connect to a host.
    pub async fn connect_to(&self, address: &str, port: u16) -> anyhow::Result<()> {
        let stream = TcpStream::connect((address, port))
            .await
            .with_context(|| format!("Failed to connect to {}:{}", address, port))?;
        let peer = stream.peer_addr().ok();
        info!("Connected to {}:{}", address, port);
        let (reader, writer) = stream.into_split();
        self.attach_peer(reader, writer, peer)
    }

    /// Run the link over an arbitrary stream pair.
    pub fn attach<R, W>(&self, reader: R, writer: W) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        self.attach_peer(reader, writer, None)
    }

    fn attach_peer<R, W>(&self, reader: R, writer: W, peer: Option<SocketAddr>) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        if self.shared.connected.swap(true, Ordering::SeqCst) {
            bail!("Link is already connected");
        }
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        *lock(&self.shared.outbound) = Some(out_tx);
        *lock(&self.shared.stop) = Some(stop_tx);
        let _ = self.shared.events.send(LinkEvent::Connected(peer));
        *lock(&self.shared.writer_task) = Some(tokio::spawn(run_writer(writer, out_rx)));
        tokio::spawn(run_listener(
            self.shared.clone(),
            BufReader::new(reader),
            stop_rx,
        ));
        Ok(())
    }

    /// Queue a frame for the peer. Returns `false` when no peer is connected
    /// or the frame cannot be framed (embedded newline, too long).
    pub fn send(&self, frame: &str) -> bool {
        if frame.contains('\n') || frame.len() > self.shared.config.max_frame_len {
            warn!("Refusing to send malformed frame ({} bytes)", frame.len());
            return false;
        }
        if !self.is_connected() {
            return false;
        }
        match lock(&self.shared.outbound).as_ref() {
            Some(tx) => tx.send(frame.to_string()).is_ok(),
            None => false,
        }
    }

    /// Close the connection and stop accepting. The listener reports
    /// [`LinkEvent::Disconnected`] if a peer was connected.
    pub fn disconnect(&self) {
        if let Some(task) = lock(&self.shared.accept_task).take() {
            task.abort();
        }
        lock(&self.shared.outbound).take();
        if let Some(stop) = lock(&self.shared.stop).take() {
            let _ = stop.send(());
        }
    }

    /// Like [`Link::disconnect`], but first waits until every queued frame
    /// has been written and the stream shut down. Use it before the runtime
    /// goes away, since dropping the runtime cancels the writer task.
    pub async fn close(&self) {
        if let Some(task) = lock(&self.shared.accept_task).take() {
            task.abort();
        }
        lock(&self.shared.outbound).take();
        let writer = lock(&self.shared.writer_task).take();
        if let Some(writer) = writer {
            if let Err(e) = writer.await {
                warn!("Writer task failed: {}", e);
            }
        }
        if let Some(stop) = lock(&self.shared.stop).take() {
            let _ = stop.send(());
        }
    }

    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }
}

impl FrameSink for Link {
    fn send_frame(&self, frame: &str) -> bool {
        self.send(frame)
    }
}

async fn run_writer<W>(mut writer: W, mut frames: mpsc::UnboundedReceiver<String>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = frames.recv().await {
        if let Err(e) = write_frame(&mut writer, &frame).await {
            warn!("Write failed: {}", e);
            break;
        }
    }
    let _ = writer.shutdown().await;
}

async fn run_listener<R>(shared: Arc<Shared>, mut reader: BufReader<R>, mut stop: oneshot::Receiver<()>)
where
    R: AsyncRead + Unpin,
{
    let max_len = shared.config.max_frame_len;
    loop {
        tokio::select! {
            _ = &mut stop => break,
            frame = read_frame(&mut reader, max_len) => match frame {
                Ok(Some(bytes)) if bytes.is_empty() => {}
                Ok(Some(bytes)) => match String::from_utf8(bytes) {
                    Ok(text) => {
                        let _ = shared.events.send(LinkEvent::Frame(text));
                    }
                    Err(_) => warn!("Dropped frame that is not UTF-8"),
                },
                Ok(None) => {
                    debug!("Peer closed the connection");
                    break;
                }
                Err(e) => {
                    warn!("Connection error: {}", e);
                    break;
                }
            },
        }
    }
    {
        let mut outbound = lock(&shared.outbound);
        outbound.take();
        lock(&shared.stop).take();
        shared.connected.store(false, Ordering::SeqCst);
    }
    let _ = shared.events.send(LinkEvent::Disconnected);
}
