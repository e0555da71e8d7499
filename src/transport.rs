//! Transport adapters: where outbound events go and inbound events come from.
//!
//! The session controller only sees the [`Transport`] trait. Production uses
//! [`connect`], which opens a websocket and splits it into a writer task fed
//! by a [`ChannelTransport`] and a reader task that decodes envelopes into
//! [`Inbound`] events. Tests use [`RecordingTransport`].
//!
//! Frames that fail to decode are logged and dropped; the connection stays up.
//! When the server drops the socket, [`reconnect`] reopens it with backoff.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use frames::{Inbound, Outbound};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, info, warn};

/// Error raised when an event cannot be handed to the transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection's writer has shut down.
    #[error("transport closed")]
    Closed,
    /// The websocket handshake failed.
    #[error("websocket connect failed: {0}")]
    Connect(Box<tungstenite::Error>),
}

/// Fire-and-forget delivery of outbound events.
pub trait Transport {
    /// Queue `event` for delivery. Must not block.
    ///
    /// # Errors
    ///
    /// [`TransportError::Closed`] if the connection is gone.
    fn emit(&mut self, event: Outbound) -> Result<(), TransportError>;
}

/// Forwards events into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelTransport {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { tx }
    }
}

impl Transport for ChannelTransport {
    fn emit(&mut self, event: Outbound) -> Result<(), TransportError> {
        self.tx.send(event).map_err(|_| TransportError::Closed)
    }
}

/// Keeps every emitted event in memory.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Vec<Outbound>,
    closed: bool,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> &[Outbound] {
        &self.sent
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.sent)
    }

    /// Make every later `emit` fail with [`TransportError::Closed`].
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl Transport for RecordingTransport {
    fn emit(&mut self, event: Outbound) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.sent.push(event);
        Ok(())
    }
}

// =============================================================================
// WEBSOCKET
// =============================================================================

/// An open websocket connection.
pub struct Connection {
    /// Handle for queuing outbound events.
    pub transport: ChannelTransport,
    /// Decoded inbound events. Ends when the socket closes.
    pub inbound: mpsc::UnboundedReceiver<Inbound>,
}

/// Open a websocket to `url` and start the reader and writer tasks.
///
/// # Errors
///
/// [`TransportError::Connect`] if the handshake fails.
pub async fn connect(url: &str) -> Result<Connection, TransportError> {
    let (stream, _) = connect_async(url)
        .await
        .map_err(|error| TransportError::Connect(Box::new(error)))?;
    info!(%url, "connected");

    let (mut sink, mut source) = stream.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<Outbound>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<Inbound>();

    tokio::spawn(async move {
        while let Some(event) = out_rx.recv().await {
            let text = match frames::encode_outbound(&event) {
                Ok(text) => text,
                Err(error) => {
                    warn!(event = event.name(), %error, "dropping unencodable event");
                    continue;
                }
            };
            if let Err(error) = sink.send(Message::Text(text.into())).await {
                warn!(%error, "websocket send failed; writer exiting");
                break;
            }
        }
        if let Err(error) = sink.close().await {
            debug!(%error, "websocket close failed");
        }
    });

    tokio::spawn(async move {
        while let Some(message) = source.next().await {
            let text = match message {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => break,
                Ok(_) => continue,
                Err(error) => {
                    warn!(%error, "websocket read failed");
                    break;
                }
            };
            match frames::decode_inbound(text.as_str()) {
                Ok(event) => {
                    if in_tx.send(event).is_err() {
                        break;
                    }
                }
                Err(error) => warn!(%error, "dropping undecodable frame"),
            }
        }
        info!("websocket reader finished");
    });

    Ok(Connection { transport: ChannelTransport::new(out_tx), inbound: in_rx })
}

// =============================================================================
// RECONNECT
// =============================================================================

/// Wait before the first reconnect attempt; doubles per attempt.
pub const RECONNECT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Longest wait between reconnect attempts.
pub const RECONNECT_MAX_DELAY: Duration = Duration::from_secs(8);

/// Backoff before the zero-based `attempt`.
#[must_use]
pub fn reconnect_delay(attempt: u32) -> Duration {
    RECONNECT_BASE_DELAY
        .saturating_mul(2_u32.saturating_pow(attempt))
        .min(RECONNECT_MAX_DELAY)
}

/// Reopen the websocket to `url`, trying up to `attempts` times with
/// exponential backoff.
///
/// # Errors
///
/// The last connect error once every attempt has failed, or
/// [`TransportError::Closed`] when `attempts` is zero.
pub async fn reconnect(url: &str, attempts: u32) -> Result<Connection, TransportError> {
    let mut last = TransportError::Closed;
    for attempt in 0..attempts {
        tokio::time::sleep(reconnect_delay(attempt)).await;
        match connect(url).await {
            Ok(connection) => {
                info!(%url, attempt = attempt + 1, "reconnected");
                return Ok(connection);
            }
            Err(error) => {
                warn!(%url, attempt = attempt + 1, %error, "reconnect failed");
                last = error;
            }
        }
    }
    Err(last)
}
