//! The owned background decode loop.
//!
//! [`Session::listen`](crate::Session::listen) moves the input stream
//! into a task running [`read_loop`]; decoded messages flow to the caller
//! through an [`Events`] handle. The task is the sole reader of the
//! stream, so application code can never race protocol decoding.

use std::sync::Arc;

use parley_protocol::{Codec, Message, framing};
use tokio::io::BufReader;
use tokio::net::tcp::OwnedReadHalf;
use tokio::sync::Notify;
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::error::{ClientError, stream_closed};

/// The receiving end of a session's event loop.
#[derive(Debug)]
pub struct Events {
    inbox: mpsc::UnboundedReceiver<Message>,
}

impl Events {
    pub(crate) fn new(inbox: mpsc::UnboundedReceiver<Message>) -> Self {
        Self { inbox }
    }

    /// Waits for the next inbound message.
    ///
    /// # Errors
    /// [`ClientError::ReadFailed`] with a stream-closed error once the
    /// loop has ended, whether through `disconnect`, a transport failure,
    /// or the server closing the connection.
    pub async fn next(&mut self) -> Result<Message, ClientError> {
        self.inbox
            .recv()
            .await
            .ok_or_else(|| ClientError::ReadFailed(stream_closed()))
    }

    /// Drains one queued message without waiting. `Ok(None)` means the
    /// loop is alive but nothing is queued.
    ///
    /// # Errors
    /// [`ClientError::ReadFailed`] once the loop has ended.
    pub fn try_next(&mut self) -> Result<Option<Message>, ClientError> {
        match self.inbox.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(ClientError::ReadFailed(stream_closed()))
            }
        }
    }
}

/// Reads frames until shutdown, transport failure, or a dropped receiver.
///
/// Decode failures are scoped to one frame: the frame is logged and
/// skipped, and the loop keeps going. Ending the loop drops `tx`, which
/// is how [`Events`] learns the stream is over.
pub(crate) async fn read_loop<C: Codec>(
    mut reader: BufReader<OwnedReadHalf>,
    codec: C,
    tx: mpsc::UnboundedSender<Message>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                tracing::debug!("event loop shut down");
                break;
            }
            frame = framing::read_frame(&mut reader) => match frame {
                Ok(body) => match codec.decode(&body) {
                    Ok(message) => {
                        tracing::debug!(command = %message.command(), "event received");
                        if tx.send(message).is_err() {
                            // Receiver dropped; nobody is listening.
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping undecodable message");
                    }
                },
                Err(e) => {
                    tracing::debug!(error = %e, "event loop ended");
                    break;
                }
            }
        }
    }
}
