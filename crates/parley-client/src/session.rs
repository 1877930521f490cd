//! The client session: one connection, its lifecycle, and its traffic.
//!
//! A [`Session`] exclusively owns a TCP socket and both of its halves.
//! Exclusive ownership plus `&mut self` on every I/O operation is the
//! whole concurrency story: two tasks cannot race on the socket because
//! the borrow checker will not let them share the session mutably.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use parley_protocol::{Codec, Command, JsonCodec, Message, framing};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Notify;
use tokio::time::timeout;

use crate::error::{ClientError, input_detached, stream_closed};
use crate::events::{Events, read_loop};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Timeouts for session I/O.
///
/// Reads carry no timeout: a chat connection is legitimately idle for as
/// long as nobody speaks. Connect and write are the operations that must
/// not hang forever.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long `connect` waits for the transport before giving up.
    pub connect_timeout: Duration,

    /// How long a single write may take before it is treated as failed.
    pub write_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(30),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The lifecycle state of a session.
///
/// ```text
/// Disconnected ──(connect)──→ Connected ──(disconnect / I/O failure)──→ Closed
///       │                                                                ↑
///       └───────────────────────(disconnect)──────────────────────────────┘
/// ```
///
/// `Closed` is terminal: there is no transition out, and a session is not
/// reusable after it. `login` does not appear in the diagram because it
/// does not change connection state; it only records the username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, no transport yet.
    Disconnected,
    /// The transport is open and messages can flow.
    Connected,
    /// The transport has been released. Terminal.
    Closed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connected => "connected",
            SessionState::Closed => "closed",
        })
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One client-to-server connection and its message exchange.
///
/// Generic over the [`Codec`] so a binary codec can be swapped in without
/// touching session logic; [`Session::new`] gives the JSON default.
pub struct Session<C: Codec = JsonCodec> {
    state: SessionState,
    config: SessionConfig,
    codec: C,
    username: Option<String>,
    remote: Option<(String, u16)>,
    reader: Option<BufReader<OwnedReadHalf>>,
    writer: Option<OwnedWriteHalf>,
    /// Wakes the event loop on `disconnect` so an in-flight read fails
    /// promptly instead of hanging on a dead socket.
    shutdown: Arc<Notify>,
}

impl Session<JsonCodec> {
    /// Creates a disconnected session with the JSON codec and default
    /// timeouts.
    pub fn new() -> Self {
        Self::with_codec(JsonCodec, SessionConfig::default())
    }

    /// Creates a disconnected session with the JSON codec and the given
    /// timeouts.
    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_codec(JsonCodec, config)
    }
}

impl Default for Session<JsonCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> Session<C> {
    /// Creates a disconnected session with a custom codec.
    pub fn with_codec(codec: C, config: SessionConfig) -> Self {
        Self {
            state: SessionState::Disconnected,
            config,
            codec,
            username: None,
            remote: None,
            reader: None,
            writer: None,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Opens the transport connection.
    ///
    /// Valid only from `Disconnected`. On success the session is
    /// `Connected`; on failure (refused, timeout, unresolved host) it
    /// stays `Disconnected` and `connect` may be retried.
    ///
    /// # Errors
    /// [`ClientError::InvalidState`] outside `Disconnected`,
    /// [`ClientError::ConnectionFailed`] on transport failure.
    pub async fn connect(
        &mut self,
        host: &str,
        port: u16,
    ) -> Result<(), ClientError> {
        if self.state != SessionState::Disconnected {
            return Err(ClientError::InvalidState {
                operation: "connect",
                state: self.state,
            });
        }

        let addr = format!("{host}:{port}");
        let stream =
            match timeout(self.config.connect_timeout, TcpStream::connect(&addr))
                .await
            {
                Ok(Ok(stream)) => stream,
                Ok(Err(e)) => return Err(ClientError::ConnectionFailed(e)),
                Err(_) => {
                    return Err(ClientError::ConnectionFailed(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("connect to {addr} timed out"),
                    )));
                }
            };

        let (read_half, write_half) = stream.into_split();
        self.reader = Some(BufReader::new(read_half));
        self.writer = Some(write_half);
        self.remote = Some((host.to_string(), port));
        self.state = SessionState::Connected;
        tracing::info!(%host, port, "connected");
        Ok(())
    }

    /// Transmits credentials as a `LOGIN` message and records the
    /// username locally.
    ///
    /// Success means **transmitted, not accepted**: this call does not
    /// wait for or interpret any server response. The server answers with
    /// a `LOGIN_RESULT` message on the inbound stream; whether to
    /// correlate it is the caller's decision.
    ///
    /// # Errors
    /// [`ClientError::InvalidState`] when not connected,
    /// [`ClientError::WriteFailed`] when the transport write fails.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        self.send_message(Command::Login, &[username, password]).await?;
        self.username = Some(username.to_string());
        tracing::info!(%username, "credentials transmitted");
        Ok(())
    }

    /// Encodes and writes one message. Fire-and-forget: no response is
    /// awaited, and FIFO delivery on the stream is the only ordering
    /// guarantee.
    ///
    /// # Errors
    /// - [`ClientError::InvalidState`] when not connected.
    /// - [`ClientError::Protocol`] when the field count does not match
    ///   the command's arity. The session is unaffected.
    /// - [`ClientError::WriteFailed`] when the write fails or times out.
    ///   The session closes: a broken or wedged transport is not
    ///   recoverable mid-stream.
    pub async fn send_message(
        &mut self,
        command: Command,
        fields: &[&str],
    ) -> Result<(), ClientError> {
        if self.state != SessionState::Connected {
            return Err(ClientError::InvalidState {
                operation: "send",
                state: self.state,
            });
        }

        let message = Message::new(
            command,
            fields.iter().map(|f| (*f).to_string()).collect(),
        )?;
        let body = self.codec.encode(&message)?;

        let Some(writer) = self.writer.as_mut() else {
            return Err(ClientError::WriteFailed(stream_closed()));
        };
        let result = match timeout(
            self.config.write_timeout,
            framing::write_frame(writer, &body),
        )
        .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e),
            Err(_) => {
                Err(io::Error::new(io::ErrorKind::TimedOut, "write timed out"))
            }
        };

        match result {
            Ok(()) => {
                tracing::debug!(command = %message.command(), bytes = body.len(), "message sent");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "write failed, closing session");
                self.abort();
                Err(ClientError::WriteFailed(e))
            }
        }
    }

    /// Reads and decodes one inbound message on the calling task.
    ///
    /// Decode failures are scoped to the offending message and leave the
    /// session connected; transport failures close it.
    ///
    /// # Errors
    /// [`ClientError::ReadFailed`] with a stream-closed error when the
    /// session is not connected (a closed session never silently returns
    /// empty or blocks), [`ClientError::ReadFailed`] on transport
    /// failure, [`ClientError::Protocol`] on a bad frame body.
    pub async fn recv(&mut self) -> Result<Message, ClientError> {
        if self.state != SessionState::Connected {
            return Err(ClientError::ReadFailed(stream_closed()));
        }
        let Some(reader) = self.reader.as_mut() else {
            return Err(ClientError::ReadFailed(input_detached()));
        };

        match framing::read_frame(reader).await {
            Ok(body) => {
                let message = self.codec.decode(&body)?;
                tracing::debug!(command = %message.command(), "message received");
                Ok(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "read failed, closing session");
                self.abort();
                Err(ClientError::ReadFailed(e))
            }
        }
    }

    /// Raw access to the buffered input stream, for callers that drive
    /// decoding themselves instead of using [`recv`](Self::recv) or
    /// [`listen`](Self::listen).
    ///
    /// # Errors
    /// [`ClientError::ReadFailed`] with a stream-closed error once the
    /// session is closed, or when the stream has been handed to the
    /// event loop.
    pub fn input(
        &mut self,
    ) -> Result<&mut BufReader<OwnedReadHalf>, ClientError> {
        if self.state != SessionState::Connected {
            return Err(ClientError::ReadFailed(stream_closed()));
        }
        self.reader
            .as_mut()
            .ok_or_else(|| ClientError::ReadFailed(input_detached()))
    }

    /// Moves the input stream into a dedicated background task that
    /// decodes inbound messages and delivers them through the returned
    /// [`Events`] handle.
    ///
    /// Undecodable frames are logged and skipped; transport errors end
    /// the stream. After this call, [`recv`](Self::recv) and
    /// [`input`](Self::input) report the stream as detached.
    ///
    /// # Errors
    /// [`ClientError::InvalidState`] when not connected.
    pub fn listen(&mut self) -> Result<Events, ClientError>
    where
        C: Clone,
    {
        if self.state != SessionState::Connected {
            return Err(ClientError::InvalidState {
                operation: "listen",
                state: self.state,
            });
        }
        let reader = self
            .reader
            .take()
            .ok_or_else(|| ClientError::ReadFailed(input_detached()))?;

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let codec = self.codec.clone();
        let shutdown = Arc::clone(&self.shutdown);
        tokio::spawn(read_loop(reader, codec, tx, shutdown));
        Ok(Events::new(rx))
    }

    /// Closes the transport and moves to `Closed`. Idempotent: a second
    /// call is a no-op, from any state.
    ///
    /// An event loop started with [`listen`](Self::listen) is woken and
    /// ends promptly; any pending or future read then fails with a
    /// stream-closed error.
    pub async fn disconnect(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.shutdown.notify_one();
        self.reader = None;
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.shutdown().await {
                tracing::debug!(error = %e, "socket shutdown during disconnect failed");
            }
        }
        self.state = SessionState::Closed;
        tracing::info!("session closed");
    }

    /// The username recorded by the last successful [`login`](Self::login),
    /// or `None` before any login.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The `(host, port)` this session connected to, once connected.
    pub fn remote(&self) -> Option<(&str, u16)> {
        self.remote.as_ref().map(|(host, port)| (host.as_str(), *port))
    }

    /// Tears the transport down after an I/O failure. No graceful
    /// shutdown: the socket is already broken.
    fn abort(&mut self) {
        self.reader = None;
        self.writer = None;
        self.shutdown.notify_one();
        self.state = SessionState::Closed;
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Lifecycle tests that need no peer. Everything that exchanges
    //! traffic with a real socket lives in `tests/session.rs`.

    use super::*;

    #[test]
    fn test_new_session_starts_disconnected() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.username(), None);
        assert_eq!(session.remote(), None);
    }

    #[test]
    fn test_session_state_display() {
        assert_eq!(SessionState::Disconnected.to_string(), "disconnected");
        assert_eq!(SessionState::Connected.to_string(), "connected");
        assert_eq!(SessionState::Closed.to_string(), "closed");
    }

    #[test]
    fn test_default_config_timeouts() {
        let config = SessionConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.write_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_login_before_connect_is_invalid_state() {
        let mut session = Session::new();
        let err = session.login("User", "Password1234!").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::InvalidState {
                state: SessionState::Disconnected,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_send_before_connect_is_invalid_state() {
        let mut session = Session::new();
        let err = session
            .send_message(Command::ChatMessageFromClient, &["hi"])
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_recv_before_connect_is_read_failed() {
        // Reads outside `Connected` are an I/O failure, not a lifecycle
        // error: callers polling the input channel must see "stream
        // closed", never a silent empty result.
        let mut session = Session::new();
        let err = session.recv().await.unwrap_err();
        assert!(matches!(err, ClientError::ReadFailed(_)));
    }

    #[tokio::test]
    async fn test_listen_before_connect_is_invalid_state() {
        let mut session = Session::new();
        let err = session.listen().unwrap_err();
        assert!(matches!(err, ClientError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_disconnect_before_connect_is_terminal() {
        // `disconnect` is allowed from any state and always lands in
        // `Closed`, after which the session is not reusable.
        let mut session = Session::new();
        session.disconnect().await;
        assert_eq!(session.state(), SessionState::Closed);

        let err = session.connect("127.0.0.1", 1).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::InvalidState {
                state: SessionState::Closed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent_without_transport() {
        let mut session = Session::new();
        session.disconnect().await;
        session.disconnect().await;
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_invalid_state_error_names_operation_and_state() {
        let err = ClientError::InvalidState {
            operation: "send",
            state: SessionState::Closed,
        };
        assert_eq!(err.to_string(), "cannot send while session is closed");
    }
}
