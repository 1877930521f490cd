//! Error types for the client layer.
//!
//! The split mirrors the failure domains: transport errors
//! (connection-scoped, fatal to the session once it is connected),
//! lifecycle errors (the caller used the session in the wrong state), and
//! protocol errors (scoped to one message, never fatal). The collaborator
//! modules carry their own small enums.

use std::io;

use parley_protocol::ProtocolError;

use crate::session::SessionState;

/// Errors surfaced by a [`Session`](crate::Session).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Opening the transport failed: refused, timed out, or the host did
    /// not resolve. The session stays `Disconnected`.
    #[error("connection failed: {0}")]
    ConnectionFailed(#[source] io::Error),

    /// A post-connect write failed or timed out. The session closes.
    #[error("write failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// A post-connect read failed, or a read was attempted on a closed
    /// session. The session closes.
    #[error("read failed: {0}")]
    ReadFailed(#[source] io::Error),

    /// The operation is not valid in the session's current lifecycle
    /// state.
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    /// An encode/decode error scoped to a single message. The session is
    /// unaffected.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// The error every read on a closed session reports.
pub(crate) fn stream_closed() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "stream closed")
}

/// Reported when the raw input stream has been handed to the event loop.
pub(crate) fn input_detached() -> io::Error {
    io::Error::other("input stream owned by the event loop")
}

// ---------------------------------------------------------------------------
// Collaborator errors
// ---------------------------------------------------------------------------

/// Errors from [`ClientConfig`](crate::ClientConfig) loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config source could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    /// A line is not `key=value`.
    #[error("malformed config line {line}: {text:?}")]
    MalformedLine { line: usize, text: String },

    /// The `port` value is not a valid TCP port.
    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    /// A key outside the recognized set.
    #[error("unknown config key: {0:?}")]
    UnknownKey(String),
}

/// Error from parsing a leaderboard record, see
/// [`Ranking`](crate::Ranking).
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    /// The record does not have four colon-delimited fields with numeric
    /// rank, score, and wins.
    #[error("malformed ranking record: {0}")]
    MalformedRecord(String),
}
