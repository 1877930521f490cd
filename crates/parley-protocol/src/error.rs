//! Error types for the protocol layer.
//!
//! Every error here is local to a single message. A decode failure tells
//! the caller that one frame was bad; it says nothing about the health of
//! the connection, which is the session layer's concern.

use crate::Command;

/// Errors that can occur while encoding or decoding a message.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The field count does not match the command's declared arity.
    ///
    /// Raised on the encode side by [`Message::new`](crate::Message::new)
    /// and on the decode side when a well-formed body carries the wrong
    /// number of fields for its command.
    #[error("{command} expects {expected} field(s), got {actual}")]
    InvalidFieldCount {
        command: Command,
        expected: usize,
        actual: usize,
    },

    /// The bytes do not contain a recognizable message body.
    ///
    /// Covers invalid JSON, a non-object body, and a body missing the
    /// `command` or `fields` members.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// The body was well-formed but its command token is not in the
    /// enumeration. Carries the offending token.
    #[error("unknown command token: {0:?}")]
    UnknownCommand(String),

    /// Serialization failed while encoding.
    #[error("encode failed: {0}")]
    Encode(String),
}
