//! Codec trait and the JSON implementation.
//!
//! A codec converts between a [`Message`] and the byte body that travels
//! inside one frame (see [`framing`](crate::framing) for the frame
//! boundaries themselves). The session layer doesn't care HOW a message is
//! serialized, only that something implements [`Codec`], so a binary codec
//! can be swapped in later without touching any other code.
//!
//! ## Field escaping
//!
//! The wire body is a JSON object, `{"command": "<token>", "fields":
//! [...]}`. JSON string escaping is the escaping rule for field data:
//! fields may contain any character, including quotes, colons, and
//! newlines, without ever colliding with the structural bytes of the body.
//! There is no separator character that data could be confused with.

use serde::{Deserialize, Serialize};

use crate::{Command, Message, ProtocolError};

/// A codec that can encode a [`Message`] to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the session's background event loop
/// carries its codec into a spawned task.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a message into one frame body.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails. Arity is
    /// a [`Message`] construction invariant, so it cannot fail here.
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError>;

    /// Parses one frame body back into a message.
    ///
    /// # Errors
    /// - [`ProtocolError::Malformed`]: the bytes are not a recognizable
    ///   message body.
    /// - [`ProtocolError::UnknownCommand`]: the command token is not in
    ///   the enumeration.
    /// - [`ProtocolError::InvalidFieldCount`]: the field count does not
    ///   match the command's arity.
    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// The raw shape of a message body. The command travels as its wire token
/// so the decoder can distinguish "not a message at all" from "a message
/// naming a command we don't know".
#[derive(Serialize, Deserialize)]
struct WireMessage {
    command: String,
    fields: Vec<String>,
}

/// A [`Codec`] producing JSON bodies.
///
/// Human-readable, which makes development traffic easy to inspect in a
/// packet capture or log line. The tradeoff is size; a compact binary
/// codec can replace this behind the same trait if bandwidth ever matters.
///
/// ## Example
///
/// ```rust
/// use parley_protocol::{Codec, Command, JsonCodec, Message};
///
/// let codec = JsonCodec;
/// let message = Message::new(
///     Command::Login,
///     vec!["User".into(), "Password1234!".into()],
/// )
/// .unwrap();
///
/// let bytes = codec.encode(&message).unwrap();
/// let decoded = codec.decode(&bytes).unwrap();
/// assert_eq!(message, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError> {
        let wire = WireMessage {
            command: message.command().wire_token().to_string(),
            fields: message.fields().to_vec(),
        };
        serde_json::to_vec(&wire)
            .map_err(|e| ProtocolError::Encode(e.to_string()))
    }

    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError> {
        let wire: WireMessage = serde_json::from_slice(data)
            .map_err(|e| ProtocolError::Malformed(e.to_string()))?;
        let command = Command::from_wire_token(&wire.command)
            .ok_or(ProtocolError::UnknownCommand(wire.command))?;
        Message::new(command, wire.fields)
    }
}

// =========================================================================
// Tests
// =========================================================================
