//! Wire protocol for Parley.
//!
//! This crate defines the "language" that the client and server speak:
//!
//! - **Types** ([`Command`], [`Message`]): the closed command set and the
//!   command-plus-fields value that travels on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how a message becomes a
//!   frame body and back.
//! - **Framing** ([`write_frame`], [`read_frame`]): how frame boundaries
//!   are recovered from a boundary-less stream.
//! - **Errors** ([`ProtocolError`]): what can go wrong per message.
//!
//! # Architecture
//!
//! The protocol layer sits between the raw socket and the client session.
//! It knows nothing about connections or lifecycle, only bytes and
//! messages:
//!
//! ```text
//! socket (bytes) → framing (frame body) → codec (Message) → session
//! ```

mod codec;
mod error;
pub mod framing;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use framing::{MAX_FRAME_LEN, read_frame, write_frame};
pub use types::{Command, Message};
