//! Core protocol types for Parley's wire format.
//!
//! This module defines the vocabulary that the client and server speak:
//! [`Command`], the closed set of message kinds, and [`Message`], one
//! command plus its ordered field payload. Every message on the wire
//! carries exactly one command.

use std::fmt;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// The closed set of message kinds.
///
/// Each command identifies one semantic operation and fixes the number of
/// string fields that travel with it. The set is shared by the encoder and
/// the decoder, and every dispatch site matches on it exhaustively, so
/// adding a command is a compile-time-checked change everywhere it must be
/// handled.
///
/// Client-originated and server-originated kinds are symmetric: the client
/// sends `ChatMessageFromClient`, the server fans it back out as
/// `ChatMessageFromServer` with the sender attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Client → Server: authenticate with `[username, password]`.
    Login,
    /// Server → Client: outcome of a login attempt, `["OK"]` or a reason.
    LoginResult,
    /// Client → Server: register with `[username, email, password]`.
    CreateAccount,
    /// Server → Client: outcome of account creation, `["OK"]` or a reason.
    CreateAccountResult,
    /// Client → Server: one chat line, `[text]`.
    ChatMessageFromClient,
    /// Server → Client: one chat line with its sender, `[sender, text]`.
    ChatMessageFromServer,
    /// Client → Server: ask for the current leaderboard. No fields.
    RequestRanking,
    /// Server → Client: one leaderboard record, `[rank:username:score:wins]`.
    RankingEntry,
    /// Client → Server: leaving gracefully. No fields.
    Logout,
}

impl Command {
    /// Every command, in wire-token order. Used by tests that must cover
    /// the whole set.
    pub const ALL: [Command; 9] = [
        Command::Login,
        Command::LoginResult,
        Command::CreateAccount,
        Command::CreateAccountResult,
        Command::ChatMessageFromClient,
        Command::ChatMessageFromServer,
        Command::RequestRanking,
        Command::RankingEntry,
        Command::Logout,
    ];

    /// The token that names this command on the wire.
    pub fn wire_token(self) -> &'static str {
        match self {
            Command::Login => "LOGIN",
            Command::LoginResult => "LOGIN_RESULT",
            Command::CreateAccount => "CREATE_ACCOUNT",
            Command::CreateAccountResult => "CREATE_ACCOUNT_RESULT",
            Command::ChatMessageFromClient => "CHAT_MESSAGE_FROM_CLIENT",
            Command::ChatMessageFromServer => "CHAT_MESSAGE_FROM_SERVER",
            Command::RequestRanking => "REQUEST_RANKING",
            Command::RankingEntry => "RANKING_ENTRY",
            Command::Logout => "LOGOUT",
        }
    }

    /// Resolves a wire token back to its command.
    ///
    /// Returns `None` for tokens outside the enumeration; the codec turns
    /// that into [`ProtocolError::UnknownCommand`](crate::ProtocolError).
    pub fn from_wire_token(token: &str) -> Option<Command> {
        let command = match token {
            "LOGIN" => Command::Login,
            "LOGIN_RESULT" => Command::LoginResult,
            "CREATE_ACCOUNT" => Command::CreateAccount,
            "CREATE_ACCOUNT_RESULT" => Command::CreateAccountResult,
            "CHAT_MESSAGE_FROM_CLIENT" => Command::ChatMessageFromClient,
            "CHAT_MESSAGE_FROM_SERVER" => Command::ChatMessageFromServer,
            "REQUEST_RANKING" => Command::RequestRanking,
            "RANKING_ENTRY" => Command::RankingEntry,
            "LOGOUT" => Command::Logout,
            _ => return None,
        };
        Some(command)
    }

    /// The exact number of fields this command carries.
    pub fn arity(self) -> usize {
        match self {
            Command::Login => 2,
            Command::LoginResult => 1,
            Command::CreateAccount => 3,
            Command::CreateAccountResult => 1,
            Command::ChatMessageFromClient => 1,
            Command::ChatMessageFromServer => 2,
            Command::RequestRanking => 0,
            Command::RankingEntry => 1,
            Command::Logout => 0,
        }
    }
}

/// Display uses the wire token, so `tracing::debug!(command = %cmd, ...)`
/// logs the same name a packet capture would show.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_token())
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// One command plus its ordered string fields.
///
/// Field order is significant and the field count is fixed per command
/// (see [`Command::arity`]). The count is validated at construction, so a
/// `Message` value with the wrong arity never exists: both the encode path
/// and the decode path go through [`Message::new`].
///
/// Messages are transient. One is built per send or receive event and
/// dropped afterwards; nothing in the protocol layer holds on to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    command: Command,
    fields: Vec<String>,
}

impl Message {
    /// Builds a message, validating the field count against the command's
    /// declared arity.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidFieldCount`](crate::ProtocolError)
    /// when `fields.len() != command.arity()`.
    pub fn new(
        command: Command,
        fields: Vec<String>,
    ) -> Result<Self, crate::ProtocolError> {
        if fields.len() != command.arity() {
            return Err(crate::ProtocolError::InvalidFieldCount {
                command,
                expected: command.arity(),
                actual: fields.len(),
            });
        }
        Ok(Self { command, fields })
    }

    /// The command this message carries.
    pub fn command(&self) -> Command {
        self.command
    }

    /// The ordered field payload.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Consumes the message, yielding its fields.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

// =========================================================================
// Tests
// =========================================================================
