//! Client session layer for Parley.
//!
//! This crate owns one client-to-server connection: opening it,
//! authenticating over it, exchanging [`Message`](parley_protocol::Message)s,
//! and tearing it down. The lifecycle is strict:
//!
//! ```text
//! Disconnected → Connected → Closed (terminal)
//! ```
//!
//! The core type is [`Session`]. Inbound traffic can be consumed three
//! ways: [`Session::recv`] (one message per call, caller-driven),
//! [`Session::input`] (the raw stream, bring your own decode loop), or
//! [`Session::listen`] (an owned background task feeding an [`Events`]
//! handle, the recommended shape for applications).
//!
//! Alongside the session live its three small collaborators:
//! [`ClientConfig`] (endpoint from a key-value source),
//! [`validate_details`] (account-creation form checks), and [`Ranking`]
//! (leaderboard record parsing).

mod account;
mod config;
mod error;
mod events;
mod ranking;
mod session;

pub use account::validate_details;
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError, RankingError};
pub use events::Events;
pub use ranking::Ranking;
pub use session::{Session, SessionConfig, SessionState};
