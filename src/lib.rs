//! `agent-inbox-http` is an async HTTP client for chat-agent inbox endpoints.
//!
//! The crate wraps a backend's `/inbox` endpoint with retrying delivery:
//! - [`AgentInboxClient::deliver`] — always returns a string, degrading to a
//!   fixed fallback reply when every attempt fails
//! - [`AgentInboxClient::try_deliver`] — the fallible form, returning a typed
//!   [`AgentReply`]
//! - [`AgentInboxClient::health`] — probes the backend's `/health` endpoint
//!
//! Failed attempts are retried with exponential backoff (1s, 2s, ... by
//! default) up to a configurable attempt budget.

mod client;
mod error;
mod message;
mod options;
mod types;
mod wire;

pub use client::{AgentInboxClient, DEFAULT_FALLBACK_REPLY};
pub use error::AgentInboxError;
pub use message::InboxMessage;
pub use options::ClientOptions;
pub use types::{AgentReply, Health};

pub type Result<T> = std::result::Result<T, AgentInboxError>;
