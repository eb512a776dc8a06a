use std::fmt;
use std::time::Duration;

use reqwest::header;

// tokio::time::sleep is only available on non-WASM targets.
#[cfg(not(target_arch = "wasm32"))]
use tokio::time::sleep;

use crate::{
    wire::{self, InboxRequest},
    AgentInboxError, AgentReply, ClientOptions, Health, InboxMessage, Result,
};

/// Fallback reply returned by [`AgentInboxClient::deliver`] when every
/// attempt fails.
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, the agent service is temporarily unavailable. Please try again in a moment.";

#[derive(Clone)]
/// HTTP client for a chat-agent inbox backend.
///
/// Holds no shared mutable state; cloning is cheap and concurrent deliveries
/// each run an independent retry loop.
pub struct AgentInboxClient {
    http: reqwest::Client,
    base_url: String,
    authorization: Option<String>,
    fallback_reply: String,
    options: ClientOptions,
}

impl fmt::Debug for AgentInboxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentInboxClient")
            .field("base_url", &self.base_url)
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("options", &self.options)
            .finish()
    }
}

impl AgentInboxClient {
    /// Creates a client with no `Authorization` header.
    ///
    /// `base_url` is the backend root (e.g. `http://127.0.0.1:8000`); the
    /// client derives `/inbox` and `/health` from it.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            authorization: None,
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_owned(),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client with a full raw authorization value.
    ///
    /// Example: `"Bearer <token>"` or any custom scheme.
    pub fn new_raw_auth(base_url: impl Into<String>, authorization: impl Into<String>) -> Self {
        let mut client = Self::new(base_url);
        client.authorization = Some(authorization.into());
        client
    }

    /// Creates a client from a bearer token.
    ///
    /// If the token is missing the `Bearer ` prefix, it is added automatically.
    pub fn new_bearer(base_url: impl Into<String>, token: impl AsRef<str>) -> Self {
        let authorization = normalize_bearer_authorization(token.as_ref());
        Self::new_raw_auth(base_url, authorization)
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `AGENT_INBOX_URL` — backend root URL (required, non-empty)
    /// - `AGENT_INBOX_TOKEN` — optional bearer token
    ///
    /// **Not available on `wasm32` targets** — environment variables do not
    /// exist in browser runtimes. Use [`AgentInboxClient::new`] or
    /// [`AgentInboxClient::new_bearer`] with credentials passed in from the
    /// host environment.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        let url = std::env::var("AGENT_INBOX_URL")
            .map_err(|_| "missing AGENT_INBOX_URL environment variable".to_owned())?;
        if url.trim().is_empty() {
            return Err("AGENT_INBOX_URL is set but empty".to_owned());
        }
        match std::env::var("AGENT_INBOX_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new_bearer(url, token)),
            _ => Ok(Self::new(url)),
        }
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Overrides the fixed fallback reply returned on exhaustion.
    pub fn with_fallback_reply(mut self, reply: impl Into<String>) -> Self {
        self.fallback_reply = reply.into();
        self
    }

    /// Delivers a message and always returns a reply string.
    ///
    /// On success this is the backend's reply text; after all attempts fail
    /// it is the configured fallback reply. Failures are never propagated —
    /// the only other observable effect is diagnostic logging.
    pub async fn deliver(&self, message: &InboxMessage) -> String {
        match self.try_deliver(message).await {
            Ok(reply) => reply.text,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    conversation_id = %message.conversation_id,
                    error = %err,
                    "delivery exhausted all attempts, returning fallback reply"
                );
                #[cfg(not(feature = "tracing"))]
                let _ = err;

                self.fallback_reply.clone()
            }
        }
    }

    /// Delivers a message and returns the typed reply, or the last error
    /// after the attempt budget is exhausted.
    pub async fn try_deliver(&self, message: &InboxMessage) -> Result<AgentReply> {
        let payload = InboxRequest {
            conversation_id: &message.conversation_id,
            sender: &message.sender,
            message: &message.body,
            meta: message.meta.as_ref(),
        };
        self.post_inbox_with_retry(&payload).await
    }

    /// Probes the backend's `/health` endpoint. Single attempt, no retries.
    pub async fn health(&self) -> Result<Health> {
        let mut request = self
            .http
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_millis(self.options.timeout_ms));
        if let Some(authorization) = &self.authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }

        let response = request.send().await.map_err(AgentInboxError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(AgentInboxError::Transport)?;

        if !status.is_success() {
            return Err(AgentInboxError::Http {
                status: status.as_u16(),
                body,
            });
        }
        wire::decode_health(&body)
    }

    async fn post_inbox_with_retry(&self, payload: &InboxRequest<'_>) -> Result<AgentReply> {
        let max_attempts = self.options.max_attempts.max(1);
        let mut attempt = 1usize;
        loop {
            match self.post_inbox_once(payload).await {
                Ok(reply) => return Ok(reply),
                Err(err) => {
                    if attempt >= max_attempts {
                        return Err(err);
                    }

                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %err,
                        "inbox attempt failed, backing off before retry"
                    );
                    #[cfg(not(feature = "tracing"))]
                    let _ = err;

                    self.wait_before_retry(attempt).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn post_inbox_once(&self, payload: &InboxRequest<'_>) -> Result<AgentReply> {
        // On WASM, reqwest uses AbortController for timeout; the `.timeout()`
        // method is available on both targets.
        let mut request = self
            .http
            .post(format!("{}/inbox", self.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(Duration::from_millis(self.options.timeout_ms))
            .json(payload);
        if let Some(authorization) = &self.authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }

        let response = request.send().await.map_err(AgentInboxError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(AgentInboxError::Transport)?;

        if !status.is_success() {
            return Err(AgentInboxError::Http {
                status: status.as_u16(),
                body,
            });
        }
        wire::decode_reply(&body)
    }

    /// Waits before the next retry attempt.
    ///
    /// On native targets: exponential backoff sleep via `tokio::time::sleep`.
    /// On WASM targets: no-op — edge functions prefer fast failure over
    /// sleeping, and `tokio::time::sleep` is not available.
    async fn wait_before_retry(&self, attempts_completed: usize) {
        let delay_ms = backoff_delay_ms(attempts_completed, self.options.retry_backoff_ms);

        #[cfg(feature = "tracing")]
        tracing::debug!("retrying inbox request after {} ms", delay_ms);

        #[cfg(not(target_arch = "wasm32"))]
        sleep(Duration::from_millis(delay_ms)).await;

        // WASM: no sleep implementation — suppress unused variable warning.
        #[cfg(target_arch = "wasm32")]
        let _ = delay_ms;
    }
}

/// Backoff delay after `attempts_completed` failed attempts: `base * 2^(n-1)`,
/// so the wait before attempt 2 is one base unit, before attempt 3 two, etc.
/// The exponent is clamped and the multiply saturates.
fn backoff_delay_ms(attempts_completed: usize, base_ms: u64) -> u64 {
    let exp = attempts_completed.saturating_sub(1).min(16) as u32;
    base_ms.saturating_mul(1u64 << exp)
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
