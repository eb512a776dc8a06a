/// Error type returned by this crate.
///
/// Every variant is treated as retryable by the delivery loop; exhaustion of
/// the attempt budget surfaces the last error (or, through
/// [`AgentInboxClient::deliver`](crate::AgentInboxClient::deliver), the
/// fallback reply).
#[derive(Debug, thiserror::Error)]
pub enum AgentInboxError {
    /// Network or request execution error from `reqwest`, including timeouts.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response decoding or contract-shape error (malformed JSON, missing or
    /// empty `response` field).
    #[error("decode error: {0}")]
    Decode(String),
}
