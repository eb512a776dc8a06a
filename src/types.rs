/// Successful reply from the agent backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentReply {
    /// Reply text. Guaranteed non-empty by the decoder.
    pub text: String,
    /// Optional trace URL pointing at the backend's run record.
    pub trace_url: Option<String>,
}

/// Backend health probe result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub version: String,
}
