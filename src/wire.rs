use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{AgentInboxError, AgentReply, Health, Result};

/// JSON body POSTed to `/inbox`.
///
/// Field names follow the backend contract (`conversationId` is camelCase,
/// the rest are single words). `meta` is omitted entirely when absent.
#[derive(Debug, Serialize)]
pub struct InboxRequest<'a> {
    #[serde(rename = "conversationId")]
    pub conversation_id: &'a str,
    pub sender: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<&'a Map<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
pub struct InboxResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub trace_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Decodes a raw `/inbox` response body into a reply.
///
/// A body that is not JSON, lacks the `response` field, or carries an empty
/// `response` string is a decode failure — the delivery loop treats it the
/// same as a transport error.
pub fn decode_reply(body: &str) -> Result<AgentReply> {
    let parsed = serde_json::from_str::<InboxResponse>(body)
        .map_err(|err| AgentInboxError::Decode(format!("invalid inbox JSON: {err}; body: {body}")))?;

    match parsed.response {
        Some(text) if !text.is_empty() => Ok(AgentReply {
            text,
            trace_url: parsed.trace_url,
        }),
        Some(_) => Err(AgentInboxError::Decode(
            "inbox response field is empty".to_owned(),
        )),
        None => Err(AgentInboxError::Decode(format!(
            "inbox response field missing; body: {body}"
        ))),
    }
}

pub fn decode_health(body: &str) -> Result<Health> {
    let parsed = serde_json::from_str::<HealthResponse>(body).map_err(|err| {
        AgentInboxError::Decode(format!("invalid health JSON: {err}; body: {body}"))
    })?;
    Ok(Health {
        status: parsed.status,
        version: parsed.version,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::{decode_health, decode_reply, InboxRequest};
    use crate::AgentInboxError;

    #[test]
    fn request_serializes_backend_field_names() {
        let request = InboxRequest {
            conversation_id: "c1",
            sender: "u1",
            message: "hello",
            meta: None,
        };
        let value = serde_json::to_value(&request).expect("request must serialize");
        assert_eq!(
            value,
            json!({"conversationId": "c1", "sender": "u1", "message": "hello"})
        );
    }

    #[test]
    fn request_includes_meta_when_present() {
        let mut meta = Map::new();
        meta.insert("channel".to_owned(), json!("xmtp"));
        let request = InboxRequest {
            conversation_id: "c1",
            sender: "u1",
            message: "hello",
            meta: Some(&meta),
        };
        let value = serde_json::to_value(&request).expect("request must serialize");
        assert_eq!(value["meta"]["channel"], "xmtp");
    }

    #[test]
    fn decode_reply_returns_text_and_trace_url() {
        let reply = decode_reply(r#"{"response":"hi there","trace_url":"https://t/1"}"#)
            .expect("reply must decode");
        assert_eq!(reply.text, "hi there");
        assert_eq!(reply.trace_url.as_deref(), Some("https://t/1"));
    }

    #[test]
    fn decode_reply_rejects_missing_response_field() {
        let err = decode_reply(r#"{"ok":true}"#).expect_err("must fail");
        assert!(matches!(err, AgentInboxError::Decode(_)));
    }

    #[test]
    fn decode_reply_rejects_empty_response_text() {
        let err = decode_reply(r#"{"response":""}"#).expect_err("must fail");
        assert!(matches!(err, AgentInboxError::Decode(_)));
    }

    #[test]
    fn decode_reply_rejects_non_json_body() {
        let err = decode_reply("<html>502</html>").expect_err("must fail");
        assert!(matches!(err, AgentInboxError::Decode(_)));
    }

    #[test]
    fn decode_health_reads_status_and_version() {
        let health =
            decode_health(r#"{"status":"healthy","version":"1.0.0"}"#).expect("must decode");
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, "1.0.0");
    }
}
