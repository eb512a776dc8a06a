use serde_json::{Map, Value as JsonValue};

/// One inbound chat message to deliver to the agent backend.
///
/// Built fresh per message and owned by the calling context; the client only
/// borrows it for the duration of the delivery.
#[derive(Clone, Debug, PartialEq)]
pub struct InboxMessage {
    /// Conversation the message belongs to.
    pub conversation_id: String,
    /// Sender identifier (wallet address, user id, ...).
    pub sender: String,
    /// Message text.
    pub body: String,
    /// Optional free-form metadata forwarded to the backend unchanged.
    pub meta: Option<Map<String, JsonValue>>,
}

impl InboxMessage {
    /// Creates a message without metadata.
    pub fn new(
        conversation_id: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            sender: sender.into(),
            body: body.into(),
            meta: None,
        }
    }

    /// Attaches one metadata entry, creating the map on first use.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::InboxMessage;

    #[test]
    fn new_message_has_no_meta() {
        let msg = InboxMessage::new("c1", "u1", "hello");
        assert_eq!(msg.conversation_id, "c1");
        assert_eq!(msg.sender, "u1");
        assert_eq!(msg.body, "hello");
        assert!(msg.meta.is_none());
    }

    #[test]
    fn with_meta_accumulates_entries() {
        let msg = InboxMessage::new("c1", "u1", "hello")
            .with_meta("channel", "xmtp")
            .with_meta("priority", 2);

        let meta = msg.meta.expect("meta must be present");
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["channel"], "xmtp");
        assert_eq!(meta["priority"], 2);
    }
}
