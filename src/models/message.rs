use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub recipient: String,
    pub from: String,
    pub subject: String,
    pub body: String,
    pub queued_at: DateTime<Utc>,
}

impl OutboundMessage {
    pub fn new(recipient: String, from: String, subject: String, body: String) -> Self {
        Self {
            recipient,
            from,
            subject,
            body,
            queued_at: Utc::now(),
        }
    }
}
