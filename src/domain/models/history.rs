#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::NaiveDateTime;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub question: String,
    pub answer: String,
    pub created_at: String,
}

/// A group of exchanges recorded by the backend for one uploaded document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    #[serde(rename = "_id")]
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
    pub last_message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub sessions: Vec<ChatSession>,
}

/// Renders a backend timestamp for display. The backend emits ISO 8601 with
/// or without an offset; anything unparsable is shown as received.
pub fn format_timestamp(timestamp: &str) -> String {
    if let Ok(date) = DateTime::parse_from_rfc3339(timestamp) {
        return date.format("%Y-%m-%d %H:%M:%S").to_string();
    }

    if let Ok(date) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return date.format("%Y-%m-%d %H:%M:%S").to_string();
    }

    return timestamp.to_string();
}

impl ChatSession {
    pub fn summary(&self) -> String {
        let count = self.messages.len();
        let noun = if count == 1 { "message" } else { "messages" };

        return format!(
            "- (ID: {}) {}, {count} {noun}, Last message: {}",
            self.id,
            self.filename,
            format_timestamp(&self.last_message)
        );
    }
}
