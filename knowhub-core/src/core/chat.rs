//! Local assistant chat. Replies are canned; there is no model behind it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const GREETING: &str =
    "Hello! I'm your AI assistant. How can I help you organize your content today?";
pub const CANNED_REPLY: &str =
    "I understand you want to work with your content. Let me help you with that!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: Sender, content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A session opened with the assistant's greeting.
    pub fn new() -> Self {
        Self { messages: vec![ChatMessage::new(Sender::Ai, GREETING)] }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends `text` and the assistant's reply. Blank input is ignored.
    ///
    /// Returns the messages added by this call.
    pub fn send(&mut self, text: &str) -> Vec<ChatMessage> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let added = vec![
            ChatMessage::new(Sender::User, text),
            ChatMessage::new(Sender::Ai, CANNED_REPLY),
        ];
        self.messages.extend(added.iter().cloned());
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_opens_with_greeting() {
        let chat = ChatSession::new();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender, Sender::Ai);
        assert_eq!(chat.messages()[0].content, GREETING);
    }

    #[test]
    fn test_send_appends_user_and_reply() {
        let mut chat = ChatSession::new();
        let added = chat.send("sort my links");
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].sender, Sender::User);
        assert_eq!(added[0].content, "sort my links");
        assert_eq!(added[1].content, CANNED_REPLY);
        assert_eq!(chat.messages().len(), 3);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut chat = ChatSession::new();
        assert!(chat.send("   \n").is_empty());
        assert_eq!(chat.messages().len(), 1);
    }
}
