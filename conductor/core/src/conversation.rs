//! Conversation History
//!
//! The ordered list of messages exchanged in one session. Insertion order is
//! display order is chronological order.
//!
//! # Design Philosophy
//!
//! A conversation only grows. Messages are never edited or removed, and the
//! history lives exactly as long as the session that owns it; nothing is
//! persisted across restarts.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::messages::{Message, MessageId, MessageRole, SessionId};

/// Default seed message shown before any user interaction
pub const DEFAULT_GREETING: &str =
    "नमस्ते! मैं आपका AI एजेंट हूं। मैं आपकी मदद के लिए यहां हूं। आप मुझसे कुछ भी पूछ सकते हैं!";

/// Ordered message history for one session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique session ID
    id: SessionId,
    /// Messages in chronological order
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a conversation seeded with one agent greeting
    pub fn seeded(greeting: impl Into<String>, at: DateTime<FixedOffset>) -> Self {
        Self {
            id: SessionId::new(),
            messages: vec![Message::new(MessageRole::Agent, greeting, at)],
        }
    }

    /// Append a user message
    pub fn add_user_message(&mut self, content: String, at: DateTime<FixedOffset>) -> MessageId {
        self.push(Message::new(MessageRole::User, content, at))
    }

    /// Append an agent message
    pub fn add_agent_message(&mut self, content: String, at: DateTime<FixedOffset>) -> MessageId {
        self.push(Message::new(MessageRole::Agent, content, at))
    }

    fn push(&mut self, msg: Message) -> MessageId {
        let id = msg.id().clone();
        self.messages.push(msg);
        id
    }

    /// Session ID
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get message by ID
    pub fn get_message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == id)
    }

    /// The newest message
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages, seed included
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false for a seeded conversation
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
