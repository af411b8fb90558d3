//! Conversation Messages
//!
//! The read model handed to surfaces: messages, their identifiers, and the
//! conductor's operational state.
//!
//! # Design Philosophy
//!
//! Surfaces are pure renderers. Everything they need to draw the thread lives
//! in these types, and none of it is pre-formatted: timestamps are real
//! instants, and locale formatting happens in [`crate::locale`].

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("msg_{id}"))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID
    ///
    /// Uses an atomic counter combined with timestamp to ensure uniqueness
    /// even when multiple sessions are created in the same millisecond.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let count = COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(format!("session_{timestamp}_{count}"))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who produced a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Typed by the person at the keyboard
    User,
    /// Produced by the scripted agent
    Agent,
}

/// One turn in the conversation
///
/// Fields are private so a message cannot change after it is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: MessageRole,
    content: String,
    timestamp: DateTime<FixedOffset>,
}

impl Message {
    /// Create a new message stamped with the given instant
    pub fn new(
        role: MessageRole,
        content: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// Unique message ID
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Who produced the message
    pub fn role(&self) -> MessageRole {
        self.role
    }

    /// Message body, exactly as submitted or generated
    pub fn content(&self) -> &str {
        &self.content
    }

    /// When the message was created
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}

/// Conductor operational states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConductorState {
    /// No reply in flight; input is accepted
    #[default]
    Idle,
    /// A reply is being composed; input is disabled
    AwaitingReply,
}

impl ConductorState {
    /// Human-readable description for status lines
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "तैयार",
            Self::AwaitingReply => "टाइप कर रहा है...",
        }
    }

    /// Whether the agent is composing a reply
    #[must_use]
    pub fn is_composing(&self) -> bool {
        matches!(self, Self::AwaitingReply)
    }
}
