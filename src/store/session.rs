use chrono::Utc;

use crate::store::models::{ChatMessage, Role};

pub const GREETING: &str = "NetGuardian AI Analyst online. I can assist with threat analysis, report generation, or WAF configuration.";

/// In-memory transcript for one dashboard session. The transcript only grows
/// until `reset`; nothing survives a restart.
pub struct SessionStore {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl SessionStore {
    /// A store seeded with the analyst greeting the dashboard shows on load.
    pub fn new() -> Self {
        let mut store = Self::bare();
        store.push(Role::Assistant, GREETING.to_string());
        store
    }

    /// An empty store without the seed greeting.
    pub fn bare() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    fn push(&mut self, role: Role, content: String) -> &ChatMessage {
        let message = ChatMessage {
            id: self.next_id,
            role,
            content,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.messages.push(message);
        self.messages.last().unwrap()
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(Role::User, content.into())
    }

    /// Assistant replies and user-visible error placeholders both land here;
    /// there is no separate error role.
    pub fn push_assistant(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(Role::Assistant, content.into())
    }

    /// Read-only snapshot, insertion order.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Drops the transcript and reseeds the greeting. Ids keep counting up so
    /// no id repeats within one store's lifetime.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.push(Role::Assistant, GREETING.to_string());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
