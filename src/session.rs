//! The active chat session
//!
//! The notebook always has exactly one active session: the chat currently
//! shown and mutated. It is an explicit value handed by `&mut` to every
//! [`ChatStore`](crate::storage::ChatStore) operation instead of living in
//! global state. A fresh session exists only in memory until its first
//! message is appended.

use crate::storage::{Message, Role};
use uuid::Uuid;

/// Id and in-memory message sequence of the chat being edited
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    id: String,
    messages: Vec<Message>,
}

impl ActiveSession {
    /// Start a brand new, empty session with a random id
    pub fn new() -> Self {
        Self {
            id: new_session_id(),
            messages: Vec::new(),
        }
    }

    /// Id of the active chat
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Messages of the active chat in chronological order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True until the first message is appended
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of user-authored messages
    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }

    pub(crate) fn reset(&mut self) -> &str {
        self.id = new_session_id();
        self.messages.clear();
        &self.id
    }

    pub(crate) fn replace(&mut self, id: String, messages: Vec<Message>) {
        self.id = id;
        self.messages = messages;
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Overwrite the content of the most recent user message.
    ///
    /// Returns false when the session has no user message.
    pub(crate) fn replace_last_user_content(&mut self, content: &str) -> bool {
        match self.messages.iter_mut().rev().find(|m| m.role == Role::User) {
            Some(message) => {
                message.content = content.to_string();
                true
            }
            None => false,
        }
    }

    pub(crate) fn drop_assistant_messages(&mut self) {
        self.messages.retain(|m| m.role != Role::Assistant);
    }
}

impl Default for ActiveSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a fresh chat id
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
