use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Ordered, copy-on-write list of chat messages.
///
/// Clones share the underlying buffer; `push` only copies when the buffer is
/// shared. Concatenation preserves order and never deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Messages(Arc<Vec<ChatMessage>>);

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.0
    }

    pub fn push(&mut self, message: ChatMessage) {
        Arc::make_mut(&mut self.0).push(message);
    }

    /// Returns `self` followed by `other`. Neither input is modified.
    pub fn concat(&self, other: &Messages) -> Messages {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut merged = Vec::with_capacity(self.len() + other.len());
        merged.extend_from_slice(&self.0);
        merged.extend_from_slice(&other.0);
        Messages(Arc::new(merged))
    }
}

impl From<Vec<ChatMessage>> for Messages {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Messages(Arc::new(messages))
    }
}

impl FromIterator<ChatMessage> for Messages {
    fn from_iter<I: IntoIterator<Item = ChatMessage>>(iter: I) -> Self {
        Messages(Arc::new(iter.into_iter().collect()))
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Messages {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Messages {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<ChatMessage>::deserialize(deserializer).map(Messages::from)
    }
}

/// State threaded through the graph. Created per invocation, owned by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Messages,
}

impl ConversationState {
    pub fn new(messages: impl Into<Messages>) -> Self {
        Self {
            messages: messages.into(),
        }
    }

    /// Applies a node's update by appending its messages.
    pub fn merge(self, update: ConversationState) -> ConversationState {
        ConversationState {
            messages: self.messages.concat(&update.messages),
        }
    }

    /// Content of the most recent message, if any.
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}
