//! Ordered, append-only conversation transcript.

use bprovider::Message;

/// Insertion order is chronological order is display order; entries are
/// never reordered. Readers only ever see cloned snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Rewrites the content of the final entry only; identity, role, and
    /// timestamp are kept. No-op on an empty log.
    pub fn replace_last(&mut self, content: impl Into<String>) {
        if let Some(last) = self.messages.last_mut() {
            last.content = content.into();
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The most recent `window` entries, oldest first, original order
    /// preserved.
    pub fn trailing_window(&self, window: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(window);
        &self.messages[start..]
    }
}
