//! Append-only conversation store.
//!
//! Holds the ordered message log for one session. Mutated only by the
//! single engine loop, so no internal locking is needed. No deletion or
//! edit operation is exposed; sessions are short-lived and unbounded
//! growth is acceptable.

use chrono::Local;

use crate::types::{Message, Sender};

/// Greeting seeded as the first assistant message of every session.
pub const GREETING: &str = "Namaste! I am your AI Krishi Sahayak. I can help you with farming \
questions, crop advice, weather guidance, and more. How can I assist you today?";

/// Ordered log of exchanged messages, append-only during a session.
#[derive(Debug)]
pub struct ConversationStore {
    messages: Vec<Message>,
    next_id: u64,
}

impl ConversationStore {
    /// Create a store seeded with the assistant greeting.
    pub fn new() -> Self {
        let mut store = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        store.append(Sender::Assistant, GREETING.to_string());
        store
    }

    /// Append a user message and return its id.
    pub fn append_user(&mut self, content: String) -> u64 {
        self.append(Sender::User, content)
    }

    /// Append an assistant message and return its id.
    pub fn append_assistant(&mut self, content: String) -> u64 {
        self.append(Sender::Assistant, content)
    }

    /// The full ordered sequence, insertion order = display order.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn append(&mut self, sender: Sender, content: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            content,
            sender,
            timestamp: Local::now(),
        });
        id
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_greeting() {
        let store = ConversationStore::new();
        assert_eq!(store.len(), 1);
        let first = &store.all()[0];
        assert_eq!(first.sender, Sender::Assistant);
        assert_eq!(first.content, GREETING);
        assert_eq!(first.id, 1);
    }

    #[test]
    fn test_new_store_is_never_empty() {
        let store = ConversationStore::new();
        assert!(!store.is_empty());
        assert!(store.last().is_some());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = ConversationStore::new();
        store.append_user("first".to_string());
        store.append_assistant("second".to_string());
        store.append_user("third".to_string());

        let contents: Vec<&str> = store.all().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec![GREETING, "first", "second", "third"]);
    }

    #[test]
    fn test_ids_are_monotonic_and_unique() {
        let mut store = ConversationStore::new();
        let a = store.append_user("a".to_string());
        let b = store.append_assistant("b".to_string());
        let c = store.append_user("c".to_string());
        assert!(a < b && b < c);

        let mut ids: Vec<u64> = store.all().iter().map(|m| m.id).collect();
        let before = ids.clone();
        ids.dedup();
        assert_eq!(ids, before);
    }

    #[test]
    fn test_id_order_equals_insertion_order() {
        let mut store = ConversationStore::new();
        for i in 0..10 {
            store.append_user(format!("msg {}", i));
        }
        let ids: Vec<u64> = store.all().iter().map(|m| m.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_all_is_idempotent_between_appends() {
        let mut store = ConversationStore::new();
        store.append_user("hello".to_string());

        let first: Vec<Message> = store.all().to_vec();
        let second: Vec<Message> = store.all().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_returns_most_recent() {
        let mut store = ConversationStore::new();
        store.append_user("question".to_string());
        store.append_assistant("answer".to_string());
        let last = store.last().unwrap();
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.content, "answer");
    }

    #[test]
    fn test_no_dedup_on_identical_content() {
        let mut store = ConversationStore::new();
        store.append_user("same".to_string());
        store.append_user("same".to_string());
        assert_eq!(store.len(), 3);
        assert_ne!(store.all()[1].id, store.all()[2].id);
    }
}
