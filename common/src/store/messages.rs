use uuid::Uuid;

use crate::model::message::{Message, MessageType};

/// Process-wide list of toast messages, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageList {
    messages: Vec<Message>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its freshly generated id.
    pub fn add_message(&mut self, text: impl Into<String>, message_type: MessageType) -> String {
        let id = Uuid::new_v4().to_string();
        self.messages.push(Message {
            id: id.clone(),
            text: text.into(),
            message_type,
        });
        id
    }

    /// Removes the message with `id`. Returns whether it was present.
    pub fn remove_message(&mut self, id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|message| message.id != id);
        self.messages.len() != before
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_leaves_empty_list() {
        let mut list = MessageList::new();
        let id = list.add_message("Saved", MessageType::default());
        assert_eq!(list.messages()[0].message_type, MessageType::Success);
        assert!(list.remove_message(&id));
        assert!(list.is_empty());
        assert!(!list.remove_message(&id));
    }

    #[test]
    fn remove_only_targets_one_message() {
        let mut list = MessageList::new();
        let first = list.add_message("Something went wrong!", MessageType::Error);
        let second = list.add_message("Page published successfully.", MessageType::Success);
        assert_ne!(first, second);

        list.remove_message(&first);

        assert_eq!(list.messages().len(), 1);
        assert_eq!(list.messages()[0].id, second);
        assert_eq!(list.messages()[0].text, "Page published successfully.");
    }

    #[test]
    fn clear_always_empties() {
        let mut list = MessageList::new();
        list.clear_messages();
        assert!(list.is_empty());
        for i in 0..5 {
            list.add_message(format!("notice {i}"), MessageType::Notice);
        }
        let texts: Vec<&str> = list.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["notice 0", "notice 1", "notice 2", "notice 3", "notice 4"]);
        list.clear_messages();
        assert!(list.is_empty());
    }
}
