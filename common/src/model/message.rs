use serde::{Deserialize, Serialize};

/// Severity of a toast message shown in the admin interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Success,
    Notice,
    Error,
}

/// A toast message. Ids are unique per message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub message_type: MessageType,
}
