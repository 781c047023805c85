use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatUser {
    pub name: String,
}

impl ChatUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Message,
    Server,
    Info,
    TypingIndicator,
    Setup,
}

/// Inbound chat traffic, discriminated by the `type` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type")]
pub enum ChatMessage {
    #[serde(rename = "MessageMessage")]
    Text(TextMessage),
    #[serde(rename = "SetupMessage")]
    Setup(SetupMessage),
    #[serde(rename = "UserListMessage")]
    UserList(UserListMessage),
    #[serde(rename = "TypingIndicatorMessage")]
    TypingIndicator(TypingIndicatorMessage),
}

impl ChatMessage {
    pub fn user(&self) -> &ChatUser {
        match self {
            ChatMessage::Text(m) => &m.user,
            ChatMessage::Setup(m) => &m.user,
            ChatMessage::UserList(m) => &m.user,
            ChatMessage::TypingIndicator(m) => &m.user,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            ChatMessage::Text(m) => m.message_type,
            ChatMessage::Setup(m) => m.message_type,
            ChatMessage::UserList(m) => m.message_type,
            ChatMessage::TypingIndicator(m) => m.message_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub user: ChatUser,
    #[serde(rename = "message")]
    pub body: String,
    #[serde(default = "MessageType::message")]
    pub message_type: MessageType,
    #[serde(default, rename = "time")]
    pub timestamp: String, // "MM/dd hh:mm AM", stamped on receipt when absent
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SetupMessage {
    pub user: ChatUser,
    #[serde(rename = "userColor")]
    pub color_index: i32,
    #[serde(default = "MessageType::setup")]
    pub message_type: MessageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserListMessage {
    pub user: ChatUser,
    #[serde(rename = "userList")]
    pub users: Vec<ChatUser>,
    #[serde(default = "MessageType::info")]
    pub message_type: MessageType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TypingIndicatorMessage {
    pub user: ChatUser,
    #[serde(default)]
    pub users: Vec<ChatUser>,
    #[serde(default = "MessageType::typing_indicator")]
    pub message_type: MessageType,
}

impl TypingIndicatorMessage {
    /// Human readable "who is typing" line, `None` when nobody is typing
    pub fn describe(&self) -> Option<String> {
        match self.users.as_slice() {
            [] => None,
            [one] => Some(format!("{} is typing...", one.name)),
            [first, second] => Some(format!("{} and {} are typing...", first.name, second.name)),
            _ => Some("Several people are typing...".to_string()),
        }
    }
}

impl MessageType {
    fn message() -> Self {
        MessageType::Message
    }

    fn setup() -> Self {
        MessageType::Setup
    }

    fn info() -> Self {
        MessageType::Info
    }

    fn typing_indicator() -> Self {
        MessageType::TypingIndicator
    }
}

/// Outbound chat text, posted over HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PostMessage {
    pub name: String,
    pub message: String,
}

/// Outbound typing update, sent over the chat socket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TypingStatus {
    pub user: ChatUser,
    pub is_typing: bool,
}
