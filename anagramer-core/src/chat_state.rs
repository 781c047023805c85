use anagramer_types::{ChatMessage, ChatUser, SetupMessage, TypingIndicatorMessage};
use tracing::debug;

/// Timestamp format shown next to chat lines
pub const CHAT_TIME_FORMAT: &str = "%m/%d %I:%M %p";

/// What changed after applying an inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatChange {
    MessageLogged,
    IdentityChanged,
    RosterReplaced,
    TypingChanged,
}

/// Everything the chat sidebar renders. Cloned wholesale as a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub log: Vec<ChatMessage>,
    pub identity: Option<SetupMessage>,
    pub roster: Vec<ChatUser>,
    pub typing: Option<TypingIndicatorMessage>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the server assigned to us, if it has told us yet
    pub fn my_name(&self) -> Option<&str> {
        self.identity.as_ref().map(|setup| setup.user.name.as_str())
    }

    pub fn typing_line(&self) -> Option<String> {
        self.typing.as_ref().and_then(TypingIndicatorMessage::describe)
    }

    pub fn apply(&mut self, message: ChatMessage) -> ChatChange {
        match message {
            ChatMessage::Text(mut text) => {
                if text.timestamp.is_empty() {
                    text.timestamp = chrono::Local::now().format(CHAT_TIME_FORMAT).to_string();
                }
                debug!("{}: {}", text.user.name, text.body);
                self.log.push(ChatMessage::Text(text));
                ChatChange::MessageLogged
            }
            ChatMessage::Setup(setup) => {
                debug!("Identity set to {}", setup.user.name);
                self.identity = Some(setup);
                ChatChange::IdentityChanged
            }
            ChatMessage::UserList(list) => {
                self.roster = list.users.clone();
                self.log.push(ChatMessage::UserList(list));
                ChatChange::RosterReplaced
            }
            ChatMessage::TypingIndicator(indicator) => {
                self.typing = Some(indicator);
                ChatChange::TypingChanged
            }
        }
    }
}
