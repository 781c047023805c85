use anagramer_core::{ChatChange, ChatState};
use anagramer_types::{ChatUser, PostMessage, TypingStatus};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite;
use tracing::{debug, warn};

use super::{TypingDebouncer, decode_inbound};
use crate::{ApiClient, ClientError};

/// Where outbound chat traffic goes
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn post_message(&self, message: &PostMessage) -> Result<(), ClientError>;
    async fn send_typing(&self, status: &TypingStatus) -> Result<(), ClientError>;
}

/// Text over `POST /message`, typing updates as frames on the chat socket
pub struct SocketTransport {
    api: ApiClient,
    outgoing: mpsc::UnboundedSender<String>,
}

impl SocketTransport {
    pub fn new(api: ApiClient, outgoing: mpsc::UnboundedSender<String>) -> Self {
        Self { api, outgoing }
    }
}

#[async_trait]
impl ChatTransport for SocketTransport {
    async fn post_message(&self, message: &PostMessage) -> Result<(), ClientError> {
        self.api.post_message(message).await
    }

    async fn send_typing(&self, status: &TypingStatus) -> Result<(), ClientError> {
        let frame = serde_json::to_string(status)?;
        self.outgoing
            .send(frame)
            .map_err(|_| ClientError::WebSocket(tungstenite::Error::ConnectionClosed))
    }
}

/// Write side of the chat state, handed to whatever reads the socket
#[derive(Clone)]
pub struct ChatInbox {
    state: Arc<watch::Sender<ChatState>>,
}

impl ChatInbox {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ChatState::new());
        Self {
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    /// Decode and apply one inbound frame. Undecodable frames change nothing.
    pub fn receive_text(&self, text: &str) -> Option<ChatChange> {
        let message = decode_inbound(text)?;
        let mut change = None;
        self.state.send_modify(|state| change = Some(state.apply(message)));
        change
    }

    fn my_name(&self) -> String {
        self.state.borrow().my_name().unwrap_or_default().to_string()
    }
}

impl Default for ChatInbox {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ChatSession {
    inbox: ChatInbox,
    transport: Arc<dyn ChatTransport>,
    debouncer: TypingDebouncer,
    draft: String,
    forwarder: JoinHandle<()>,
}

impl ChatSession {
    pub fn new(transport: Arc<dyn ChatTransport>, typing_timeout: Duration) -> Self {
        let inbox = ChatInbox::new();
        let (updates, mut typing_rx) = mpsc::unbounded_channel::<bool>();

        let forwarder = {
            let inbox = inbox.clone();
            let transport = transport.clone();
            tokio::spawn(async move {
                while let Some(is_typing) = typing_rx.recv().await {
                    let status = TypingStatus {
                        user: ChatUser::new(inbox.my_name()),
                        is_typing,
                    };
                    if let Err(e) = transport.send_typing(&status).await {
                        warn!("Failed to send typing status: {}", e);
                    }
                }
            })
        };

        Self {
            inbox,
            transport,
            debouncer: TypingDebouncer::new(typing_timeout, updates),
            draft: String::new(),
            forwarder,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.inbox.subscribe()
    }

    pub fn snapshot(&self) -> ChatState {
        self.inbox.snapshot()
    }

    pub fn inbox(&self) -> ChatInbox {
        self.inbox.clone()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn update_draft(&mut self, text: &str) {
        self.draft = text.to_string();
        self.debouncer.keystroke(!self.draft.is_empty());
    }

    /// Post `text` under our assigned name and stop the typing indicator
    pub async fn send_message(&mut self, text: &str) -> Result<(), ClientError> {
        let message = PostMessage {
            name: self.inbox.my_name(),
            message: text.to_string(),
        };
        debug!("Posting chat message as '{}'", message.name);

        let result = self.transport.post_message(&message).await;
        self.debouncer.message_sent();
        result
    }

    pub async fn send_draft(&mut self) -> Result<(), ClientError> {
        let text = std::mem::take(&mut self.draft);
        self.send_message(&text).await
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.forwarder.abort();
    }
}
