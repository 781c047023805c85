use anagramer_types::{ChatMessage, SetupMessage};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Decode one inbound text frame. Frames without a `type` field are tried
/// as the server's bare setup greeting; anything unrecognised is logged and
/// dropped.
pub fn decode_inbound(text: &str) -> Option<ChatMessage> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Dropping malformed chat frame: {}", e);
            return None;
        }
    };

    let tag = value.get("type").and_then(Value::as_str).map(str::to_string);
    let decoded = match tag {
        Some(_) => ChatMessage::deserialize(value),
        None => SetupMessage::deserialize(value).map(ChatMessage::Setup),
    };

    match decoded {
        Ok(message) => Some(message),
        Err(e) => {
            debug!("Dropping chat frame of type {:?}: {}", tag, e);
            None
        }
    }
}
