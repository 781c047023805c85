use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use super::ChatInbox;
use crate::ClientError;

/// Drive the chat socket until either side closes. Inbound text frames go to
/// `inbox`; strings queued on `outgoing` are sent as text frames.
pub async fn run(
    url: &str,
    inbox: ChatInbox,
    mut outgoing: mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (socket, _) = connect_async(url).await.map_err(|e| {
        error!("Could not connect to chat at {}: {}", url, e);
        e
    })?;
    info!("Connected to chat at {}", url);

    let (mut ws_sender, mut ws_receiver) = socket.split();

    let incoming_handler = async move {
        while let Some(result) = ws_receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    if inbox.receive_text(&text).is_none() {
                        debug!("Ignored chat frame");
                    }
                }
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!("Chat socket error: {}", e);
                    break;
                }
            }
        }
    };

    let outgoing_handler = async move {
        while let Some(frame) = outgoing.recv().await {
            if let Err(e) = ws_sender.send(Message::Text(frame)).await {
                warn!("Failed to send chat frame: {}", e);
                break;
            }
        }
        let _ = ws_sender.close().await;
    };

    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    info!("Chat connection to {} closed", url);
    Ok(())
}
