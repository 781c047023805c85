use anagramer_types::GameError;
use std::time::Duration;

/// What the player sees for any failure that talking to the backend causes
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("WebSocket failure: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    #[error("DICT server error: {0}")]
    Dict(String),
    #[error("No definition found for '{0}'")]
    NoDefinition(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Round(#[from] anyhow::Error),
}

impl ClientError {
    /// Text for the player. Game rule violations are explained, everything
    /// else collapses to the generic retry message.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Game(err) => err.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let timeout = ClientError::Timeout(Duration::from_secs(5));
        assert_eq!(timeout.user_message(), GENERIC_FAILURE);

        let io = ClientError::Io(std::io::Error::other("refused"));
        assert_eq!(io.user_message(), GENERIC_FAILURE);

        let game = ClientError::Game(GameError::RoundLoading);
        assert_eq!(game.user_message(), "A new round is already loading");
    }
}
