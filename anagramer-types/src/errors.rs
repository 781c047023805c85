use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    RoundNotInProgress,
    RoundAlreadyActive,
    RoundLoading,
    NoPlayableSeed { length: usize },
    EmptyWordPool { seed: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::RoundNotInProgress => write!(f, "No round is in progress"),
            GameError::RoundAlreadyActive => write!(f, "A round is already in progress"),
            GameError::RoundLoading => write!(f, "A new round is already loading"),
            GameError::NoPlayableSeed { length } => {
                write!(f, "No playable seed word of length {}", length)
            }
            GameError::EmptyWordPool { seed } => {
                write!(f, "Seed '{}' has no qualifying anagrams", seed)
            }
        }
    }
}

impl std::error::Error for GameError {}
