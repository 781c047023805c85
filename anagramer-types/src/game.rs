use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

/// Result of submitting a guess. Rejections are ordinary values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GuessOutcome {
    Accepted { word: String },
    AlreadyGuessed { index: usize },
    NotInList,
}

impl GuessOutcome {
    /// Text shown to the player after a guess
    pub fn message(&self) -> &'static str {
        match self {
            GuessOutcome::Accepted { .. } => "Got it!",
            GuessOutcome::AlreadyGuessed { .. } => "Already Guessed",
            GuessOutcome::NotInList => "Not in List",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, GuessOutcome::Accepted { .. })
    }
}

/// Points contributed by all guessed words of one length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LengthScore {
    pub length: usize,
    pub words: usize,
    pub points: u32,
}

/// Immutable view of a game session handed to subscribers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub loading: bool,
    pub main_letters: String,
    pub valid_words: Vec<String>, // descending length for display
    pub guessed: Vec<String>,     // insertion order
    pub guess_buffer: String,
    pub hints_available: u32,
    pub hint_count: u32, // tokens plus the unused free hint
    pub used_hint_this_round: bool,
    pub revealed_letters: Vec<char>,
    pub score: u32,
    pub score_breakdown: Vec<LengthScore>,
    pub final_score: Option<u32>,
    pub got_new_hint: bool,
    pub error: Option<String>,
}

impl GameSnapshot {
    /// "guessed/total" progress label
    pub fn progress(&self) -> String {
        format!("{}/{}", self.guessed.len(), self.valid_words.len())
    }
}
