use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A round's puzzle as handed out by a word source: the seed word and every
/// dictionary word that can be spelled from its letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Word {
    #[serde(rename = "word")]
    pub seed: String,
    #[serde(default)]
    pub anagrams: Vec<String>,
}

impl Word {
    pub fn new(seed: impl Into<String>, anagrams: Vec<String>) -> Self {
        Self {
            seed: seed.into(),
            anagrams,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Definition {
    pub word: String,
    #[serde(rename = "definition")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HighScore {
    pub name: String,
    pub score: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Scores {
    pub list: Vec<HighScore>,
}
