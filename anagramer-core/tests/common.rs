#![allow(dead_code)]

use anagramer_core::{Dictionary, GameEvent, GameEventHandler, GameSession};
use anagramer_types::Word;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

/// Small dictionary built around the seeds "letters" and "painter"
pub fn create_test_dictionary() -> Dictionary {
    let word_list = "letters\nsettler\nsterlet\ntrestle\nlets\ntree\nrest\nsteel\nsleet\nteeth\nset\nlet\ntee\n\
                     painter\npertain\nrepaint\npaint\ninapt\npint\ntrain\nrain\npain\npant\nape\nwell-read\n";
    Dictionary::from_word_list(word_list)
}

/// Creates a session with a fixed RNG so shuffles and hints are repeatable
pub fn create_test_session() -> GameSession {
    GameSession::with_rng(StdRng::seed_from_u64(1234))
}

/// A round for the seed "letters" with a known pool
pub fn letters_round() -> Word {
    Word::new(
        "letters",
        ["letters", "settler", "sterlet", "trestle", "lets", "tree", "rest", "set", "let"]
            .iter()
            .map(|w| w.to_string())
            .collect(),
    )
}

/// Creates a session that already has the "letters" round in progress
pub fn create_started_session() -> GameSession {
    let mut session = create_test_session();
    session
        .start_round(letters_round())
        .expect("letters round should start");
    session
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, event: GameEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Guess every word whose length is in `lengths`
pub fn guess_words_of_length(session: &mut GameSession, lengths: &[usize]) {
    let words: Vec<String> = session
        .valid_words()
        .iter()
        .filter(|w| lengths.contains(&w.len()))
        .cloned()
        .collect();
    for word in words {
        session.submit_guess(&word).unwrap();
    }
}
