use anagramer_types::{GameError, GamePhase, GameSnapshot, GuessOutcome, LengthScore, Word};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

use crate::{GameEvent, GameEventBus, GameEventHandler, ScoringEngine, sorted_for_display};

/// Knobs deciding which words of a candidate pool make up the puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundRules {
    /// Pools bigger than this drop their shortest words
    pub large_pool_size: usize,
    pub large_pool_min_length: usize,
    pub small_pool_min_length: usize,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            large_pool_size: 50,
            large_pool_min_length: 4,
            small_pool_min_length: 3,
        }
    }
}

impl RoundRules {
    pub fn display_threshold(&self, pool_size: usize) -> usize {
        if pool_size > self.large_pool_size {
            self.large_pool_min_length
        } else {
            self.small_pool_min_length
        }
    }
}

/// State of one player's anagram game. Owned by a single writer.
#[derive(Debug)]
pub struct GameSession {
    phase: GamePhase,
    loading: bool,
    seed: String,
    main_letters: String,
    valid_words: Vec<String>,
    guessed: Vec<String>,
    guess_buffer: String,
    previous_guess: String,
    hints_available: u32,
    used_hint_this_round: bool,
    revealed_letters: BTreeSet<char>,
    final_score: Option<u32>,
    earned_hint: bool,
    got_new_hint: bool,
    rules: RoundRules,
    rng: StdRng,
    events: GameEventBus,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            loading: false,
            seed: String::new(),
            main_letters: String::new(),
            valid_words: Vec::new(),
            guessed: Vec::new(),
            guess_buffer: String::new(),
            previous_guess: String::new(),
            hints_available: 0,
            used_hint_this_round: false,
            revealed_letters: BTreeSet::new(),
            final_score: None,
            earned_hint: false,
            got_new_hint: false,
            rules: RoundRules::default(),
            rng,
            events: GameEventBus::new(),
        }
    }

    pub fn with_rules(mut self, rules: RoundRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.events.add_handler(handler);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn main_letters(&self) -> &str {
        &self.main_letters
    }

    pub fn valid_words(&self) -> &[String] {
        &self.valid_words
    }

    pub fn guessed(&self) -> &[String] {
        &self.guessed
    }

    pub fn guess_buffer(&self) -> &str {
        &self.guess_buffer
    }

    pub fn hints_available(&self) -> u32 {
        self.hints_available
    }

    /// Hint tokens plus the round's free hint if it is still unused
    pub fn hint_count(&self) -> u32 {
        self.hints_available + if self.used_hint_this_round { 0 } else { 1 }
    }

    pub fn used_hint_this_round(&self) -> bool {
        self.used_hint_this_round
    }

    pub fn revealed_letters(&self) -> &BTreeSet<char> {
        &self.revealed_letters
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn got_new_hint(&self) -> bool {
        self.got_new_hint
    }

    pub fn acknowledge_new_hint(&mut self) {
        self.got_new_hint = false;
    }

    /// Current points. Frozen at the final score once the round is finished.
    pub fn score(&self) -> u32 {
        match self.final_score {
            Some(score) if self.phase == GamePhase::Finished => score,
            _ => ScoringEngine::score(&self.guessed),
        }
    }

    pub fn score_breakdown(&self) -> Vec<LengthScore> {
        ScoringEngine::score_breakdown(&self.guessed)
    }

    /// Every valid word has been found
    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::InProgress
            && !self.valid_words.is_empty()
            && self.guessed.len() == self.valid_words.len()
    }

    /// Mark the session as fetching a new round. Refused while another
    /// round is loading or still being played.
    pub fn begin_loading(&mut self) -> Result<(), GameError> {
        if self.loading {
            return Err(GameError::RoundLoading);
        }
        if self.phase == GamePhase::InProgress {
            return Err(GameError::RoundAlreadyActive);
        }
        self.loading = true;
        Ok(())
    }

    /// Abandon a round fetch that failed
    pub fn cancel_loading(&mut self) {
        self.loading = false;
    }

    pub fn start_round(&mut self, word: Word) -> Result<(), GameError> {
        if self.phase == GamePhase::InProgress {
            return Err(GameError::RoundAlreadyActive);
        }

        let valid_words = self.puzzle_words(&word);
        if valid_words.is_empty() {
            self.loading = false;
            return Err(GameError::EmptyWordPool { seed: word.seed });
        }

        if self.phase == GamePhase::Finished && self.earned_hint {
            self.hints_available += 1;
            self.got_new_hint = true;
            info!("Awarded a hint token, {} available", self.hints_available);
            self.events.publish(GameEvent::HintAwarded {
                hints_available: self.hints_available,
            });
        }

        self.seed = word.seed;
        self.main_letters = self.shuffled(&self.seed.clone());
        self.valid_words = valid_words;
        self.guessed.clear();
        self.guess_buffer.clear();
        self.previous_guess.clear();
        self.revealed_letters.clear();
        self.used_hint_this_round = false;
        self.final_score = None;
        self.earned_hint = false;
        self.loading = false;
        self.phase = GamePhase::InProgress;

        info!(
            "Round started with {} words to find",
            self.valid_words.len()
        );
        self.events.publish(GameEvent::RoundStarted {
            main_letters: self.main_letters.clone(),
            word_count: self.valid_words.len(),
        });
        Ok(())
    }

    pub fn submit_guess(&mut self, word: &str) -> Result<GuessOutcome, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::RoundNotInProgress);
        }

        let word = word.trim();
        if let Some(index) = self.guessed.iter().position(|g| same_word(g, word)) {
            return Ok(GuessOutcome::AlreadyGuessed { index });
        }

        let Some(found) = self.valid_words.iter().find(|w| same_word(w, word)).cloned() else {
            debug!("Rejected guess '{}'", word);
            return Ok(GuessOutcome::NotInList);
        };

        self.guessed.push(found.clone());
        self.previous_guess = found.clone();
        self.guess_buffer.clear();

        self.events.publish(GameEvent::GuessAccepted {
            word: found.clone(),
            index: self.guessed.len() - 1,
        });
        Ok(GuessOutcome::Accepted { word: found })
    }

    /// Submit whatever is in the guess buffer
    pub fn submit_current_guess(&mut self) -> Result<GuessOutcome, GameError> {
        let word = self.guess_buffer.clone();
        self.submit_guess(&word)
    }

    /// Reveal one more letter of the seed. Returns the revealed letter, or
    /// `None` when no hint can be spent or every letter is already shown.
    pub fn use_hint(&mut self) -> Option<char> {
        if self.phase != GamePhase::InProgress || self.hint_count() == 0 {
            return None;
        }

        let hidden: Vec<char> = self
            .main_letters
            .chars()
            .flat_map(char::to_uppercase)
            .filter(|ch| !self.revealed_letters.contains(ch))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let letter = *hidden.choose(&mut self.rng)?;

        if self.used_hint_this_round {
            self.hints_available -= 1;
        }
        self.used_hint_this_round = true;
        self.revealed_letters.insert(letter);

        self.events.publish(GameEvent::HintRevealed {
            letter,
            hints_available: self.hints_available,
        });
        Some(letter)
    }

    pub fn shuffle(&mut self) {
        if self.main_letters.is_empty() {
            return;
        }
        self.main_letters = self.shuffled(&self.main_letters.clone());
        self.events.publish(GameEvent::LettersShuffled {
            main_letters: self.main_letters.clone(),
        });
    }

    /// Replace the guess buffer if every character is one of the puzzle
    /// letters. Returns whether the candidate was taken.
    pub fn update_guess_buffer(&mut self, candidate: &str) -> bool {
        let letters: HashSet<char> = self
            .main_letters
            .chars()
            .flat_map(char::to_lowercase)
            .collect();
        if candidate
            .chars()
            .flat_map(char::to_lowercase)
            .all(|ch| letters.contains(&ch))
        {
            self.guess_buffer = candidate.to_string();
            true
        } else {
            false
        }
    }

    pub fn clear_guess_buffer(&mut self) {
        self.guess_buffer.clear();
    }

    /// Put the last accepted guess back into the buffer
    pub fn bring_back_word(&mut self) {
        self.guess_buffer = self.previous_guess.clone();
    }

    /// End the round, revealing every answer. Returns the final score.
    ///
    /// Next round's bonus hint is earned only by guessing at least half of
    /// the words or a word using every letter, however the round ended.
    pub fn finish_round(&mut self, via_explicit_finish: bool) -> Result<u32, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::RoundNotInProgress);
        }

        let seed_length = self.seed.chars().count();
        let satisfied = self.guessed.len() >= self.valid_words.len() / 2
            || self.guessed.iter().any(|w| w.chars().count() == seed_length);
        let finished_early = via_explicit_finish && self.guessed.len() < self.valid_words.len();

        let final_score = ScoringEngine::score(&self.guessed);
        self.final_score = Some(final_score);
        self.earned_hint = satisfied;
        self.guessed = self.valid_words.clone();
        self.guess_buffer.clear();
        self.phase = GamePhase::Finished;

        info!(
            "Round finished with {} points (early finish: {}, hint earned: {})",
            final_score, finished_early, satisfied
        );
        self.events.publish(GameEvent::RoundFinished {
            final_score,
            earned_hint: self.earned_hint,
        });
        Ok(final_score)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            loading: self.loading,
            main_letters: self.main_letters.clone(),
            valid_words: sorted_for_display(&self.valid_words),
            guessed: self.guessed.clone(),
            guess_buffer: self.guess_buffer.clone(),
            hints_available: self.hints_available,
            hint_count: self.hint_count(),
            used_hint_this_round: self.used_hint_this_round,
            revealed_letters: self.revealed_letters.iter().copied().collect(),
            score: self.score(),
            score_breakdown: self.score_breakdown(),
            final_score: self.final_score,
            got_new_hint: self.got_new_hint,
            error: None,
        }
    }

    /// Candidate pool de-duplicated, then cut down to the display threshold
    fn puzzle_words(&self, word: &Word) -> Vec<String> {
        let mut seen = HashSet::new();
        let pool: Vec<&String> = word
            .anagrams
            .iter()
            .filter(|w| w.chars().count() >= self.rules.small_pool_min_length)
            .filter(|w| seen.insert(w.to_lowercase()))
            .collect();

        let threshold = self.rules.display_threshold(pool.len());
        pool.into_iter()
            .filter(|w| w.chars().count() >= threshold)
            .cloned()
            .collect()
    }

    fn shuffled(&mut self, letters: &str) -> String {
        let mut chars: Vec<char> = letters.chars().collect();
        chars.shuffle(&mut self.rng);
        chars.into_iter().collect()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn same_word(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
