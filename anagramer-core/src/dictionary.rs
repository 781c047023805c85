use anagramer_types::{GameError, Word};
use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{debug, info};

use crate::find_anagrams;

/// How many seeds are tried before giving up on finding a playable round
pub const MAX_SEED_ATTEMPTS: usize = 32;

/// Read-only word list shared by everything that needs to look words up.
/// Load it once at startup and hand out references.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    /// Build a dictionary from newline-delimited text. Blank lines and
    /// hyphenated entries are dropped; casing is kept.
    pub fn from_word_list(word_list: &str) -> Self {
        let words = word_list
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty() && !word.contains('-'))
            .map(str::to_string)
            .collect();

        Self { words }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        let dictionary = Self::from_word_list(&contents);
        info!(
            "Loaded {} words from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Purely alphabetic words of exactly `length` characters
    pub fn seed_candidates(&self, length: usize) -> Vec<&String> {
        self.words
            .iter()
            .filter(|word| word.chars().count() == length)
            .filter(|word| word.chars().all(char::is_alphabetic))
            .collect()
    }

    /// Pick a random seed of `seed_length` letters together with every
    /// sub-anagram of at least `minimum_size` letters. Seeds whose pool comes
    /// back empty are discarded and another one is drawn.
    pub fn random_round<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        seed_length: usize,
        minimum_size: usize,
    ) -> Result<Word> {
        let candidates = self.seed_candidates(seed_length);
        if candidates.is_empty() {
            return Err(GameError::NoPlayableSeed {
                length: seed_length,
            }
            .into());
        }

        for attempt in 1..=MAX_SEED_ATTEMPTS {
            let Some(seed) = candidates.choose(rng) else {
                break;
            };

            let anagrams = find_anagrams(seed, &self.words, minimum_size);
            if anagrams.is_empty() {
                debug!("Seed '{}' has no anagram pool (attempt {})", seed, attempt);
                continue;
            }

            debug!("Picked seed '{}' with {} anagrams", seed, anagrams.len());
            return Ok(Word::new(seed.as_str(), anagrams));
        }

        Err(GameError::NoPlayableSeed {
            length: seed_length,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_load_filters_hyphens_and_blanks() {
        let dictionary = Dictionary::from_word_list("apple\n\nwell-known\n  spaced  \nAaron\n");

        assert_eq!(dictionary.words(), &["apple", "spaced", "Aaron"]);
        assert_eq!(dictionary.len(), 3);
    }

    #[test]
    fn test_empty_word_list() {
        let dictionary = Dictionary::from_word_list("");
        assert!(dictionary.is_empty());

        let mut rng = StdRng::seed_from_u64(1);
        let result = dictionary.random_round(&mut rng, 7, 3);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("No playable seed"));
    }

    #[test]
    fn test_seed_candidates_are_alphabetic() {
        let dictionary = Dictionary::from_word_list("letters\nabbot's\nsettler\nlet\n");
        let candidates = dictionary.seed_candidates(7);
        assert_eq!(candidates, vec!["letters", "settler"]);
    }

    #[test]
    fn test_random_round_contains_seed() {
        let dictionary = Dictionary::from_word_list("letters\nsettler\nlets\ntree\nset\nzzz\n");
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10 {
            let word = dictionary.random_round(&mut rng, 7, 3).unwrap();
            assert!(word.seed == "letters" || word.seed == "settler");
            assert!(word.anagrams.contains(&word.seed));
            assert!(word.anagrams.contains(&"tree".to_string()));
            assert!(!word.anagrams.contains(&"zzz".to_string()));
        }
    }

    #[test]
    fn test_from_missing_file() {
        let result = Dictionary::from_file("/definitely/not/a/word/list");
        assert!(result.is_err());
    }
}
