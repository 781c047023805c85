use std::collections::{HashMap, HashSet};

/// Case-insensitive letter multiset of a seed word
#[derive(Debug, Clone)]
pub struct SeedLetters {
    counts: HashMap<char, usize>,
}

impl SeedLetters {
    pub fn new(seed: &str) -> Self {
        Self {
            counts: letter_counts(seed),
        }
    }

    /// True when every letter of `word` occurs in the seed at least as often
    pub fn admits(&self, word: &str) -> bool {
        letter_counts(word)
            .iter()
            .all(|(ch, needed)| self.counts.get(ch).is_some_and(|have| have >= needed))
    }
}

/// Count letters after lowercasing
pub fn letter_counts(word: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for ch in word.chars().flat_map(char::to_lowercase) {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// Find every dictionary word of at least `min_length` letters that can be
/// spelled from the letters of `seed`.
///
/// Results keep the dictionary's casing and order and contain no two words
/// that differ only in case; the first spelling seen wins.
pub fn find_anagrams<S: AsRef<str>>(
    seed: &str,
    dictionary: &[S],
    min_length: usize,
) -> Vec<String> {
    let seed_letters = SeedLetters::new(seed);
    let mut seen = HashSet::new();

    dictionary
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| word.chars().count() >= min_length)
        .filter(|word| seed_letters.admits(word))
        .filter(|word| seen.insert(word.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Longest words first, then alphabetical
pub fn sorted_for_display(words: &[String]) -> Vec<String> {
    let mut sorted = words.to_vec();
    sorted.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
    });
    sorted
}
