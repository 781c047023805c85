use anagramer_types::LengthScore;
use std::collections::BTreeMap;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Total points for a set of guessed words.
    ///
    /// Words are grouped by length; a group of `n` words of length `L`
    /// is worth `L * (n + L)`.
    pub fn score<S: AsRef<str>>(guessed: &[S]) -> u32 {
        Self::group_by_length(guessed)
            .into_iter()
            .map(|(length, count)| Self::group_points(length, count))
            .sum()
    }

    /// Per-length points, longest words first
    pub fn score_breakdown<S: AsRef<str>>(guessed: &[S]) -> Vec<LengthScore> {
        Self::group_by_length(guessed)
            .into_iter()
            .rev()
            .map(|(length, words)| LengthScore {
                length,
                words,
                points: Self::group_points(length, words),
            })
            .collect()
    }

    fn group_points(length: usize, count: usize) -> u32 {
        (length * (count + length)) as u32
    }

    fn group_by_length<S: AsRef<str>>(guessed: &[S]) -> BTreeMap<usize, usize> {
        let mut groups = BTreeMap::new();
        for word in guessed {
            *groups.entry(word.as_ref().chars().count()).or_insert(0) += 1;
        }
        groups
    }
}
