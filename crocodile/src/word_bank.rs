//! Vocabulary with a recently-used window, so a word is not handed out twice in one game.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{GameError, Result};

const BUILTIN_WORDS: &str = include_str!("../words.txt");

/// Parses a word list: one word per line, surrounding whitespace trimmed, blank lines and
/// `#` comments skipped, lowercased, duplicates dropped (first occurrence wins).
pub fn parse_word_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct WordBank {
    all_words: Vec<String>,
    recent_words: Vec<String>,
}

impl WordBank {
    /// Builds a bank from the given words (normalized like [`parse_word_list`]).
    /// Fails with [`GameError::WordPoolExhausted`] when no usable word remains.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        let all_words = parse_word_list(&joined);
        if all_words.is_empty() {
            return Err(GameError::WordPoolExhausted);
        }
        Ok(Self {
            all_words,
            recent_words: Vec::new(),
        })
    }

    /// Bank over the vocabulary shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN_WORDS.lines())
    }

    /// Loads a word list file (see [`parse_word_list`] for the format).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::new(text.lines())
    }

    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Words already handed out in the current game, oldest first.
    pub fn recent_words(&self) -> &[String] {
        &self.recent_words
    }

    /// Number of words that can still be picked before the window resets.
    pub fn remaining(&self) -> usize {
        self.all_words
            .iter()
            .filter(|w| !self.recent_words.contains(*w))
            .count()
    }

    /// Forgets the recently-used window. Called when a new game starts.
    pub fn reset(&mut self) {
        self.recent_words.clear();
    }

    /// Picks a random word not used recently in this game and records it.
    pub fn pick_word(&mut self) -> Result<String> {
        self.pick_word_with(&mut rand::thread_rng())
    }

    /// Same as [`WordBank::pick_word`] with a caller-supplied random source.
    ///
    /// When every word has been used the window is cleared except for the last pick,
    /// so the same word is never handed out twice in a row while the bank has two or more words.
    pub fn pick_word_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String> {
        if self.remaining() == 0 {
            let last = self.recent_words.pop();
            self.recent_words.clear();
            if self.all_words.len() > 1 {
                self.recent_words.extend(last);
            }
            debug!(
                total = self.all_words.len(),
                "Word pool exhausted, recent window reset"
            );
        }

        let word = self
            .all_words
            .iter()
            .filter(|w| !self.recent_words.contains(*w))
            .collect::<Vec<_>>()
            .choose(rng)
            .map(|w| (*w).clone())
            .ok_or(GameError::WordPoolExhausted)?;

        self.recent_words.push(word.clone());
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_word_list_skips_comments_and_duplicates() {
        let words = parse_word_list("# header\n Кот \n\nсобака\nКОТ\n  # indented comment\nмост");
        assert_eq!(words, vec!["кот", "собака", "мост"]);
    }

    #[test]
    fn test_new_rejects_empty_vocabulary() {
        let empty: Vec<&str> = Vec::new();
        assert!(matches!(WordBank::new(empty), Err(GameError::WordPoolExhausted)));
        assert!(matches!(
            WordBank::new(["", "  ", "# only a comment"]),
            Err(GameError::WordPoolExhausted)
        ));
    }

    #[test]
    fn test_builtin_bank_is_usable() {
        let bank = WordBank::builtin().unwrap();
        assert!(bank.len() > 50);
        assert!(bank.recent_words().is_empty());
    }

    #[test]
    fn test_pick_never_returns_recent_word_until_pool_exhausted() {
        let mut bank = WordBank::new(["a", "b", "c", "d"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let mut picked = Vec::new();
        for _ in 0..4 {
            let word = bank.pick_word_with(&mut rng).unwrap();
            assert!(!picked.contains(&word));
            picked.push(word);
        }
        picked.sort();
        assert_eq!(picked, vec!["a", "b", "c", "d"]);
        assert_eq!(bank.remaining(), 0);
    }

    #[test]
    fn test_exhausted_pool_resets_without_repeating_last_word() {
        let mut bank = WordBank::new(["a", "b", "c"]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let mut previous = bank.pick_word_with(&mut rng).unwrap();
        for _ in 0..200 {
            let next = bank.pick_word_with(&mut rng).unwrap();
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_two_word_bank_alternates() {
        let mut bank = WordBank::new(["a", "b"]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let first = bank.pick_word_with(&mut rng).unwrap();
        let second = bank.pick_word_with(&mut rng).unwrap();
        let third = bank.pick_word_with(&mut rng).unwrap();
        assert_ne!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_single_word_bank_keeps_working() {
        let mut bank = WordBank::new(["кот"]).unwrap();
        for _ in 0..3 {
            assert_eq!(bank.pick_word().unwrap(), "кот");
        }
    }

    #[test]
    fn test_reset_clears_recent_window() {
        let mut bank = WordBank::new(["a", "b"]).unwrap();
        bank.pick_word().unwrap();
        assert_eq!(bank.recent_words().len(), 1);
        bank.reset();
        assert!(bank.recent_words().is_empty());
        assert_eq!(bank.remaining(), 2);
    }

    #[test]
    fn test_from_file_reads_word_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "ракета\n# skip\nмаяк\n").unwrap();

        let bank = WordBank::from_file(&path).unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn test_from_file_missing_is_word_list_error() {
        let result = WordBank::from_file("/nonexistent/crocodile/words.txt");
        assert!(matches!(result, Err(GameError::WordList(_))));
    }
}
