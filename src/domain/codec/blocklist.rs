//! Optional word filter applied to generated codes.
//!
//! A blocked code is never returned by the codec; encoding is retried with a
//! different alphabet rotation instead, so the mapping stays bijective.

use std::collections::HashSet;

/// Words shorter than this are ignored.
const MIN_WORD_LENGTH: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    words: Vec<String>,
}

impl Blocklist {
    /// Builds a blocklist for the given alphabet.
    ///
    /// Words are lower-cased. Words shorter than three characters, or with
    /// characters the (lower-cased) alphabet cannot produce, are dropped.
    pub fn new<I, S>(words: I, alphabet: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alphabet: HashSet<char> = alphabet.to_lowercase().chars().collect();

        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| word.len() >= MIN_WORD_LENGTH)
            .filter(|word| word.chars().all(|c| alphabet.contains(&c)))
            .collect();

        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` when `code` must not be issued.
    ///
    /// Matching is case-insensitive:
    /// - codes or words of three characters or fewer only match exactly
    /// - words containing a digit match as a prefix or suffix
    /// - any other word matches anywhere in the code
    pub fn is_blocked(&self, code: &str) -> bool {
        if self.words.is_empty() {
            return false;
        }

        let code = code.to_lowercase();

        self.words.iter().any(|word| {
            if word.len() > code.len() {
                false
            } else if code.len() <= MIN_WORD_LENGTH || word.len() <= MIN_WORD_LENGTH {
                code == *word
            } else if word.chars().any(|c| c.is_ascii_digit()) {
                code.starts_with(word.as_str()) || code.ends_with(word.as_str())
            } else {
                code.contains(word.as_str())
            }
        })
    }
}
