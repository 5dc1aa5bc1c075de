//! Alphabet validation and the deterministic shuffle used by the codec.

use std::collections::HashSet;

use super::CodecError;

/// Alphabet used when `SHORT_CODE_ALPHABET` is not configured.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Smallest alphabet the codec accepts: one separator plus a base-2 digit set.
pub const MIN_ALPHABET_LENGTH: usize = 3;

/// A validated, pre-shuffled codec alphabet.
///
/// Characters are restricted to `[A-Za-z0-9_-]` so every code is usable as a
/// single path segment without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet(Vec<u8>);

impl Alphabet {
    /// Validates `chars` and applies the initial shuffle.
    ///
    /// # Errors
    ///
    /// - [`CodecError::AlphabetInvalidChar`] for characters outside `[A-Za-z0-9_-]`
    /// - [`CodecError::AlphabetTooShort`] for fewer than three characters
    /// - [`CodecError::AlphabetDuplicates`] when a character repeats
    pub fn new(chars: &str) -> Result<Self, CodecError> {
        if let Some(invalid) = chars.chars().find(|c| !is_url_safe(*c)) {
            return Err(CodecError::AlphabetInvalidChar(invalid));
        }

        let bytes = chars.as_bytes();
        if bytes.len() < MIN_ALPHABET_LENGTH {
            return Err(CodecError::AlphabetTooShort {
                min: MIN_ALPHABET_LENGTH,
                actual: bytes.len(),
            });
        }

        let unique: HashSet<u8> = bytes.iter().copied().collect();
        if unique.len() != bytes.len() {
            return Err(CodecError::AlphabetDuplicates);
        }

        Ok(Self(shuffle(bytes)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn position(&self, byte: u8) -> Option<usize> {
        self.0.iter().position(|&c| c == byte)
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.0.contains(&byte)
    }

    /// Rotates the alphabet left by `offset` and reverses it.
    ///
    /// This is the per-code working alphabet: element 0 is the first separator,
    /// the rest are the digits.
    pub(super) fn rotated_reversed(&self, offset: usize) -> Vec<u8> {
        let mut working: Vec<u8> = self.0[offset..]
            .iter()
            .chain(&self.0[..offset])
            .copied()
            .collect();
        working.reverse();
        working
    }
}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Deterministic in-place permutation keyed only by the alphabet contents.
///
/// Walks `i` up from the front and `j` down from the back, swapping `i` with
/// `(i * j + a[i] + a[j]) % len`.
pub(super) fn shuffle(chars: &[u8]) -> Vec<u8> {
    let mut chars = chars.to_vec();
    let len = chars.len();
    if len < 2 {
        return chars;
    }

    let (mut i, mut j) = (0, len - 1);
    while j > 0 {
        let r = (i * j + chars[i] as usize + chars[j] as usize) % len;
        chars.swap(i, r);
        i += 1;
        j -= 1;
    }

    chars
}
