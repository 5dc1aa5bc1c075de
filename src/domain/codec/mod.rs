//! Reversible short-code codec.
//!
//! Maps sequences of non-negative integers to short strings over a fixed
//! alphabet and back, using the sqids scheme: the alphabet is a numeral system
//! whose rotation is derived from the encoded numbers, numbers are separated by
//! a rotating separator, and short codes are padded with alphabet-derived
//! filler behind a separator so that padding never changes the decoded value.
//!
//! The codec is pure and immutable. Build it once from [`CodecOptions`] at
//! startup and share it behind an `Arc`.
//!
//! # Deployment invariant
//!
//! Alphabet, minimum length, and blocklist are part of the public wire format.
//! Changing any of them after codes were issued silently breaks resolution of
//! those codes; nothing detects this at runtime.

mod alphabet;
mod blocklist;

pub use alphabet::{Alphabet, DEFAULT_ALPHABET, MIN_ALPHABET_LENGTH};
pub use blocklist::Blocklist;

use alphabet::shuffle;
use thiserror::Error;

/// Largest accepted minimum code length.
pub const MAX_MIN_LENGTH: usize = 255;

/// Codes that would be shadowed by fixed routes and are never issued.
pub const RESERVED_CODES: &[&str] = &["api", "create", "health"];

/// Errors raised while building the codec or encoding.
///
/// Decoding never fails: malformed input decodes to "no value".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("alphabet must contain at least {min} characters, got {actual}")]
    AlphabetTooShort { min: usize, actual: usize },

    #[error("alphabet must not contain duplicate characters")]
    AlphabetDuplicates,

    #[error("alphabet character {0:?} is not allowed (use ASCII letters, digits, '-' or '_')")]
    AlphabetInvalidChar(char),

    #[error("minimum length must be at most {max}, got {actual}")]
    MinLengthTooLarge { max: usize, actual: usize },

    #[error("cannot encode negative id {0}")]
    NegativeId(i64),

    #[error("every alphabet rotation produced a blocked code")]
    BlocklistExhausted,
}

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    pub alphabet: String,
    /// Minimum code length; `0` disables padding.
    pub min_length: usize,
    pub blocklist: Vec<String>,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            min_length: 0,
            blocklist: Vec::new(),
        }
    }
}

/// Bijective encoder between row ids and public short codes.
#[derive(Debug, Clone)]
pub struct ShortCodeCodec {
    alphabet: Alphabet,
    min_length: usize,
    blocklist: Blocklist,
}

impl ShortCodeCodec {
    /// Validates `options` and builds the codec.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] when the alphabet is invalid or `min_length`
    /// exceeds [`MAX_MIN_LENGTH`].
    pub fn new(options: CodecOptions) -> Result<Self, CodecError> {
        let alphabet = Alphabet::new(&options.alphabet)?;

        if options.min_length > MAX_MIN_LENGTH {
            return Err(CodecError::MinLengthTooLarge {
                max: MAX_MIN_LENGTH,
                actual: options.min_length,
            });
        }

        let blocklist = Blocklist::new(&options.blocklist, &options.alphabet);

        Ok(Self {
            alphabet,
            min_length: options.min_length,
            blocklist,
        })
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn alphabet_len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn blocklist_len(&self) -> usize {
        self.blocklist.len()
    }

    /// Encodes `ids` into a short code.
    ///
    /// An empty slice encodes to an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BlocklistExhausted`] if the blocklist rejects
    /// every candidate.
    pub fn encode(&self, ids: &[u64]) -> Result<String, CodecError> {
        if ids.is_empty() {
            return Ok(String::new());
        }

        self.encode_with_increment(ids, 0)
    }

    /// Encodes a single store row id.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::NegativeId`] for ids below zero.
    pub fn encode_id(&self, id: i64) -> Result<String, CodecError> {
        let id = u64::try_from(id).map_err(|_| CodecError::NegativeId(id))?;
        self.encode(&[id])
    }

    /// Decodes a short code back into its ids.
    ///
    /// Returns an empty vector for the empty string, for codes containing a
    /// character outside the alphabet, and for values that overflow `u64`.
    pub fn decode(&self, code: &str) -> Vec<u64> {
        let bytes = code.as_bytes();

        let Some((&prefix, mut rest)) = bytes.split_first() else {
            return Vec::new();
        };

        if !bytes.iter().all(|&b| self.alphabet.contains(b)) {
            return Vec::new();
        }

        let Some(offset) = self.alphabet.position(prefix) else {
            return Vec::new();
        };

        let mut alphabet = self.alphabet.rotated_reversed(offset);
        let mut ids = Vec::new();

        while !rest.is_empty() {
            let separator = alphabet[0];

            let (chunk, tail) = match rest.iter().position(|&b| b == separator) {
                Some(at) => (&rest[..at], Some(&rest[at + 1..])),
                None => (rest, None),
            };

            // An empty chunk marks the start of padding.
            if chunk.is_empty() {
                return ids;
            }

            match read_digits(chunk, &alphabet[1..]) {
                Some(id) => ids.push(id),
                None => return Vec::new(),
            }

            match tail {
                Some(tail) => {
                    alphabet = shuffle(&alphabet);
                    rest = tail;
                }
                None => break,
            }
        }

        ids
    }

    /// Decodes a code that must carry exactly one store row id.
    ///
    /// Returns `None` unless `code` decodes to a single id that fits `i64`
    /// and `code` is that id's canonical encoding. Alternative spellings of an
    /// id (for example a code stripped of its padding) never resolve.
    pub fn decode_id(&self, code: &str) -> Option<i64> {
        let ids = self.decode(code);
        let [id] = ids.as_slice() else {
            return None;
        };

        let id = i64::try_from(*id).ok()?;
        let canonical = self.encode_id(id).ok()?;

        (canonical == code).then_some(id)
    }

    fn encode_with_increment(&self, ids: &[u64], increment: usize) -> Result<String, CodecError> {
        let base = self.alphabet.as_bytes();
        let len = base.len();

        if increment > len {
            return Err(CodecError::BlocklistExhausted);
        }

        let offset = ids.iter().enumerate().fold(ids.len(), |acc, (i, &id)| {
            base[(id % len as u64) as usize] as usize + i + acc
        }) % len;
        let offset = (offset + increment) % len;

        let mut alphabet = self.alphabet.rotated_reversed(offset);
        // Rotation then reversal puts the prefix at the end of the working alphabet.
        let prefix = base[offset];

        let mut code = vec![prefix];
        for (i, &id) in ids.iter().enumerate() {
            write_digits(id, &alphabet[1..], &mut code);

            if i + 1 < ids.len() {
                code.push(alphabet[0]);
                alphabet = shuffle(&alphabet);
            }
        }

        if code.len() < self.min_length {
            code.push(alphabet[0]);

            while code.len() < self.min_length {
                alphabet = shuffle(&alphabet);
                let take = (self.min_length - code.len()).min(alphabet.len());
                code.extend_from_slice(&alphabet[..take]);
            }
        }

        let code: String = code.into_iter().map(char::from).collect();

        if self.blocklist.is_blocked(&code) || RESERVED_CODES.contains(&code.as_str()) {
            return self.encode_with_increment(ids, increment + 1);
        }

        Ok(code)
    }
}

/// Appends `value` written in base `digits.len()`, most significant digit first.
fn write_digits(value: u64, digits: &[u8], out: &mut Vec<u8>) {
    let radix = digits.len() as u64;
    let start = out.len();
    let mut rest = value;

    loop {
        out.push(digits[(rest % radix) as usize]);
        rest /= radix;
        if rest == 0 {
            break;
        }
    }

    out[start..].reverse();
}

/// Reads a base `digits.len()` number; `None` on overflow or unknown digit.
fn read_digits(chunk: &[u8], digits: &[u8]) -> Option<u64> {
    let radix = digits.len() as u64;

    chunk.iter().try_fold(0u64, |acc, &b| {
        let digit = digits.iter().position(|&d| d == b)? as u64;
        acc.checked_mul(radix)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SQIDS_DEFAULT_ALPHABET: &str =
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    fn codec(min_length: usize) -> ShortCodeCodec {
        ShortCodeCodec::new(CodecOptions {
            min_length,
            ..CodecOptions::default()
        })
        .unwrap()
    }

    fn sqids_default(min_length: usize) -> ShortCodeCodec {
        ShortCodeCodec::new(CodecOptions {
            alphabet: SQIDS_DEFAULT_ALPHABET.to_string(),
            min_length,
            blocklist: Vec::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_matches_reference_vectors() {
        let codec = sqids_default(0);

        assert_eq!(codec.encode(&[1, 2, 3]).unwrap(), "86Rf07");
        assert_eq!(codec.encode(&[0]).unwrap(), "bM");
        assert_eq!(codec.encode(&[1]).unwrap(), "Uk");
        assert_eq!(codec.encode(&[9]).unwrap(), "nJ");
        assert_eq!(codec.decode("86Rf07"), vec![1, 2, 3]);
    }

    #[test]
    fn test_matches_reference_padding_vector() {
        let codec = sqids_default(SQIDS_DEFAULT_ALPHABET.len());

        assert_eq!(
            codec.encode(&[1, 2, 3]).unwrap(),
            "86Rf07xd4zBmiJXQG6otHEbew02c3PWsUOLZxADhCpKj7aVFv9I8RquYrNlSTM"
        );
    }

    #[test]
    fn test_default_alphabet_vectors() {
        let codec = codec(0);

        assert_eq!(codec.encode_id(0).unwrap(), "td");
        assert_eq!(codec.encode_id(1).unwrap(), "52");
        assert_eq!(codec.encode_id(1000).unwrap(), "hei");
        assert_eq!(codec.encode(&[u64::MAX]).unwrap(), "z8known896r6bb");
    }

    #[test]
    fn test_round_trip_single_ids() {
        for min_length in [0, 8, 20] {
            let codec = codec(min_length);
            for id in (0..2_000).chain([35, 36, 1_295, 1_296, u64::MAX / 2, u64::MAX]) {
                let code = codec.encode(&[id]).unwrap();
                assert_eq!(codec.decode(&code), vec![id], "id {id} via {code}");
                assert!(code.len() >= min_length);
            }
        }
    }

    #[test]
    fn test_round_trip_multiple_ids() {
        let codec = codec(0);

        assert_eq!(codec.encode(&[1, 2, 3]).unwrap(), "phbwsd");
        assert_eq!(codec.decode("phbwsd"), vec![1, 2, 3]);

        let code = codec.encode(&[0, 0]).unwrap();
        assert_eq!(codec.decode(&code), vec![0, 0]);
    }

    #[test]
    fn test_no_collisions() {
        let codec = codec(0);
        let codes: HashSet<String> = (0..5_000).map(|id| codec.encode(&[id]).unwrap()).collect();
        assert_eq!(codes.len(), 5_000);
    }

    #[test]
    fn test_encoding_is_idempotent() {
        let codec = codec(6);
        assert_eq!(codec.encode_id(42).unwrap(), codec.encode_id(42).unwrap());
    }

    #[test]
    fn test_zero_round_trips_with_padding() {
        let codec = codec(8);

        let code = codec.encode_id(0).unwrap();
        assert_eq!(code, "tdffoing");
        assert_eq!(codec.decode(&code), vec![0]);
        assert_eq!(codec.decode_id(&code), Some(0));
    }

    #[test]
    fn test_encode_empty_input() {
        assert_eq!(codec(10).encode(&[]).unwrap(), "");
    }

    #[test]
    fn test_encode_rejects_negative_id() {
        assert_eq!(codec(0).encode_id(-1), Err(CodecError::NegativeId(-1)));
    }

    #[test]
    fn test_decode_is_lenient() {
        let codec = codec(0);

        assert!(codec.decode("").is_empty());
        assert!(codec.decode("t").is_empty());
        assert!(codec.decode("TD").is_empty());
        assert!(codec.decode("t-d").is_empty());
        assert!(codec.decode("tд").is_empty());
        assert!(codec.decode(&"z".repeat(24)).is_empty());
    }

    #[test]
    fn test_decode_id_requires_canonical_single_id() {
        let padded = codec(8);

        // "td" is the unpadded spelling of 0; only "tdffoing" is issued.
        assert_eq!(padded.decode("td"), vec![0]);
        assert_eq!(padded.decode_id("td"), None);

        let plain = codec(0);
        let pair = plain.encode(&[1, 2]).unwrap();
        assert_eq!(plain.decode_id(&pair), None);
        assert_eq!(plain.decode_id("hei"), Some(1000));
    }

    #[test]
    fn test_decode_id_rejects_values_beyond_i64() {
        let codec = codec(0);
        let code = codec.encode(&[u64::MAX]).unwrap();
        assert_eq!(codec.decode(&code), vec![u64::MAX]);
        assert_eq!(codec.decode_id(&code), None);
    }

    #[test]
    fn test_blocklist_forces_another_rotation() {
        let codec = ShortCodeCodec::new(CodecOptions {
            blocklist: vec!["hei".to_string()],
            ..CodecOptions::default()
        })
        .unwrap();

        let code = codec.encode_id(1000).unwrap();
        assert_eq!(code, "kwn");
        assert_eq!(codec.decode_id(&code), Some(1000));
    }

    #[test]
    fn test_rejects_min_length_above_limit() {
        let result = ShortCodeCodec::new(CodecOptions {
            min_length: MAX_MIN_LENGTH + 1,
            ..CodecOptions::default()
        });

        assert_eq!(
            result.unwrap_err(),
            CodecError::MinLengthTooLarge {
                max: 255,
                actual: 256
            }
        );
    }

    #[test]
    fn test_smallest_alphabet_round_trips() {
        let codec = ShortCodeCodec::new(CodecOptions {
            alphabet: "abc".to_string(),
            min_length: 5,
            blocklist: Vec::new(),
        })
        .unwrap();

        for id in 0..500 {
            let code = codec.encode(&[id]).unwrap();
            assert!(code.len() >= 5);
            assert_eq!(codec.decode(&code), vec![id]);
        }
    }

    #[test]
    fn test_reserved_codes_never_resolve() {
        let codec = codec(0);

        for reserved in RESERVED_CODES {
            assert_eq!(codec.decode_id(reserved), None);
        }
    }
}
