//! Dictionary sources for word prediction.
//!
//! `BinaryDictionary` reads the read-only, prefix-indexed table format.
//! `FrequencyDictionary` is the in-memory learning trie that backs both
//! `AutoDictionary` and the persisted `UserDictionary`.

mod auto;
mod binary;
mod binary_builder;
mod entry;
mod frequency;
#[cfg(test)]
mod tests;

pub use auto::{AutoDictionary, LearningPolicy};
pub use binary::{BinaryDictionary, KEY_SIZE, MAX_MATCHES, RECORD_SIZE};
pub use binary_builder::BinaryDictionaryBuilder;
pub use entry::DictEntry;
pub use frequency::{FrequencyDictionary, MAX_WORD_LENGTH};

use std::io;

use crate::composer::WordComposer;

/// Weight reported when a typed word is committed without correction.
pub const FREQUENCY_FOR_TYPED: u32 = 1;
/// Weight reported when the user picks a word from the suggestion strip.
pub const FREQUENCY_FOR_PICKED: u32 = 3;
/// Frequency given to a word promoted from the auto-dictionary.
pub const FREQUENCY_FOR_AUTO_ADD: u32 = 250;
/// Frequency used for an explicit "add to dictionary" action.
pub const FREQUENCY_FOR_EXPLICIT_ADD: u32 = 128;

#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("file truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("candidate is not valid UTF-8")]
    InvalidUtf8,

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("dictionary is closed")]
    Closed,

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// A source of candidate words.
///
/// `lookup` feeds every candidate for the composer's typed word into `emit`
/// as `(word, score)`. Implementations must not fail: read errors are logged
/// and produce no candidates.
pub trait Dictionary: Send + Sync {
    fn lookup(&self, word: &WordComposer, emit: &mut dyn FnMut(&str, u32));

    /// Membership test. Sources that only support prefix suggestion say no.
    fn is_valid_word(&self, _word: &str) -> bool {
        false
    }

    /// Collect `lookup` output into entries, in emission order.
    fn lookup_entries(&self, word: &WordComposer) -> Vec<DictEntry> {
        let mut out = Vec::new();
        self.lookup(word, &mut |w, score| out.push(DictEntry::new(w, score)));
        out
    }
}
