//! Durable user dictionary.
//!
//! A [`FrequencyDictionary`] that never re-accumulates: adding a word that is
//! already present is a no-op. Persisted as `AWUD` + version + CRC32 of the
//! bincode body, saved atomically through a temporary file.


use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::composer::WordComposer;
use crate::dict::{DictEntry, DictError, Dictionary, FrequencyDictionary};

const MAGIC: &[u8; 4] = b"AWUD";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 9;

#[derive(Debug, Default)]
pub struct UserDictionary {
    words: FrequencyDictionary,
}

impl UserDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `word` with `frequency`. Returns `true` if newly added, `false`
    /// if it was already present or is not a trackable word.
    pub fn add_word(&self, word: &str, frequency: u32) -> bool {
        if self.words.contains(word) {
            return false;
        }
        let added = self.words.add_word(word, frequency).is_some();
        if added {
            debug!(word, frequency, "user word added");
        }
        added
    }

    /// Remove a word. Returns `true` if removed, `false` if not found.
    pub fn remove_word(&self, word: &str) -> bool {
        self.words.remove(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn word_frequency(&self, word: &str) -> u32 {
        self.words.word_frequency(word)
    }

    /// All entries sorted by word.
    pub fn list(&self) -> Vec<DictEntry> {
        self.words.words()
    }

    pub fn predict(&self, prefix: &str, max_results: usize) -> Vec<DictEntry> {
        self.words.predict(prefix, max_results)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Serialize to bytes (AWUD format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let records: Vec<UserWordRecord> = self
            .list()
            .into_iter()
            .map(|e| UserWordRecord {
                word: e.word,
                frequency: e.frequency,
            })
            .collect();
        let body = bincode::serialize(&records).map_err(DictError::Serialize)?;
        let checksum = crc32fast::hash(&body);

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&checksum.to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (AWUD format).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DictError> {
        if bytes.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }
        if &bytes[0..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if bytes[4] != VERSION {
            return Err(DictError::UnsupportedVersion(bytes[4]));
        }
        let stored = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        let body = &bytes[HEADER_SIZE..];
        if crc32fast::hash(body) != stored {
            return Err(DictError::ChecksumMismatch);
        }
        let records: Vec<UserWordRecord> =
            bincode::deserialize(body).map_err(DictError::Deserialize)?;

        let dict = Self::new();
        for rec in records {
            if dict.words.add_word(&rec.word, rec.frequency).is_none() {
                warn!(word = %rec.word, "skipping stored user word");
            }
        }
        Ok(dict)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), words = self.len(), "saved user dictionary");
        Ok(())
    }

    /// Open from file, returning an empty dictionary if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Dictionary for UserDictionary {
    fn lookup(&self, word: &WordComposer, emit: &mut dyn FnMut(&str, u32)) {
        self.words.lookup(word, emit);
    }

    fn is_valid_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Flat serialization record.
#[derive(Serialize, Deserialize)]
struct UserWordRecord {
    word: String,
    frequency: u32,
}
