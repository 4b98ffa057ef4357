use std::fs;
use std::path::Path;

use tracing::debug;

use super::binary::{HEADER_SIZE, KEY_SIZE, OFFSET_SIZE, RECORD_SIZE};
use super::DictError;

/// Writer for the [`BinaryDictionary`](super::BinaryDictionary) file format.
///
/// Entries pushed for the same key keep their relative order, so the first
/// word pushed for a key is the one a lookup ranks highest.
#[derive(Debug, Default)]
pub struct BinaryDictionaryBuilder {
    entries: Vec<([u8; KEY_SIZE], String)>,
}

impl BinaryDictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `word` under `key`. The key is lowercased and padded with
    /// spaces (or truncated) to the fixed key width.
    pub fn push(&mut self, key: &str, word: &str) -> Result<(), DictError> {
        if word.contains('\n') {
            return Err(DictError::Parse(format!(
                "word {word:?} contains a newline"
            )));
        }
        self.entries.push((pad_key(key), word.to_string()));
        Ok(())
    }

    pub fn extend<'a>(
        &mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), DictError> {
        for (key, word) in pairs {
            self.push(key, word)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize into the on-disk layout.
    pub fn build(&self) -> Result<Vec<u8>, DictError> {
        let mut sorted: Vec<&([u8; KEY_SIZE], String)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let count: u32 = sorted
            .len()
            .try_into()
            .map_err(|_| DictError::Parse("entry count exceeds u32::MAX".to_string()))?;

        let body_len: usize = sorted.iter().map(|(_, w)| w.len() + 1).sum();
        let mut index = Vec::with_capacity(sorted.len() * RECORD_SIZE);
        let mut body = Vec::with_capacity(body_len);
        for (key, word) in &sorted {
            let offset: u32 = body
                .len()
                .try_into()
                .map_err(|_| DictError::Parse("body exceeds u32::MAX".to_string()))?;
            index.extend_from_slice(key);
            index.extend_from_slice(&offset.to_be_bytes());
            body.extend_from_slice(word.as_bytes());
            body.push(b'\n');
        }
        debug_assert_eq!(index.len(), sorted.len() * (KEY_SIZE + OFFSET_SIZE));

        let mut buf = Vec::with_capacity(HEADER_SIZE + index.len() + body.len());
        buf.extend_from_slice(&count.to_be_bytes());
        buf.extend_from_slice(&index);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Write the dictionary to `path` via a temporary file and rename.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        let bytes = self.build()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), entries = self.entries.len(), bytes = bytes.len(), "wrote binary dictionary");
        Ok(())
    }
}

/// Lowercase `key`, then cut or space-pad it to [`KEY_SIZE`] bytes.
///
/// Truncation can split a multi-byte character; keys are compared as raw
/// bytes, so that is harmless.
pub(super) fn pad_key(key: &str) -> [u8; KEY_SIZE] {
    let lower = key.to_lowercase();
    let mut out = [b' '; KEY_SIZE];
    for (slot, b) in out.iter_mut().zip(lower.bytes()) {
        *slot = b;
    }
    out
}
