use serde::{Deserialize, Serialize};

/// A word and its source-specific frequency. Scores from different sources
/// are not comparable until the ranking engine merges them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub word: String,
    pub frequency: u32,
}

impl DictEntry {
    pub fn new(word: impl Into<String>, frequency: u32) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}
