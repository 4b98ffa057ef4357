use std::sync::Arc;

use tracing::debug;

use super::{
    Dictionary, FrequencyDictionary, FREQUENCY_FOR_AUTO_ADD, FREQUENCY_FOR_EXPLICIT_ADD,
    FREQUENCY_FOR_PICKED, FREQUENCY_FOR_TYPED, MAX_WORD_LENGTH,
};
use crate::composer::WordComposer;
use crate::user_dict::UserDictionary;

/// Weights and thresholds for learning from what the user commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningPolicy {
    pub typed_weight: u32,
    pub picked_weight: u32,
    pub auto_add_frequency: u32,
    pub explicit_add_frequency: u32,
    pub max_word_length: usize,
}

impl Default for LearningPolicy {
    fn default() -> Self {
        Self {
            typed_weight: FREQUENCY_FOR_TYPED,
            picked_weight: FREQUENCY_FOR_PICKED,
            auto_add_frequency: FREQUENCY_FOR_AUTO_ADD,
            explicit_add_frequency: FREQUENCY_FOR_EXPLICIT_ADD,
            max_word_length: MAX_WORD_LENGTH,
        }
    }
}

impl LearningPolicy {
    /// Accumulated frequency at which a learned word counts as valid.
    pub fn validity_threshold(&self) -> u32 {
        self.picked_weight.saturating_mul(2)
    }

    /// Accumulated frequency at which a learned word moves into the user
    /// dictionary.
    pub fn promotion_threshold(&self) -> u32 {
        self.picked_weight.saturating_mul(5)
    }
}

/// Session-lifetime dictionary of words the user has committed.
///
/// Words that keep coming back are promoted into the user dictionary with
/// [`LearningPolicy::auto_add_frequency`]; the promotion fires once, when the
/// accumulated frequency first reaches the threshold.
pub struct AutoDictionary {
    words: FrequencyDictionary,
    user: Option<Arc<UserDictionary>>,
    policy: LearningPolicy,
}

impl AutoDictionary {
    pub fn new(policy: LearningPolicy, user: Option<Arc<UserDictionary>>) -> Self {
        Self {
            words: FrequencyDictionary::with_max_word_length(policy.max_word_length),
            user,
            policy,
        }
    }

    pub fn policy(&self) -> &LearningPolicy {
        &self.policy
    }

    /// Record `weight` more uses of `word`. Returns the accumulated
    /// frequency, or `None` for words too short or too long to learn.
    pub fn add_word(&self, word: &str, weight: u32) -> Option<u32> {
        if word.chars().count() < 2 {
            return None;
        }
        let before = self.words.word_frequency(word);
        let after = self.words.add_word(word, weight)?;
        let threshold = self.policy.promotion_threshold();
        if before < threshold && after >= threshold {
            if let Some(user) = &self.user {
                if user.add_word(word, self.policy.auto_add_frequency) {
                    debug!(word, frequency = after, "promoted to user dictionary");
                }
            }
        }
        Some(after)
    }

    pub fn word_frequency(&self, word: &str) -> u32 {
        self.words.word_frequency(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for AutoDictionary {
    fn lookup(&self, word: &WordComposer, emit: &mut dyn FnMut(&str, u32)) {
        self.words.lookup(word, emit);
    }

    fn is_valid_word(&self, word: &str) -> bool {
        self.words.word_frequency(word) >= self.policy.validity_threshold()
    }
}
