//! Keyboard settings loaded from TOML.
//!
//! Settings are read once per editing session and handed to the session
//! explicitly. Default values are embedded via
//! `include_str!("default_settings.toml")` and checked by `build.rs`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dict::LearningPolicy;
use crate::suggest::CorrectionMode;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputSettings,
    pub separators: SeparatorSettings,
    pub suggest: SuggestSettings,
    pub learning: LearningSettings,
    /// Typo → replacement table offered as corrections.
    #[serde(default)]
    pub quick_fixes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSettings {
    pub auto_cap: bool,
    pub quick_fixes: bool,
    pub show_suggestions: bool,
    pub auto_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeparatorSettings {
    pub word: String,
    pub sentence: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestSettings {
    pub max_suggestions: usize,
    pub debounce_ms: u64,
    pub min_query_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningSettings {
    pub typed_weight: u32,
    pub picked_weight: u32,
    pub auto_add_frequency: u32,
    pub explicit_add_frequency: u32,
    pub max_word_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

impl Settings {
    /// Suggestions are only shown while quick fixes are on.
    pub fn show_suggestions(&self) -> bool {
        self.input.show_suggestions && self.input.quick_fixes
    }

    pub fn auto_complete(&self) -> bool {
        self.input.auto_complete && self.show_suggestions()
    }

    pub fn correction_mode(&self) -> CorrectionMode {
        if self.auto_complete() {
            CorrectionMode::Full
        } else if self.input.quick_fixes {
            CorrectionMode::Basic
        } else {
            CorrectionMode::None
        }
    }

    /// Whether separators may replace the typed word with a correction.
    pub fn auto_correct(&self) -> bool {
        self.auto_complete() || self.input.quick_fixes
    }

    pub fn is_word_separator(&self, c: char) -> bool {
        self.separators.word.contains(c)
    }

    pub fn is_sentence_separator(&self, c: char) -> bool {
        self.separators.sentence.contains(c)
    }

    pub fn learning_policy(&self) -> LearningPolicy {
        LearningPolicy {
            typed_weight: self.learning.typed_weight,
            picked_weight: self.learning.picked_weight,
            auto_add_frequency: self.learning.auto_add_frequency,
            explicit_add_frequency: self.learning.explicit_add_frequency,
            max_word_length: self.learning.max_word_length,
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(suggest.max_suggestions);
    check_positive!(suggest.min_query_len);
    check_positive!(learning.typed_weight);
    check_positive!(learning.picked_weight);
    check_positive!(learning.auto_add_frequency);
    check_positive!(learning.explicit_add_frequency);

    if s.learning.max_word_length < 2 {
        return Err(SettingsError::InvalidValue {
            field: "learning.max_word_length".to_string(),
            reason: "must be at least 2".to_string(),
        });
    }
    if s.separators.word.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "separators.word".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if let Some(c) = s
        .separators
        .sentence
        .chars()
        .find(|&c| !s.separators.word.contains(c))
    {
        return Err(SettingsError::InvalidValue {
            field: "separators.sentence".to_string(),
            reason: format!("{c:?} is not a word separator"),
        });
    }
    for (typo, fix) in &s.quick_fixes {
        if typo.is_empty() || fix.is_empty() {
            return Err(SettingsError::InvalidValue {
                field: format!("quick_fixes.{typo}"),
                reason: "typo and replacement must not be empty".to_string(),
            });
        }
    }
    Ok(())
}
