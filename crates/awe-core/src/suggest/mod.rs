//! Suggestion ranking across dictionary sources.
//!
//! `Suggest` queries the attached dictionaries for the word being composed,
//! keeps the best `max_suggestions` candidates in a score-ordered list, and
//! decides whether the top candidate may replace the typed word
//! automatically under the current [`CorrectionMode`].

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::composer::WordComposer;
use crate::dict::{Dictionary, MAX_MATCHES};
use crate::text::{capitalize_first, eq_ignore_case, fold_case};

pub const DEFAULT_MAX_SUGGESTIONS: usize = 12;
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Quick fixes examined from the top of the list in FULL mode.
const QUICK_FIX_DEPTH_FULL: usize = 6;

/// How aggressively typed words are replaced by suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionMode {
    /// Never correct.
    #[default]
    None,
    /// Only quick fixes may replace the typed word.
    Basic,
    /// Any sufficiently similar dictionary candidate may replace it.
    Full,
}

pub struct Suggest {
    main: Vec<Arc<dyn Dictionary>>,
    user: Option<Arc<dyn Dictionary>>,
    auto: Option<Arc<dyn Dictionary>>,
    contacts: Option<Arc<dyn Dictionary>>,
    quick_fixes: HashMap<String, String>,
    mode: CorrectionMode,
    max_suggestions: usize,
    min_query_len: usize,
    have_correction: bool,
}

impl Default for Suggest {
    fn default() -> Self {
        Self::new()
    }
}

impl Suggest {
    pub fn new() -> Self {
        Self {
            main: Vec::new(),
            user: None,
            auto: None,
            contacts: None,
            quick_fixes: HashMap::new(),
            mode: CorrectionMode::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            have_correction: false,
        }
    }

    /// Attach a read-only (main) dictionary. Queried after the user, auto
    /// and contacts sources, in attachment order.
    pub fn add_dictionary(&mut self, dict: Arc<dyn Dictionary>) {
        self.main.push(dict);
    }

    pub fn set_user_dictionary(&mut self, dict: Option<Arc<dyn Dictionary>>) {
        self.user = dict;
    }

    pub fn set_auto_dictionary(&mut self, dict: Option<Arc<dyn Dictionary>>) {
        self.auto = dict;
    }

    pub fn set_contacts_dictionary(&mut self, dict: Option<Arc<dyn Dictionary>>) {
        self.contacts = dict;
    }

    pub fn has_main_dictionary(&self) -> bool {
        !self.main.is_empty()
    }

    /// Replace the quick-fix table. Keys are matched case-insensitively.
    pub fn set_quick_fixes<I>(&mut self, fixes: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.quick_fixes = fixes
            .into_iter()
            .map(|(typo, fix)| (typo.to_lowercase(), fix))
            .collect();
    }

    /// Takes effect from the next query; lists already returned are untouched.
    pub fn set_correction_mode(&mut self, mode: CorrectionMode) {
        self.mode = mode;
    }

    pub fn correction_mode(&self) -> CorrectionMode {
        self.mode
    }

    pub fn set_max_suggestions(&mut self, max: usize) {
        self.max_suggestions = max.max(1);
    }

    pub fn set_min_query_len(&mut self, len: usize) {
        self.min_query_len = len;
    }

    /// Ranked candidates for the word being composed.
    ///
    /// The typed word sits at index 0 whenever anything was found; the list
    /// is empty otherwise. Also updates [`has_minimal_correction`].
    ///
    /// [`has_minimal_correction`]: Suggest::has_minimal_correction
    pub fn get_suggestions(&mut self, word: &WordComposer) -> Vec<String> {
        self.have_correction = false;
        if word.is_empty() {
            return Vec::new();
        }
        let typed = word.typed_word();
        let _span = debug_span!("suggest", typed, mode = ?self.mode).entered();

        let mut ranked = RankedList::new(self.max_suggestions, typed, word.is_capitalized());
        if word.len() >= self.min_query_len {
            for dict in [&self.user, &self.auto, &self.contacts].into_iter().flatten() {
                dict.lookup(word, &mut |w, score| ranked.add(w, score));
            }
            if !ranked.is_empty() && self.mode != CorrectionMode::None && self.is_valid_word(typed) {
                self.have_correction = true;
            }
            for dict in &self.main {
                dict.lookup(word, &mut |w, score| ranked.add(w, score));
            }
        }
        let found = !ranked.is_empty();

        let mut words = ranked.into_words();
        words.insert(0, typed.to_string());

        if self.mode == CorrectionMode::Full && found {
            if let Some(first) = words.iter().skip(1).find(|w| w.as_str() != typed) {
                if have_sufficient_commonality(typed, first) {
                    self.have_correction = true;
                }
            }
        }

        let fixed = self.apply_quick_fixes(&mut words, word.is_capitalized());
        dedup_keep_first(&mut words);

        if !found && !fixed {
            self.have_correction = false;
            return Vec::new();
        }
        if word.is_mostly_caps() {
            self.have_correction = false;
        }
        debug!(count = words.len(), correction = self.have_correction);
        words
    }

    /// True when the last [`get_suggestions`] result may auto-replace the
    /// typed word. Never true for mostly-caps input or in NONE mode.
    ///
    /// [`get_suggestions`]: Suggest::get_suggestions
    pub fn has_minimal_correction(&self) -> bool {
        self.have_correction
    }

    /// True if any attached dictionary knows `word`.
    pub fn is_valid_word(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.main
            .iter()
            .chain(&self.user)
            .chain(&self.auto)
            .chain(&self.contacts)
            .any(|d| d.is_valid_word(word))
    }

    /// Table-mode candidates: main dictionaries only, in source order,
    /// without the typed word and without any correction policy.
    pub fn table_suggestions(&self, word: &WordComposer) -> Vec<String> {
        if word.is_empty() {
            return Vec::new();
        }
        let _span = debug_span!("table_suggest", typed = word.typed_word()).entered();
        let mut words: Vec<String> = Vec::new();
        for dict in &self.main {
            dict.lookup(word, &mut |w, _| {
                if words.len() < MAX_MATCHES {
                    words.push(w.to_string());
                }
            });
        }
        dedup_keep_first(&mut words);
        words
    }

    /// Insert the quick fix of each of the first few candidates right after
    /// it. Returns whether any fix was inserted.
    fn apply_quick_fixes(&mut self, words: &mut Vec<String>, capitalized: bool) -> bool {
        if self.quick_fixes.is_empty() || self.mode == CorrectionMode::None {
            return false;
        }
        let depth = match self.mode {
            CorrectionMode::Basic => 1,
            _ => QUICK_FIX_DEPTH_FULL,
        };
        let mut inserted = false;
        let mut i = 0;
        while i < words.len() && i < depth {
            let Some(fix) = self.quick_fixes.get(&words[i].to_lowercase()) else {
                i += 1;
                continue;
            };
            let fix = if capitalized {
                capitalize_first(fix)
            } else {
                fix.clone()
            };
            let mut can_add = fix != words[i];
            if can_add && self.mode != CorrectionMode::Basic {
                can_add = words.get(i + 1) != Some(&fix);
            }
            if can_add {
                debug!(from = %words[i], to = %fix, "quick fix");
                words.insert(i + 1, fix);
                self.have_correction = true;
                inserted = true;
                i += 1;
            }
            i += 1;
        }
        inserted
    }
}

/// Score-ordered, bounded candidate list.
struct RankedList<'a> {
    entries: Vec<(String, u32)>,
    max: usize,
    typed: &'a str,
    capitalize: bool,
}

impl<'a> RankedList<'a> {
    fn new(max: usize, typed: &'a str, capitalize: bool) -> Self {
        Self {
            entries: Vec::with_capacity(max + 1),
            max,
            typed,
            capitalize,
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(&mut self, word: &str, score: u32) {
        let word = if self.capitalize {
            capitalize_first(word)
        } else {
            word.to_string()
        };
        if let Some(existing) = self.entries.iter().position(|(w, _)| *w == word) {
            if self.entries[existing].1 >= score {
                return;
            }
            self.entries.remove(existing);
        }

        let pos = if eq_ignore_case(self.typed, &word) {
            0
        } else {
            if self.entries.len() >= self.max
                && self.entries.last().is_some_and(|&(_, s)| s >= score)
            {
                return;
            }
            let len = word.chars().count();
            self.entries
                .iter()
                .position(|(w, s)| *s < score || (*s == score && len < w.chars().count()))
                .unwrap_or(self.entries.len())
        };
        if pos >= self.max {
            return;
        }
        self.entries.insert(pos, (word, score));
        self.entries.truncate(self.max);
    }

    fn into_words(self) -> Vec<String> {
        self.entries.into_iter().map(|(w, _)| w).collect()
    }
}

fn dedup_keep_first(words: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    words.retain(|w| seen.insert(w.clone()));
}

/// Whether `suggestion` shares enough letters with `original` to be offered
/// as an automatic correction. One skipped character in the suggestion is
/// tolerated.
pub fn have_sufficient_commonality(original: &str, suggestion: &str) -> bool {
    let orig: Vec<char> = original.chars().map(fold_case).collect();
    let sugg: Vec<char> = suggestion.chars().map(fold_case).collect();
    let min_len = orig.len().min(sugg.len());
    if min_len <= 2 {
        return true;
    }
    let mut matching = 0;
    let mut less_matching = 0;
    for i in 0..min_len {
        if orig[i] == sugg[i] {
            matching += 1;
            less_matching += 1;
        } else if i + 1 < sugg.len() && orig[i] == sugg[i + 1] {
            less_matching += 1;
        }
    }
    let matching = matching.max(less_matching);
    if min_len <= 4 {
        matching >= 2
    } else {
        matching > min_len / 2
    }
}
