//! Keystroke accumulator for the word currently being typed.
//!
//! `WordComposer` buffers each key press together with the keys physically
//! adjacent to it, so dictionaries can tolerate fat-finger mistakes.

use crate::text::fold_case;

/// One recorded key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    /// Character produced by the key (already shifted if shift was down).
    pub primary: char,
    /// Characters of the keys surrounding the one that was hit, closest first.
    pub nearby: Vec<char>,
}

impl Keystroke {
    pub fn new(primary: char, nearby: &[char]) -> Self {
        Self {
            primary,
            nearby: nearby.to_vec(),
        }
    }

    /// Codes accepted at this position: the lowercased primary first, then
    /// the nearby keys in the order the keyboard reported them.
    pub fn codes(&self) -> impl Iterator<Item = char> + '_ {
        std::iter::once(fold_case(self.primary)).chain(
            self.nearby
                .iter()
                .copied()
                .filter(move |&c| c != fold_case(self.primary)),
        )
    }
}

#[derive(Debug, Default, Clone)]
pub struct WordComposer {
    keys: Vec<Keystroke>,
    typed: String,
    caps_count: usize,
    capitalized: bool,
}

impl WordComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a keystroke. Capitalization flags are left as they were.
    pub fn add(&mut self, primary: char, nearby: &[char]) {
        self.typed.push(primary);
        self.keys.push(Keystroke::new(primary, nearby));
        if primary.is_uppercase() {
            self.caps_count += 1;
        }
    }

    /// Remove the final keystroke. No-op when empty.
    pub fn delete_last(&mut self) {
        if self.keys.pop().is_none() {
            return;
        }
        if let Some(last) = self.typed.pop() {
            if last.is_uppercase() {
                self.caps_count -= 1;
            }
        }
    }

    pub fn reset(&mut self) {
        self.keys.clear();
        self.typed.clear();
        self.caps_count = 0;
        self.capitalized = false;
    }

    /// Set when the first letter of the word was typed while shifted.
    pub fn set_capitalized(&mut self, capitalized: bool) {
        self.capitalized = capitalized;
    }

    pub fn is_capitalized(&self) -> bool {
        self.capitalized
    }

    /// True when strictly more than half the typed characters are uppercase.
    pub fn is_mostly_caps(&self) -> bool {
        !self.keys.is_empty() && self.caps_count * 2 > self.keys.len()
    }

    /// The primary codes as entered, without case normalization.
    pub fn typed_word(&self) -> &str {
        &self.typed
    }

    pub fn keystrokes(&self) -> &[Keystroke] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
