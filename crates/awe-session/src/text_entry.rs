//! Commit/revert state machine for one focused field.
//!
//! The controller reports what happened (a character was typed, a
//! suggestion was accepted, backspace was pressed) and consults the state to
//! decide whether the next backspace reverts the last commit and whether
//! punctuation should be swapped with a preceding space.

use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryState {
    #[default]
    Start,
    InWord,
    /// An auto-correction was just applied silently.
    AcceptedDefault,
    /// The user chose a candidate from the strip.
    PickedSuggestion,
    PunctuationAfterAccepted,
    SpaceAfterAccepted,
    SpaceAfterPicked,
    /// The pending backspace reverts the last commit.
    UndoCommit,
}

/// Counters for one session, logged when it ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryStats {
    pub auto_corrections: u32,
    pub undone_corrections: u32,
    pub manual_picks: u32,
    pub typed_words: u32,
    pub backspaces: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TextEntryState {
    state: EntryState,
    reverted_separator: Option<char>,
    stats: EntryStats,
}

impl TextEntryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_session(&mut self) {
        *self = Self::default();
    }

    /// Ends the session and returns its counters.
    pub fn end_session(&mut self) -> EntryStats {
        let stats = self.stats;
        debug!(
            auto_corrections = stats.auto_corrections,
            undone = stats.undone_corrections,
            manual_picks = stats.manual_picks,
            typed_words = stats.typed_words,
            backspaces = stats.backspaces,
            "text entry session ended"
        );
        *self = Self::default();
        stats
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn stats(&self) -> EntryStats {
        self.stats
    }

    pub fn typed_character(&mut self, c: char, is_separator: bool) {
        use EntryState::*;
        let is_space = c == ' ';
        let boundary = is_space || is_separator;
        self.state = match self.state {
            InWord if boundary => Start,
            InWord => InWord,
            AcceptedDefault | SpaceAfterPicked if is_space => SpaceAfterAccepted,
            AcceptedDefault | SpaceAfterPicked if is_separator => PunctuationAfterAccepted,
            PickedSuggestion if is_space => SpaceAfterPicked,
            PickedSuggestion if is_separator => Start,
            UndoCommit if boundary => AcceptedDefault,
            Start | SpaceAfterAccepted | PunctuationAfterAccepted if boundary => Start,
            _ => InWord,
        };
    }

    /// A separator replaced `typed` with `corrected`. Nothing happens when
    /// the two are the same word.
    pub fn accepted_default(&mut self, typed: &str, corrected: &str) {
        if typed == corrected {
            return;
        }
        debug!(typed, corrected, "auto-corrected");
        self.stats.auto_corrections += 1;
        self.state = EntryState::AcceptedDefault;
    }

    pub fn accepted_typed(&mut self, _typed: &str) {
        self.stats.typed_words += 1;
        self.state = EntryState::PickedSuggestion;
    }

    pub fn accepted_suggestion(&mut self, typed: &str, picked: &str) {
        debug!(typed, picked, "picked suggestion");
        self.stats.manual_picks += 1;
        self.state = EntryState::PickedSuggestion;
    }

    pub fn backspace(&mut self) {
        self.state = match self.state {
            EntryState::AcceptedDefault | EntryState::PickedSuggestion => {
                self.stats.undone_corrections += 1;
                EntryState::UndoCommit
            }
            EntryState::UndoCommit => EntryState::InWord,
            other => other,
        };
        self.stats.backspaces += 1;
    }

    pub fn reset(&mut self) {
        self.state = EntryState::Start;
    }

    /// Separator removed by the last revert; typing it again right away
    /// does not auto-correct.
    pub fn reverted_separator(&self) -> Option<char> {
        self.reverted_separator
    }

    pub fn set_reverted_separator(&mut self, c: Option<char>) {
        self.reverted_separator = c;
    }

    pub fn clear_reverted_separator(&mut self) {
        self.reverted_separator = None;
    }
}
