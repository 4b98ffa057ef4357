use std::time::Instant;

use awe_core::suggest::CorrectionMode;
use tracing::{debug, debug_span};

use super::types::{CandidateAction, CandidateList, InputMode, KeyResponse};
use super::{EditorConnection, InputSession};

impl<E: EditorConnection> InputSession<E> {
    /// Run the pending suggestion update if it is due at `now`.
    pub fn poll_suggestions(&mut self, now: Instant) -> Option<KeyResponse> {
        if !self.timer.take_due(now) {
            return None;
        }
        self.update_suggestions();
        Some(self.make_response(true))
    }

    /// Run the pending suggestion update right away, if there is one.
    pub fn flush_suggestions(&mut self) -> Option<KeyResponse> {
        if !self.timer.take() {
            return None;
        }
        self.update_suggestions();
        Some(self.make_response(true))
    }

    /// Replace any pending update with one due after the debounce delay.
    pub(super) fn post_update_suggestions(&mut self, now: Instant) {
        self.timer.schedule(now);
    }

    pub(super) fn update_suggestions(&mut self) {
        match self.mode {
            InputMode::Latin => self.update_latin_suggestions(),
            InputMode::Table => self.update_table_suggestions(),
        }
    }

    fn update_latin_suggestions(&mut self) {
        if !self.predicting || !self.config.prediction_on {
            self.clear_candidates();
            return;
        }
        let _span = debug_span!("update_suggestions", typed = self.word.typed_word()).entered();
        let words = self.suggest.get_suggestions(&self.word);
        let typed = self.word.typed_word();
        let typed_valid = self.suggest.is_valid_word(typed);
        let mut correction = self.suggest.has_minimal_correction();
        if self.config.correction_mode == CorrectionMode::Full {
            correction |= typed_valid;
        }
        correction &= !self.word.is_mostly_caps();

        self.best_word = if words.is_empty() {
            None
        } else if correction && !typed_valid && words.len() > 1 {
            Some(words[1].clone())
        } else {
            Some(typed.to_string())
        };
        debug!(count = words.len(), best = ?self.best_word, correction, typed_valid);

        self.candidates = CandidateList {
            words,
            typed_word_valid: typed_valid,
            correction_available: correction,
        };
        if self.config.show_suggestions {
            self.show_candidates();
        } else {
            self.candidate_action = CandidateAction::Hide;
        }
    }
}
