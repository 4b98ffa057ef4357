//! Table input: keys are codes looked up in the main dictionary and the
//! strip shows the table entries for the typed code.

use std::time::Instant;

use tracing::debug;

use super::types::{CandidateList, KeyEvent, DELETE_ACCELERATE_AT};
use super::{EditorConnection, InputSession};

impl<E: EditorConnection> InputSession<E> {
    pub(super) fn handle_table_key(&mut self, event: KeyEvent, now: Instant) {
        match event {
            KeyEvent::Delete => {
                if self.word.is_empty() {
                    self.host.send_delete();
                    if self.delete_count > DELETE_ACCELERATE_AT {
                        self.host.send_delete();
                    }
                    return;
                }
                self.word.delete_last();
                self.host.set_composing_text(self.word.typed_word());
                if self.word.is_empty() {
                    self.predicting = false;
                    self.timer.cancel();
                    self.clear_candidates();
                } else {
                    self.post_update_suggestions(now);
                }
            }
            KeyEvent::Char { code: ' ', .. } if self.predicting => {
                if self.timer.take() {
                    self.update_suggestions();
                }
                match self.candidates.words.first().cloned() {
                    Some(best) => self.commit_table_candidate(&best),
                    None => {
                        // Unknown code: drop it.
                        self.host.commit_text("");
                        self.end_table_composition();
                    }
                }
            }
            KeyEvent::Char { code: ' ', .. } => self.host.send_char(' '),
            KeyEvent::Char { code, nearby } => {
                self.predicting = true;
                self.word.add(code, &nearby);
                self.host.set_composing_text(self.word.typed_word());
                self.post_update_suggestions(now);
            }
            KeyEvent::Shift | KeyEvent::CapsLock => {}
        }
    }

    pub(super) fn commit_table_candidate(&mut self, candidate: &str) {
        debug!(code = self.word.typed_word(), candidate, "table commit");
        self.host.commit_text(candidate);
        self.committed_len = candidate.chars().count();
        self.just_accepted = true;
        self.end_table_composition();
    }

    fn end_table_composition(&mut self) {
        self.predicting = false;
        self.word.reset();
        self.timer.cancel();
        self.clear_candidates();
        self.entry.reset();
    }

    pub(super) fn update_table_suggestions(&mut self) {
        if !self.predicting {
            self.clear_candidates();
            return;
        }
        let words = self.suggest.table_suggestions(&self.word);
        self.best_word = words.first().cloned();
        self.candidates = CandidateList {
            words,
            typed_word_valid: false,
            correction_available: false,
        };
        self.show_candidates();
    }
}
