use std::time::Instant;

use awe_core::dict::Dictionary;
use awe_core::text::capitalize_first;
use tracing::debug;

use super::types::{InputMode, KeyEvent, KeyResponse};
use super::{EditorConnection, InputSession};

impl<E: EditorConnection> InputSession<E> {
    /// Pick the candidate at `index` in the strip.
    pub fn pick_suggestion_manually(&mut self, index: usize) -> KeyResponse {
        if !self.host.is_attached() {
            return KeyResponse::not_consumed();
        }
        let Some(picked) = self.candidates.words.get(index).cloned() else {
            return KeyResponse::not_consumed();
        };
        if self.mode == InputMode::Table {
            self.commit_table_candidate(&picked);
            return self.make_response(true);
        }

        // A lone separator in the strip behaves like its key.
        let mut chars = picked.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if self.is_word_separator(c) {
                return self.handle_key(KeyEvent::char(c));
            }
        }

        let typed = self.word.typed_word().to_string();
        self.batch(|s| {
            s.pick_suggestion(&picked);
            s.entry.accepted_suggestion(&typed, &picked);
            if s.config.auto_space {
                s.host.send_char(' ');
            }
        });
        self.just_accepted = true;
        // Backspace after a manual pick deletes instead of reverting.
        self.entry.typed_character(' ', true);
        self.update_shift_state();
        self.make_response(true)
    }

    /// Commit the best word for the current composition. Returns it when it
    /// was committed; falls back to the typed text when there is none.
    pub(super) fn pick_default_suggestion(&mut self) -> Option<String> {
        if self.timer.take() {
            self.update_suggestions();
        }
        let Some(best) = self.best_word.clone() else {
            self.commit_typed();
            return None;
        };
        self.just_accepted = true;
        self.pick_suggestion(&best);
        Some(best)
    }

    /// Commit `suggestion` in place of the composition, adjusting its case to
    /// the shift state, and learn it.
    pub(super) fn pick_suggestion(&mut self, suggestion: &str) {
        let word = if self.shift.caps_lock {
            suggestion.to_uppercase()
        } else if self.word.is_capitalized() || self.shift.shifted {
            capitalize_first(suggestion)
        } else {
            suggestion.to_string()
        };
        self.host.commit_text(&word);

        if self.auto_dict.is_valid_word(&word) || !self.suggest.is_valid_word(&word) {
            self.auto_dict
                .add_word(&word, self.auto_dict.policy().picked_weight);
        }
        self.predicting = false;
        self.committed_len = word.chars().count();
        self.timer.cancel();
        self.clear_candidates();
        self.update_shift_state();
    }

    /// Commit the composition exactly as typed.
    pub(super) fn commit_typed(&mut self) {
        if !self.predicting {
            return;
        }
        self.predicting = false;
        if !self.word.is_empty() {
            let typed = self.word.typed_word().to_string();
            self.host.commit_text(&typed);
            self.committed_len = typed.chars().count();
            self.entry.accepted_typed(&typed);
            self.auto_dict
                .add_word(&typed, self.auto_dict.policy().typed_weight);
        }
        self.timer.cancel();
        self.clear_candidates();
    }

    /// Undo the last commit: remove the committed word (and the separator
    /// after it when `delete_char`) and compose the typed text again.
    pub(super) fn revert_last_word(&mut self, delete_char: bool, now: Instant) {
        if self.predicting || self.word.is_empty() {
            self.host.send_delete();
            self.entry.clear_reverted_separator();
            return;
        }
        self.predicting = true;
        self.batch(|s| {
            let separator = s.host.char_before_cursor();
            s.entry.set_reverted_separator(separator);
            if delete_char {
                s.host.send_delete();
            }
            let mut to_delete = s.committed_len;
            let left = s.host.text_before_cursor(s.committed_len);
            if left.chars().next().is_some_and(|c| s.is_word_separator(c)) {
                to_delete = to_delete.saturating_sub(1);
            }
            s.host.delete_before(to_delete);
            s.host.set_composing_text(s.word.typed_word());
            s.entry.backspace();
        });
        debug!(typed = self.word.typed_word(), "reverted last word");
        self.post_update_suggestions(now);
    }
}
