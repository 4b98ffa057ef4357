use std::time::Instant;

use tracing::debug_span;

use super::types::{InputMode, KeyEvent, KeyResponse, DELETE_ACCELERATE_AT, QUICK_PRESS};
use super::{EditorConnection, EntryState, InputSession};

impl<E: EditorConnection> InputSession<E> {
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        self.handle_key_at(event, Instant::now())
    }

    /// Process one key event that arrived at `now`.
    pub fn handle_key_at(&mut self, event: KeyEvent, now: Instant) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event, mode = ?self.mode).entered();
        if !self.host.is_attached() {
            return KeyResponse::not_consumed();
        }

        let quick = self
            .last_key_time
            .is_some_and(|t| now.saturating_duration_since(t) <= QUICK_PRESS);
        if event == KeyEvent::Delete {
            self.delete_count = if quick { self.delete_count + 1 } else { 1 };
        } else {
            self.delete_count = 0;
        }
        self.last_key_time = Some(now);

        match event {
            KeyEvent::Shift => self.handle_shift(),
            KeyEvent::CapsLock => self.handle_caps_lock(),
            event if self.mode == InputMode::Table => self.handle_table_key(event, now),
            KeyEvent::Delete => self.handle_backspace(now),
            KeyEvent::Char { code, nearby } => {
                if self.is_word_separator(code) {
                    self.handle_separator(code);
                } else {
                    self.handle_character(code, &nearby, now);
                }
                self.entry.clear_reverted_separator();
            }
        }
        self.make_response(true)
    }

    /// Commit `text` verbatim, committing any composition first.
    pub fn handle_text(&mut self, text: &str) -> KeyResponse {
        if !self.host.is_attached() {
            return KeyResponse::not_consumed();
        }
        self.batch(|s| {
            if s.predicting {
                s.commit_typed();
            }
            s.host.commit_text(text);
        });
        self.entry.reset();
        self.entry.clear_reverted_separator();
        self.just_accepted = true;
        self.update_shift_state();
        self.make_response(true)
    }

    fn handle_character(&mut self, code: char, nearby: &[char], now: Instant) {
        if code.is_alphabetic()
            && self.config.prediction_on
            && !self.predicting
            && !self.is_cursor_touching_word()
        {
            self.predicting = true;
            self.word.reset();
        }

        let shifted = self.shift.is_shifted();
        let code = if shifted {
            code.to_uppercase().next().unwrap_or(code)
        } else {
            code
        };
        if self.predicting {
            if shifted && self.word.is_empty() {
                self.word.set_capitalized(true);
            }
            self.word.add(code, nearby);
            self.host.set_composing_text(self.word.typed_word());
            self.post_update_suggestions(now);
        } else {
            self.host.send_char(code);
        }
        self.update_shift_state();
        self.entry.typed_character(code, false);
    }

    fn handle_separator(&mut self, code: char) {
        let accepted = self.batch(|s| {
            let mut accepted = None;
            if s.predicting {
                let eligible = s.config.auto_correct_on
                    && code != '\''
                    && s.entry.reverted_separator() != Some(code);
                if eligible {
                    accepted = s.pick_default_suggestion();
                } else {
                    s.commit_typed();
                }
            }
            s.host.send_char(code);
            s.entry.typed_character(code, true);
            if s.entry.state() == EntryState::PunctuationAfterAccepted && code != '\n' {
                s.swap_punctuation_and_space();
            } else if s.config.prediction_on && code == ' ' {
                s.double_space();
            }
            accepted
        });

        if let Some(best) = accepted {
            self.entry.accepted_default(self.word.typed_word(), &best);
        }
        self.update_shift_state();
    }

    fn handle_backspace(&mut self, now: Instant) {
        let mut delete_char = false;
        if self.predicting {
            if self.word.is_empty() {
                self.host.send_delete();
            } else {
                self.word.delete_last();
                self.host.set_composing_text(self.word.typed_word());
                if self.word.is_empty() {
                    self.predicting = false;
                }
                self.post_update_suggestions(now);
            }
        } else {
            delete_char = true;
        }
        self.update_shift_state();

        self.entry.backspace();
        if self.entry.state() == EntryState::UndoCommit {
            self.revert_last_word(delete_char, now);
            self.update_shift_state();
            return;
        }
        if delete_char {
            self.host.send_delete();
            if self.delete_count > DELETE_ACCELERATE_AT {
                self.host.send_delete();
            }
            self.update_shift_state();
        }
        self.entry.clear_reverted_separator();
    }

    fn handle_shift(&mut self) {
        if self.shift.shifted {
            self.shift.caps_lock = !self.shift.caps_lock;
        }
        self.shift.shifted = self.shift.caps_lock || !self.shift.shifted;
    }

    fn handle_caps_lock(&mut self) {
        self.shift.caps_lock = !self.shift.caps_lock;
        self.shift.shifted = self.shift.caps_lock;
    }

    /// A letter directly before or after the cursor.
    fn is_cursor_touching_word(&self) -> bool {
        let touching = |c: Option<char>| c.is_some_and(|c| !self.is_word_separator(c));
        touching(self.host.char_before_cursor()) || touching(self.host.char_after_cursor())
    }
}
