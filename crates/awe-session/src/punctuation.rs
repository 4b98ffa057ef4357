use awe_core::suggest::CorrectionMode;
use tracing::debug;

use super::{EditorConnection, InputSession};

impl<E: EditorConnection> InputSession<E> {
    /// "word ." becomes "word. " when punctuation follows an accepted word.
    pub(super) fn swap_punctuation_and_space(&mut self) {
        let last_two: Vec<char> = self.host.text_before_cursor(2).chars().collect();
        let &[' ', punct] = last_two.as_slice() else {
            return;
        };
        if !self.is_sentence_separator(punct) {
            return;
        }
        self.batch(|s| {
            s.host.delete_before(2);
            s.host.commit_text(&format!("{punct} "));
        });
        debug!(%punct, "swapped punctuation and space");
        self.update_shift_state();
    }

    /// Two spaces after a letter or digit become ". ".
    pub(super) fn double_space(&mut self) {
        if self.config.correction_mode == CorrectionMode::None {
            return;
        }
        let last_three: Vec<char> = self.host.text_before_cursor(3).chars().collect();
        let &[c, ' ', ' '] = last_three.as_slice() else {
            return;
        };
        if !c.is_alphanumeric() {
            return;
        }
        self.batch(|s| {
            s.host.delete_before(2);
            s.host.commit_text(". ");
        });
        debug!("double space to period");
        self.update_shift_state();
    }
}
