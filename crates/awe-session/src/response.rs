use super::types::{CandidateAction, KeyResponse};
use super::{EditorConnection, InputSession};

impl<E: EditorConnection> InputSession<E> {
    /// Response for the current event: the pending strip change, the shift
    /// state and the deadline of any pending suggestion update.
    pub(super) fn make_response(&mut self, consumed: bool) -> KeyResponse {
        let mut resp = if consumed {
            KeyResponse::consumed()
        } else {
            KeyResponse::not_consumed()
        };
        resp.candidates = std::mem::take(&mut self.candidate_action);
        resp.shift = self.shift;
        resp.suggestions_due = self.timer.deadline();
        resp
    }

    pub(super) fn show_candidates(&mut self) {
        self.candidate_action = if self.candidates.is_empty() {
            CandidateAction::Hide
        } else {
            CandidateAction::Show(self.candidates.clone())
        };
    }

    pub(super) fn clear_candidates(&mut self) {
        self.candidates = Default::default();
        self.best_word = None;
        self.candidate_action = CandidateAction::Hide;
    }

    /// Recompute shift from caps lock and the host's caps mode.
    pub(super) fn update_shift_state(&mut self) {
        self.shift.shifted =
            self.shift.caps_lock || (self.config.auto_cap && self.host.cursor_caps_mode());
    }
}
