use tracing::debug;

use super::types::{KeyResponse, SelectionUpdate};
use super::{EditorConnection, EntryState, InputSession};

impl<E: EditorConnection> InputSession<E> {
    /// The host reports that the selection changed.
    ///
    /// Moving the cursor away from the end of the composing region ends the
    /// composition. A cursor move that is not the echo of our own commit
    /// forgets a pending auto-correction revert.
    pub fn update_selection(&mut self, update: SelectionUpdate) -> KeyResponse {
        if !self.host.is_attached() {
            return KeyResponse::not_consumed();
        }
        let at_candidates_end = update
            .candidates
            .is_some_and(|(_, end)| update.new_start == end && update.new_end == end);

        if self.predicting && !self.word.is_empty() && !at_candidates_end {
            debug!(?update, "cursor left the composition");
            self.word.reset();
            self.predicting = false;
            self.timer.cancel();
            self.update_suggestions();
            self.entry.reset();
            self.host.finish_composing_text();
        } else if !self.predicting
            && !self.just_accepted
            && self.entry.state() == EntryState::AcceptedDefault
        {
            self.entry.reset();
        }
        self.just_accepted = false;
        self.update_shift_state();
        self.make_response(true)
    }
}
