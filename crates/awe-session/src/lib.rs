//! Stateful keyboard session: composition, suggestions, commit and revert.
//!
//! `InputSession` owns the editing state for one focused field and turns each
//! key event into edits on the host [`EditorConnection`], returning a
//! [`KeyResponse`] the keyboard view renders (candidate strip, shift state,
//! pending suggestion deadline).

pub mod config;
pub mod editor;
pub mod editor_info;
pub mod scheduler;
pub mod text_entry;
pub(crate) mod types;

mod commit;
mod key_handlers;
mod punctuation;
mod response;
mod selection;
mod suggestions;
mod table;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::{Duration, Instant};

use awe_core::composer::WordComposer;
use awe_core::dict::{AutoDictionary, Dictionary};
use awe_core::settings::Settings;
use awe_core::suggest::Suggest;
use awe_core::user_dict::UserDictionary;
use tracing::debug;

pub use config::SessionConfig;
pub use editor::{EditorConnection, TextBuffer};
pub use editor_info::{EditorInfo, InputClass, InputFlags, TextVariation};
pub use text_entry::{EntryState, EntryStats, TextEntryState};
pub use types::{
    CandidateAction, CandidateList, InputMode, KeyEvent, KeyResponse, SelectionUpdate, ShiftState,
};

use editor::Host;
use scheduler::SuggestionTimer;

/// Editing session for one keyboard, attached to at most one field at a time.
pub struct InputSession<E: EditorConnection> {
    host: Host<E>,
    suggest: Suggest,
    auto_dict: Arc<AutoDictionary>,
    user_dict: Option<Arc<UserDictionary>>,

    settings: Settings,
    /// Replacement settings, applied at the next `start_input`.
    pending_settings: Option<Settings>,
    config: SessionConfig,
    mode: InputMode,

    entry: TextEntryState,
    /// Word being composed. Kept after a commit so that a revert can restore it.
    word: WordComposer,
    predicting: bool,
    /// Length in characters of the last committed word.
    committed_len: usize,
    best_word: Option<String>,
    candidates: CandidateList,
    /// Strip change produced by the current event.
    candidate_action: CandidateAction,
    timer: SuggestionTimer,

    shift: ShiftState,
    delete_count: usize,
    last_key_time: Option<Instant>,
    /// Set when a commit happened since the last selection update.
    just_accepted: bool,
}

impl<E: EditorConnection> InputSession<E> {
    pub fn new(
        main: Option<Arc<dyn Dictionary>>,
        user: Option<Arc<UserDictionary>>,
        auto: Arc<AutoDictionary>,
        settings: Settings,
    ) -> Self {
        let mut suggest = Suggest::new();
        if let Some(main) = main {
            suggest.add_dictionary(main);
        }
        suggest.set_user_dictionary(user.clone().map(|u| u as Arc<dyn Dictionary>));
        suggest.set_auto_dictionary(Some(auto.clone() as Arc<dyn Dictionary>));

        let mut session = Self {
            host: Host::detached(),
            suggest,
            auto_dict: auto,
            user_dict: user,
            settings: Settings::default(),
            pending_settings: None,
            config: SessionConfig::default(),
            mode: InputMode::Latin,
            entry: TextEntryState::new(),
            word: WordComposer::new(),
            predicting: false,
            committed_len: 0,
            best_word: None,
            candidates: CandidateList::default(),
            candidate_action: CandidateAction::Keep,
            timer: SuggestionTimer::new(Duration::ZERO),
            shift: ShiftState::default(),
            delete_count: 0,
            last_key_time: None,
            just_accepted: false,
        };
        session.apply_settings(settings);
        session
    }

    /// Attach to a newly focused field. Any previously attached editor is
    /// dropped; pending settings take effect here.
    pub fn start_input(&mut self, editor: E, info: &EditorInfo) -> KeyResponse {
        if let Some(settings) = self.pending_settings.take() {
            self.apply_settings(settings);
        }
        self.host.attach(editor);
        self.config = SessionConfig::resolve(&self.settings, info);
        self.suggest.set_correction_mode(self.config.correction_mode);
        debug!(config = ?self.config, mode = ?self.mode, "start input");

        self.entry.new_session();
        self.word.reset();
        self.predicting = false;
        self.committed_len = 0;
        self.best_word = None;
        self.candidates = CandidateList::default();
        self.timer.cancel();
        self.shift = ShiftState::default();
        self.delete_count = 0;
        self.last_key_time = None;
        self.just_accepted = false;
        self.update_shift_state();
        self.candidate_action = CandidateAction::Hide;
        self.make_response(true)
    }

    /// Detach from the field, leaving any composing text in place.
    pub fn finish_input(&mut self) -> Option<E> {
        if self.predicting {
            self.host.finish_composing_text();
            self.predicting = false;
        }
        self.timer.cancel();
        self.candidates = CandidateList::default();
        self.entry.end_session();
        self.host.detach()
    }

    /// Replace the settings. They are read at the next `start_input`.
    pub fn set_settings(&mut self, settings: Settings) {
        self.pending_settings = Some(settings);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            self.reset_composition();
            self.mode = mode;
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_predicting(&self) -> bool {
        self.predicting
    }

    pub fn typed_word(&self) -> &str {
        self.word.typed_word()
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    /// Word a separator would commit right now.
    pub fn best_word(&self) -> Option<&str> {
        self.best_word.as_deref()
    }

    pub fn entry_state(&self) -> EntryState {
        self.entry.state()
    }

    pub fn entry_stats(&self) -> EntryStats {
        self.entry.stats()
    }

    pub fn shift_state(&self) -> ShiftState {
        self.shift
    }

    pub fn editor(&self) -> Option<&E> {
        self.host.get()
    }

    pub fn editor_mut(&mut self) -> Option<&mut E> {
        self.host.get_mut()
    }

    pub fn auto_dictionary(&self) -> &Arc<AutoDictionary> {
        &self.auto_dict
    }

    pub fn user_dictionary(&self) -> Option<&Arc<UserDictionary>> {
        self.user_dict.as_ref()
    }

    /// Add `word` to the user dictionary with the explicit-add frequency.
    /// Returns false when there is no user dictionary or the word was
    /// already present.
    pub fn add_word_to_dictionary(&mut self, word: &str) -> bool {
        let Some(user) = &self.user_dict else {
            return false;
        };
        let added = user.add_word(word, self.auto_dict.policy().explicit_add_frequency);
        debug!(word, added, "add word to user dictionary");
        if added && self.predicting {
            self.post_update_suggestions(Instant::now());
        }
        added
    }

    fn apply_settings(&mut self, settings: Settings) {
        self.suggest.set_quick_fixes(
            settings
                .quick_fixes
                .iter()
                .map(|(typo, fix)| (typo.clone(), fix.clone())),
        );
        self.suggest.set_max_suggestions(settings.suggest.max_suggestions);
        self.suggest.set_min_query_len(settings.suggest.min_query_len);
        self.timer
            .set_delay(Duration::from_millis(settings.suggest.debounce_ms));
        self.settings = settings;
    }

    /// Drop the composition without committing it.
    fn reset_composition(&mut self) {
        if self.predicting {
            self.host.finish_composing_text();
        }
        self.predicting = false;
        self.word.reset();
        self.timer.cancel();
        self.entry.reset();
        self.clear_candidates();
    }

    /// Runs `f` inside a host batch edit.
    fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.host.begin_batch_edit();
        let result = f(self);
        self.host.end_batch_edit();
        result
    }

    fn is_word_separator(&self, c: char) -> bool {
        self.settings.is_word_separator(c)
    }

    fn is_sentence_separator(&self, c: char) -> bool {
        self.settings.is_sentence_separator(c)
    }
}
