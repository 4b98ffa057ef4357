mod selection;

use std::sync::Arc;

use awe_core::dict::{AutoDictionary, Dictionary, FrequencyDictionary};
use awe_core::settings::Settings;
use awe_core::user_dict::UserDictionary;

use super::types::{KeyEvent, KeyResponse};
use super::{EditorInfo, InputSession, TextBuffer};

pub(super) fn make_test_dict() -> Arc<FrequencyDictionary> {
    let dict = FrequencyDictionary::new();
    for (word, freq) in [
        ("the", 250),
        ("there", 200),
        ("they", 180),
        ("then", 150),
        ("hello", 200),
        ("help", 150),
        ("world", 180),
        ("word", 120),
        ("was", 200),
        ("is", 220),
        ("it", 210),
        ("and", 240),
        ("don't", 90),
    ] {
        dict.add_word(word, freq);
    }
    Arc::new(dict)
}

/// Default settings without auto-capitalization, so tests type lowercase.
pub(super) fn test_settings() -> Settings {
    let mut s = Settings::default();
    s.input.auto_cap = false;
    s
}

pub(super) fn make_session_with(
    main: Option<Arc<dyn Dictionary>>,
    settings: Settings,
    info: &EditorInfo,
) -> InputSession<TextBuffer> {
    let user = Arc::new(UserDictionary::new());
    let auto = Arc::new(AutoDictionary::new(
        settings.learning_policy(),
        Some(user.clone()),
    ));
    let mut session = InputSession::new(main, Some(user), auto, settings);
    session.start_input(TextBuffer::new(), info);
    session
}

pub(super) fn make_session() -> InputSession<TextBuffer> {
    make_session_with(Some(make_test_dict()), test_settings(), &EditorInfo::text())
}

// Helper: simulate typing; '<' is backspace. Pending suggestion updates run
// after every key, as if the debounce timer fired.
pub(super) fn type_string(session: &mut InputSession<TextBuffer>, s: &str) -> Vec<KeyResponse> {
    let mut responses = Vec::new();
    for ch in s.chars() {
        let event = if ch == '<' {
            KeyEvent::Delete
        } else {
            KeyEvent::char(ch)
        };
        let resp = session.handle_key(event);
        responses.push(session.flush_suggestions().unwrap_or(resp));
    }
    responses
}

pub(super) fn text(session: &InputSession<TextBuffer>) -> String {
    session.editor().map(TextBuffer::text).unwrap_or_default()
}

pub(super) fn composing(session: &InputSession<TextBuffer>) -> String {
    session
        .editor()
        .map(TextBuffer::composing_text)
        .unwrap_or_default()
}
