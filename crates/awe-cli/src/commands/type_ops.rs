use std::path::Path;

use awe_engine::{load_settings, Engine, Settings};
use awe_session::{EditorInfo, InputMode, InputSession, KeyEvent, TextBuffer};
use serde::Serialize;

/// Editor state after replaying a keystroke script.
#[derive(Debug, Serialize)]
pub struct TypeReport {
    pub text: String,
    pub composing: Option<String>,
    pub candidates: Vec<String>,
    pub best_word: Option<String>,
    pub state: String,
}

/// Map one script character to a key: `<` deletes, `^` toggles shift.
pub fn key_for(c: char) -> KeyEvent {
    match c {
        '<' => KeyEvent::Delete,
        '^' => KeyEvent::Shift,
        c => KeyEvent::char(c),
    }
}

/// Feed `keys` through a fresh session and report what the editor holds.
/// Suggestion updates run after every key, as if the debounce elapsed.
pub fn replay(engine: &Engine, keys: &str, mode: InputMode) -> TypeReport {
    let mut session: InputSession<TextBuffer> = engine.create_session();
    session.start_input(TextBuffer::new(), &EditorInfo::text());
    session.set_input_mode(mode);
    for c in keys.chars() {
        session.handle_key(key_for(c));
        session.flush_suggestions();
    }

    let candidates = session.candidates().words.clone();
    let best_word = session.best_word().map(str::to_string);
    let state = format!("{:?}", session.entry_state());
    let editor = session.editor();
    TypeReport {
        text: editor.map(TextBuffer::text).unwrap_or_default(),
        composing: editor
            .filter(|e| e.composing().is_some())
            .map(TextBuffer::composing_text),
        candidates,
        best_word,
        state,
    }
}

pub fn type_cmd(
    dict_file: &str,
    keys: &str,
    settings_file: Option<&str>,
    user_dict: Option<&str>,
    table: bool,
    json: bool,
) {
    let settings = match settings_file {
        Some(f) => die!(load_settings(Path::new(f)), "Error loading settings: {}"),
        None => Settings::default(),
    };
    let engine = die!(
        Engine::open(Some(Path::new(dict_file)), user_dict.map(Path::new), settings),
        "Error opening engine: {}"
    );
    let mode = if table { InputMode::Table } else { InputMode::Latin };
    let report = replay(&engine, keys, mode);

    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "Error encoding JSON: {}")
        );
        return;
    }
    println!("text:       {:?}", report.text);
    if let Some(composing) = &report.composing {
        println!("composing:  {composing:?}");
    }
    println!("state:      {}", report.state);
    if report.candidates.is_empty() {
        println!("candidates: (none)");
    } else {
        println!("candidates:");
        for (i, word) in report.candidates.iter().enumerate() {
            let marker = if report.best_word.as_deref() == Some(word) { "*" } else { " " };
            println!("  {marker}{i:>2}  {word}");
        }
    }
}
