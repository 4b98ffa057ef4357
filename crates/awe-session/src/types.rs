use std::time::{Duration, Instant};

/// Consecutive deletes after which each delete removes two characters.
pub(crate) const DELETE_ACCELERATE_AT: usize = 20;
/// Deletes further apart than this restart the acceleration count.
pub(crate) const QUICK_PRESS: Duration = Duration::from_millis(200);

/// A key press delivered by the keyboard view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    /// A character key, with the characters of the keys physically around it.
    Char { code: char, nearby: Vec<char> },
    Delete,
    Shift,
    /// Shift long-press.
    CapsLock,
}

impl KeyEvent {
    pub fn char(code: char) -> Self {
        Self::Char {
            code,
            nearby: Vec::new(),
        }
    }

    pub fn with_nearby(code: char, nearby: &[char]) -> Self {
        Self::Char {
            code,
            nearby: nearby.to_vec(),
        }
    }
}

/// Which controller drives the keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Word prediction with auto-correction.
    #[default]
    Latin,
    /// Table lookup: keys are codes, candidates are table entries.
    Table,
}

/// Shift key rendering state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftState {
    pub shifted: bool,
    pub caps_lock: bool,
}

impl ShiftState {
    pub fn is_shifted(&self) -> bool {
        self.shifted || self.caps_lock
    }
}

/// Ranked candidates for the word being composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    pub words: Vec<String>,
    pub typed_word_valid: bool,
    pub correction_available: bool,
}

impl CandidateList {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Candidate strip action: exactly one of three states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CandidateAction {
    /// Leave the strip as-is.
    #[default]
    Keep,
    Show(CandidateList),
    Hide,
}

/// Response from `handle_key` and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResponse {
    pub consumed: bool,
    pub candidates: CandidateAction,
    pub shift: ShiftState,
    /// Set while a suggestion update is pending; call `poll_suggestions`
    /// at or after this instant.
    pub suggestions_due: Option<Instant>,
}

impl KeyResponse {
    pub(crate) fn not_consumed() -> Self {
        Self {
            consumed: false,
            candidates: CandidateAction::Keep,
            shift: ShiftState::default(),
            suggestions_due: None,
        }
    }

    pub(crate) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::not_consumed()
        }
    }
}

/// Selection change reported by the host editor. Offsets are in characters;
/// the candidate range is `None` when nothing is being composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionUpdate {
    pub old_start: usize,
    pub old_end: usize,
    pub new_start: usize,
    pub new_end: usize,
    pub candidates: Option<(usize, usize)>,
}
