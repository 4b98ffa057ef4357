//! Predictive-text keyboard engine.
//!
//! The [`Engine`] owns the dictionaries shared by every editing session: the
//! read-only main dictionary, the durable user dictionary and the learning
//! auto-dictionary. Sessions created from it handle keys for one field at a
//! time.

pub mod api;
mod trace_init;

pub use api::{load_settings, Engine, EngineError};
pub use awe_core::settings::Settings;
pub use awe_session::{
    CandidateAction, CandidateList, EditorConnection, EditorInfo, InputMode, InputSession,
    KeyEvent, KeyResponse, SelectionUpdate, ShiftState, TextBuffer,
};
pub use trace_init::init_tracing;
