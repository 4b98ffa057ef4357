use awe_core::settings::Settings;
use awe_core::suggest::CorrectionMode;

use crate::editor_info::EditorInfo;

/// Per-field behaviour, resolved once at session start from the settings
/// and the focused field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub prediction_on: bool,
    pub auto_correct_on: bool,
    pub auto_space: bool,
    pub auto_cap: bool,
    pub correction_mode: CorrectionMode,
    pub show_suggestions: bool,
}

impl SessionConfig {
    pub fn resolve(settings: &Settings, info: &EditorInfo) -> Self {
        let mut correction_mode = settings.correction_mode();
        let mut auto_correct_on = settings.auto_correct();
        if !info.allows_auto_correct() {
            auto_correct_on = false;
            if correction_mode == CorrectionMode::Full {
                correction_mode = CorrectionMode::Basic;
            }
        }
        let prediction_on = info.allows_prediction() && correction_mode != CorrectionMode::None;
        Self {
            prediction_on,
            auto_correct_on: auto_correct_on && prediction_on,
            auto_space: info.allows_auto_space(),
            auto_cap: settings.input.auto_cap,
            correction_mode,
            show_suggestions: prediction_on && settings.show_suggestions(),
        }
    }
}
