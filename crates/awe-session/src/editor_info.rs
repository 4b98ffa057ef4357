//! Description of the focused field, supplied by the host at session start.

/// Broad content class of the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputClass {
    #[default]
    Text,
    Number,
    Phone,
    Datetime,
    /// Raw key events only; no text editing.
    Null,
}

/// Refinement of [`InputClass::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextVariation {
    #[default]
    Normal,
    Password,
    VisiblePassword,
    EmailAddress,
    Uri,
    PersonName,
    ShortMessage,
    Filter,
    WebEditText,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFlags {
    /// The field wants auto-correction even when single-line.
    pub auto_correct: bool,
    pub multi_line: bool,
    pub no_suggestions: bool,
    /// The host supplies its own completions.
    pub auto_complete: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorInfo {
    pub class: InputClass,
    pub variation: TextVariation,
    pub flags: InputFlags,
}

impl EditorInfo {
    /// A plain multi-line text field.
    pub fn text() -> Self {
        Self {
            flags: InputFlags {
                multi_line: true,
                auto_correct: true,
                ..InputFlags::default()
            },
            ..Self::default()
        }
    }

    pub fn with_variation(mut self, variation: TextVariation) -> Self {
        self.variation = variation;
        self
    }

    pub fn with_flags(mut self, flags: InputFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether words typed into this field may be predicted at all.
    pub fn allows_prediction(&self) -> bool {
        if self.class != InputClass::Text {
            return false;
        }
        let hidden = matches!(
            self.variation,
            TextVariation::Password
                | TextVariation::VisiblePassword
                | TextVariation::EmailAddress
                | TextVariation::Uri
                | TextVariation::Filter
        );
        !hidden && !self.flags.no_suggestions && !self.flags.auto_complete
    }

    /// Whether a space follows a manually picked word.
    pub fn allows_auto_space(&self) -> bool {
        !matches!(
            self.variation,
            TextVariation::EmailAddress | TextVariation::PersonName
        )
    }

    /// Single-line fields opt in to auto-correction with a flag.
    pub fn allows_auto_correct(&self) -> bool {
        !self.flags.no_suggestions && (self.flags.multi_line || self.flags.auto_correct)
    }
}
