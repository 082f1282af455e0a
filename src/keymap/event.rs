//! Keyboard boundary: the key event handed to the dispatcher

use super::types::{KeyCode, Keystroke, Modifiers};

/// A key-down event with a preventable default action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub keystroke: Keystroke,
    pub default_prevented: bool,
}

impl KeyEvent {
    pub fn new(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            default_prevented: false,
        }
    }

    /// Build from a host event: the logical key value (`b`, a backtick,
    /// `Enter`, `ArrowUp`) plus modifier flags.
    ///
    /// Keys with no [`KeyCode`] (bare modifier presses, media keys) yield
    /// `None`; the host lets those pass through.
    pub fn from_native(key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Option<Self> {
        let code = if key.chars().count() == 1 {
            key.chars().next().map(KeyCode::char)?
        } else {
            KeyCode::from_name(&key.to_lowercase())?
        };
        Some(Self::new(Keystroke::new(
            code,
            Modifiers::new(ctrl, shift, alt, meta),
        )))
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn key(&self) -> KeyCode {
        self.keystroke.key
    }

    pub fn mods(&self) -> Modifiers {
        self.keystroke.mods
    }
}

impl From<Keystroke> for KeyEvent {
    fn from(keystroke: Keystroke) -> Self {
        Self::new(keystroke)
    }
}
