//! A hotkey table entry: chord to mark name

use super::types::Keystroke;
use crate::model::MarkName;

/// Maps one chord to the mark it toggles.
///
/// A binding without a mark is an unbinding: merged over a base table it
/// removes the chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub keystroke: Keystroke,
    pub mark: Option<MarkName>,
}

impl HotkeyBinding {
    pub fn new(keystroke: Keystroke, mark: MarkName) -> Self {
        Self {
            keystroke,
            mark: Some(mark),
        }
    }

    pub fn unbound(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            mark: None,
        }
    }

    pub fn is_unbound(&self) -> bool {
        self.mark.is_none()
    }
}
