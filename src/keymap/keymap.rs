//! The hotkey table: built once at startup, read on every key event

use std::collections::HashMap;

use super::binding::HotkeyBinding;
use super::types::Keystroke;
use crate::model::MarkName;

/// Chord → mark lookup
#[derive(Debug, Clone, Default)]
pub struct HotkeyTable {
    /// Bindings in insertion order
    bindings: Vec<HotkeyBinding>,
    /// Fast lookup (indices into bindings)
    lookup: HashMap<Keystroke, usize>,
}

impl HotkeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from bindings; later bindings win on a shared chord
    pub fn with_bindings(bindings: Vec<HotkeyBinding>) -> Self {
        let mut table = Self::new();
        for binding in bindings {
            table.add_binding(binding);
        }
        table
    }

    /// Add a binding. Unbindings are ignored here; apply them with
    /// [`merge_bindings`](super::merge_bindings) before building the table.
    pub fn add_binding(&mut self, binding: HotkeyBinding) {
        if binding.is_unbound() {
            return;
        }
        match self.lookup.get(&binding.keystroke) {
            Some(&idx) => {
                tracing::warn!(
                    "Chord {} bound twice, replacing {:?} with {:?}",
                    binding.keystroke,
                    self.bindings[idx].mark,
                    binding.mark
                );
                self.bindings[idx] = binding;
            }
            None => {
                self.lookup.insert(binding.keystroke, self.bindings.len());
                self.bindings.push(binding);
            }
        }
    }

    /// Mark bound to exactly this chord
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<&MarkName> {
        let idx = *self.lookup.get(keystroke)?;
        self.bindings.get(idx)?.mark.as_ref()
    }

    pub fn bindings(&self) -> &[HotkeyBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::{KeyCode, Modifiers};

    #[test]
    fn test_lookup_is_exact() {
        let table = HotkeyTable::with_bindings(vec![HotkeyBinding::new(
            Keystroke::new(KeyCode::Char('i'), Modifiers::CTRL),
            MarkName::ITALIC,
        )]);

        assert_eq!(
            table.lookup(&Keystroke::new(KeyCode::Char('i'), Modifiers::CTRL)),
            Some(&MarkName::ITALIC)
        );
        assert_eq!(table.lookup(&Keystroke::char('i')), None);
        assert_eq!(
            table.lookup(&Keystroke::new(KeyCode::Char('i'), Modifiers::META)),
            None
        );
    }

    #[test]
    fn test_duplicate_chord_replaces() {
        let stroke = Keystroke::new(KeyCode::Char('u'), Modifiers::CTRL);
        let table = HotkeyTable::with_bindings(vec![
            HotkeyBinding::new(stroke, MarkName::UNDERLINE),
            HotkeyBinding::new(stroke, MarkName::new("strike")),
        ]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&stroke), Some(&MarkName::new("strike")));
        assert!(table
            .bindings()
            .iter()
            .all(|b| b.mark.as_ref() != Some(&MarkName::UNDERLINE)));
    }

    #[test]
    fn test_unbound_is_not_added() {
        let table = HotkeyTable::with_bindings(vec![HotkeyBinding::unbound(Keystroke::char('z'))]);
        assert!(table.is_empty());
    }
}
