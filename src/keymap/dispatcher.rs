//! Hotkey dispatcher: turns key-down events into editing commands
//!
//! Two ordered stages run on every event:
//!
//! 1. the hotkey table: an exact chord match toggles the bound mark
//! 2. primary-modifier keys: with Cmd (macOS) or Ctrl held, a key from the
//!    modifier bindings runs its command regardless of other modifiers
//!
//! Both stages can match the same keypress (`mod+b` is in the default table
//! and `b` is a modifier binding). Such overlaps are logged when the
//! dispatcher is built; [`OverlapPolicy`] decides what happens at runtime.

use serde::{Deserialize, Serialize};

use super::event::KeyEvent;
use super::keymap::HotkeyTable;
use super::types::{KeyCode, Keystroke};
use crate::commands::EditorCommand;
use crate::editor::Editor;
use crate::model::{BlockType, MarkName};

/// What to do when stage 2 would repeat a command stage 1 already ran
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Run it once and warn
    #[default]
    SkipDuplicate,
    /// Run it again, so a doubled toggle cancels itself
    FireBoth,
}

/// A stage-2 binding: key pressed with the primary modifier
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifierBinding {
    pub key: KeyCode,
    pub command: EditorCommand,
}

impl ModifierBinding {
    pub fn new(key: KeyCode, command: EditorCommand) -> Self {
        Self { key, command }
    }
}

/// Backtick → code block, `b` → bold
pub fn default_modifier_bindings() -> Vec<ModifierBinding> {
    vec![
        ModifierBinding::new(
            KeyCode::Char('`'),
            EditorCommand::ToggleBlockType(BlockType::CODE),
        ),
        ModifierBinding::new(
            KeyCode::Char('b'),
            EditorCommand::ToggleMark(MarkName::BOLD),
        ),
    ]
}

/// Outcome of one key event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Commands run, in order
    pub executed: Vec<EditorCommand>,
    pub default_prevented: bool,
}

impl Dispatch {
    pub fn is_handled(&self) -> bool {
        !self.executed.is_empty()
    }
}

/// Runs both dispatch stages against an editor
#[derive(Debug, Clone)]
pub struct HotkeyDispatcher {
    table: HotkeyTable,
    modifier_bindings: Vec<ModifierBinding>,
    overlap: OverlapPolicy,
}

impl HotkeyDispatcher {
    pub fn new(
        table: HotkeyTable,
        modifier_bindings: Vec<ModifierBinding>,
        overlap: OverlapPolicy,
    ) -> Self {
        let dispatcher = Self {
            table,
            modifier_bindings,
            overlap,
        };
        for (chord, mark, stage2) in dispatcher.overlaps() {
            tracing::warn!(
                policy = ?dispatcher.overlap,
                "Chord {} toggles {} and also triggers {}",
                chord,
                mark,
                stage2
            );
        }
        dispatcher
    }

    /// Default table and modifier bindings with the given policy
    pub fn with_defaults(overlap: OverlapPolicy) -> Self {
        Self::new(
            HotkeyTable::with_bindings(super::default_bindings()),
            default_modifier_bindings(),
            overlap,
        )
    }

    pub fn table(&self) -> &HotkeyTable {
        &self.table
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap
    }

    /// Table chords that stage 2 also reacts to
    pub fn overlaps(&self) -> Vec<(Keystroke, MarkName, EditorCommand)> {
        self.table
            .bindings()
            .iter()
            .filter(|b| b.keystroke.mods.has_cmd())
            .filter_map(|b| {
                let mark = b.mark.clone()?;
                let stage2 = self.modifier_command(b.keystroke.key)?;
                Some((b.keystroke, mark, stage2.clone()))
            })
            .collect()
    }

    fn modifier_command(&self, key: KeyCode) -> Option<&EditorCommand> {
        self.modifier_bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| &b.command)
    }

    /// Handle a key-down event.
    ///
    /// Runs the matching commands, marks the event's default as prevented
    /// when anything matched, and commits the editor once.
    pub fn on_key_down(&self, editor: &mut Editor, event: &mut KeyEvent) -> Dispatch {
        #[cfg(debug_assertions)]
        {
            self.dispatch_traced(editor, event)
        }
        #[cfg(not(debug_assertions))]
        {
            self.dispatch_inner(editor, event)
        }
    }

    fn dispatch_inner(&self, editor: &mut Editor, event: &mut KeyEvent) -> Dispatch {
        let mut executed = Vec::new();

        // Stage 1: exact chord
        if let Some(mark) = self.table.lookup(&event.keystroke) {
            event.prevent_default();
            let command = EditorCommand::ToggleMark(mark.clone());
            command.execute(editor);
            executed.push(command);
        }

        // Stage 2: primary modifier held
        if event.mods().has_cmd() {
            if let Some(command) = self.modifier_command(event.key()) {
                event.prevent_default();
                if self.overlap == OverlapPolicy::SkipDuplicate && executed.contains(command) {
                    tracing::warn!(
                        "Skipping duplicate {} for {} already run by the hotkey table",
                        command,
                        event.keystroke
                    );
                } else {
                    command.execute(editor);
                    executed.push(command.clone());
                }
            }
        }

        if !executed.is_empty() {
            editor.commit();
        }

        Dispatch {
            executed,
            default_prevented: event.default_prevented,
        }
    }

    #[cfg(debug_assertions)]
    fn dispatch_traced(&self, editor: &mut Editor, event: &mut KeyEvent) -> Dispatch {
        use crate::tracing::SelectionSnapshot;

        let _span = tracing::debug_span!("key_down", chord = %event.keystroke).entered();
        let before = SelectionSnapshot::from_editor(editor);

        let dispatch = self.dispatch_inner(editor, event);

        if dispatch.is_handled() {
            let after = SelectionSnapshot::from_editor(editor);
            if let Some(diff) = before.diff(&after) {
                tracing::debug!(target: "selection", %diff, "state changed");
            }
            tracing::debug!(
                executed = ?dispatch.executed,
                prevented = dispatch.default_prevented,
                "dispatched"
            );
        }
        dispatch
    }
}

impl Default for HotkeyDispatcher {
    fn default() -> Self {
        Self::with_defaults(OverlapPolicy::default())
    }
}
