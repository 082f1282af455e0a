//! Editing commands: toggle marks and block types at the selection
//!
//! Commands mutate through [`Editor::apply`] and normalize afterwards. They
//! do not commit; whoever handles the input event commits once so listeners
//! see a single change per event.

use std::fmt;
use std::str::FromStr;

use crate::editor::Editor;
use crate::model::{BlockType, MarkName, MarkValue, Node, Operation};
use crate::query::{self, covered_leaves, is_block_type_active, is_mark_active, MatchMode};

/// An executable editing command, as bound to keys
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    ToggleMark(MarkName),
    ToggleBlockType(BlockType),
}

impl EditorCommand {
    pub fn execute(&self, editor: &mut Editor) {
        match self {
            EditorCommand::ToggleMark(mark) => toggle_mark(editor, mark),
            EditorCommand::ToggleBlockType(block_type) => toggle_block_type(editor, block_type),
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorCommand::ToggleMark(mark) => write!(f, "toggle_mark:{}", mark),
            EditorCommand::ToggleBlockType(block_type) => write!(f, "toggle_block:{}", block_type),
        }
    }
}

impl FromStr for EditorCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected '<command>:<name>', got: {}", s))?;
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(format!("Missing name in command: {}", s));
        }
        match kind.trim() {
            "toggle_mark" => Ok(EditorCommand::ToggleMark(MarkName::new(arg))),
            "toggle_block" => Ok(EditorCommand::ToggleBlockType(BlockType::new(arg))),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

/// Toggle `mark` over the selection.
///
/// An expanded selection splits leaves at its edges so exactly the selected
/// text changes. A caret, or an expanded selection over no characters, only
/// updates the pending marks for the next insertion. Without a selection
/// this does nothing.
pub fn toggle_mark(editor: &mut Editor, mark: &MarkName) {
    let Some(selection) = editor.selection().cloned() else {
        tracing::debug!(%mark, "toggle_mark without selection, ignoring");
        return;
    };
    let active = is_mark_active(editor, mark);
    tracing::debug!(%mark, active, collapsed = selection.is_collapsed(), "toggle_mark");

    if selection.is_collapsed() || !query::covers_text(editor.document(), &selection) {
        let mut marks = query::marks(editor).unwrap_or_default();
        if active {
            marks.remove(mark);
        } else {
            marks.insert(mark.clone(), MarkValue::Flag(true));
        }
        editor.set_pending_marks(Some(marks));
        return;
    }

    editor.split_at_selection_edges();

    let Some(selection) = editor.selection().cloned() else {
        return;
    };
    let ops: Vec<Operation> = covered_leaves(editor.document(), &selection)
        .into_iter()
        .filter_map(|span| {
            let value = if active { None } else { Some(MarkValue::Flag(true)) };
            if span.text.marks.get(mark) == value.as_ref() {
                return None;
            }
            Some(Operation::SetMark {
                path: span.path,
                name: mark.clone(),
                value,
            })
        })
        .collect();
    for op in ops {
        editor.apply(op);
    }
    editor.normalize();
}

/// Toggle the type of every lowest block under the selection.
///
/// If any enclosing block already has `block_type` the blocks are reset to
/// the default paragraph, otherwise they all become `block_type`. Blocks are
/// never split.
pub fn toggle_block_type(editor: &mut Editor, block_type: &BlockType) {
    let Some(selection) = editor.selection().cloned() else {
        tracing::debug!(%block_type, "toggle_block_type without selection, ignoring");
        return;
    };
    let active = is_block_type_active(editor, block_type);
    let target = if active {
        None
    } else {
        Some(block_type.clone())
    };
    tracing::debug!(%block_type, active, "toggle_block_type");

    let blocks = query::nodes(editor.document(), &selection, MatchMode::Lowest, Node::is_element);
    let ops: Vec<Operation> = blocks
        .into_iter()
        .filter(|(_, node)| node.as_element().is_some_and(|el| el.block_type != target))
        .map(|(path, _)| Operation::SetBlockType {
            path,
            block_type: target.clone(),
        })
        .collect();
    for op in ops {
        editor.apply(op);
    }
}
