//! Low-level tree operations and how they move points.
//!
//! Every mutation of a [`Document`] is expressed as an [`Operation`] so the
//! editor can transform its selection alongside the tree and report the
//! exact changes to listeners.

use super::document::Document;
use super::node::{BlockType, MarkName, MarkValue, Node};
use super::path::Path;
use super::selection::{Affinity, Point, Selection};
use crate::util::text::{char_to_byte, split_at_char};

/// A single primitive edit of the document tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Insert `text` into the leaf at `path` at character `offset`
    InsertText {
        path: Path,
        offset: usize,
        text: String,
    },
    /// Remove `text` from the leaf at `path` starting at character `offset`
    RemoveText {
        path: Path,
        offset: usize,
        text: String,
    },
    /// Split the text leaf at `path` at character `position`; the right half
    /// becomes the next sibling and keeps the leaf's marks
    SplitNode { path: Path, position: usize },
    /// Merge the text leaf at `path` into its previous sibling, whose length
    /// was `position`
    MergeNode { path: Path, position: usize },
    /// Remove the node at `path`
    RemoveNode { path: Path, node: Node },
    /// Set (or clear) the block type of the element at `path`
    SetBlockType {
        path: Path,
        block_type: Option<BlockType>,
    },
    /// Set (or remove, with `None`) a mark on the text leaf at `path`
    SetMark {
        path: Path,
        name: MarkName,
        value: Option<MarkValue>,
    },
}

impl Operation {
    /// Apply the operation to `doc`.
    ///
    /// Returns `false` without touching the tree if the operation does not
    /// fit the document (a path that does not resolve, a split on an element).
    pub fn apply_to(&self, doc: &mut Document) -> bool {
        match self {
            Operation::InsertText { path, offset, text } => {
                let Some(leaf) = doc.text_mut(path) else {
                    return false;
                };
                let Some(at) = char_to_byte(&leaf.text, *offset) else {
                    return false;
                };
                leaf.text.insert_str(at, text);
                true
            }
            Operation::RemoveText { path, offset, text } => {
                let Some(leaf) = doc.text_mut(path) else {
                    return false;
                };
                let Some(start) = char_to_byte(&leaf.text, *offset) else {
                    return false;
                };
                let end = start + text.len();
                if leaf.text.get(start..end) != Some(text.as_str()) {
                    return false;
                }
                leaf.text.replace_range(start..end, "");
                true
            }
            Operation::SplitNode { path, position } => {
                let Some(index) = path.last() else {
                    return false;
                };
                let Some(siblings) = doc.siblings_mut(path) else {
                    return false;
                };
                let Some(Node::Text(leaf)) = siblings.get_mut(index) else {
                    return false;
                };
                let Some((left, right)) = split_at_char(&leaf.text, *position) else {
                    return false;
                };
                let mut tail = leaf.clone();
                tail.text = right.to_string();
                leaf.text = left.to_string();
                siblings.insert(index + 1, Node::Text(tail));
                true
            }
            Operation::MergeNode { path, .. } => {
                let Some(index) = path.last().filter(|&i| i > 0) else {
                    return false;
                };
                let Some(siblings) = doc.siblings_mut(path) else {
                    return false;
                };
                let both_text = matches!(
                    (siblings.get(index - 1), siblings.get(index)),
                    (Some(Node::Text(_)), Some(Node::Text(_)))
                );
                if !both_text {
                    return false;
                }
                if let (Node::Text(right), Some(Node::Text(left))) =
                    (siblings.remove(index), siblings.get_mut(index - 1))
                {
                    left.text.push_str(&right.text);
                }
                true
            }
            Operation::RemoveNode { path, .. } => {
                let Some(index) = path.last() else {
                    return false;
                };
                match doc.siblings_mut(path) {
                    Some(siblings) if index < siblings.len() => {
                        siblings.remove(index);
                        true
                    }
                    _ => false,
                }
            }
            Operation::SetBlockType { path, block_type } => match doc.element_mut(path) {
                Some(el) => {
                    el.block_type = block_type.clone();
                    true
                }
                None => false,
            },
            Operation::SetMark { path, name, value } => match doc.text_mut(path) {
                Some(leaf) => {
                    match value {
                        Some(v) => leaf.marks.insert(name.clone(), v.clone()),
                        None => leaf.marks.remove(name),
                    };
                    true
                }
                None => false,
            },
        }
    }
}

impl Point {
    /// Move this point so it addresses the same content after `op`
    pub fn transform(&mut self, op: &Operation, affinity: Affinity) {
        match op {
            Operation::InsertText { path, offset, text } => {
                if &self.path == path
                    && (*offset < self.offset
                        || (*offset == self.offset && affinity == Affinity::Forward))
                {
                    self.offset += text.chars().count();
                }
            }
            Operation::RemoveText { path, offset, text } => {
                if &self.path == path && *offset <= self.offset {
                    self.offset -= (self.offset - offset).min(text.chars().count());
                }
            }
            Operation::SplitNode { path, position } => {
                if &self.path == path {
                    let moves = *position < self.offset
                        || (*position == self.offset && affinity == Affinity::Forward);
                    if moves {
                        self.offset -= position;
                        shift_index(&mut self.path, path.len() - 1, 1);
                    }
                } else if path.ends_before(&self.path) {
                    shift_index(&mut self.path, path.len() - 1, 1);
                }
            }
            Operation::MergeNode { path, position } => {
                if &self.path == path {
                    self.offset += position;
                    shift_index(&mut self.path, path.len() - 1, -1);
                } else if path.ends_before(&self.path) {
                    shift_index(&mut self.path, path.len() - 1, -1);
                }
            }
            Operation::RemoveNode { path, .. } => {
                if path.contains(&self.path) {
                    // The following sibling slides into the removed slot
                    self.path = path.clone();
                    self.offset = 0;
                } else if path.ends_before(&self.path) {
                    shift_index(&mut self.path, path.len() - 1, -1);
                }
            }
            Operation::SetBlockType { .. } | Operation::SetMark { .. } => {}
        }
    }
}

impl Selection {
    /// Transform both ends with inward affinity: the start moves forward and
    /// the end moves backward, so edits at the boundary stay outside.
    pub fn transform(&mut self, op: &Operation) {
        if self.is_collapsed() {
            self.anchor.transform(op, Affinity::Forward);
            self.focus = self.anchor.clone();
            return;
        }
        let (anchor_affinity, focus_affinity) = if self.is_backward() {
            (Affinity::Backward, Affinity::Forward)
        } else {
            (Affinity::Forward, Affinity::Backward)
        };
        self.anchor.transform(op, anchor_affinity);
        self.focus.transform(op, focus_affinity);
    }
}

fn shift_index(path: &mut Path, depth: usize, delta: isize) {
    if let Some(index) = path.indices_mut().get_mut(depth) {
        *index = index.saturating_add_signed(delta);
    }
}
