//! The editor aggregate: sole owner of the document and its selection
//!
//! All tree and selection changes pass through [`Editor`]. Mutations are
//! recorded as [`Operation`]s and reported to change listeners when the
//! caller commits, so one key event produces one notification.

use std::fmt;

use crate::model::{Document, Marks, Node, Operation, Path, Point, Selection, Text};
use crate::query;

/// Handle returned by [`Editor::on_change`], used to unregister
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Read-only snapshot handed to change listeners
#[derive(Debug)]
pub struct Change<'a> {
    pub document: &'a Document,
    pub selection: Option<&'a Selection>,
    /// Operations applied since the previous commit
    pub operations: &'a [Operation],
}

type Listener = Box<dyn FnMut(&Change<'_>)>;

pub struct Editor {
    document: Document,
    selection: Option<Selection>,
    /// Marks to apply to the next inserted text (collapsed selections only)
    marks: Option<Marks>,
    operations: Vec<Operation>,
    dirty: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: None,
            marks: None,
            operations: Vec::new(),
            dirty: false,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Editor seeded with [`Document::initial`]
    pub fn with_initial_value() -> Self {
        Self::new(Document::initial())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Marks pending for the next insertion, if any were toggled at a caret
    pub fn pending_marks(&self) -> Option<&Marks> {
        self.marks.as_ref()
    }

    /// Replace the selection. Points that do not resolve are rejected.
    ///
    /// A selection change discards pending marks.
    pub fn select(&mut self, selection: Selection) -> bool {
        if !self.document.is_valid_point(&selection.anchor)
            || !self.document.is_valid_point(&selection.focus)
        {
            tracing::warn!("Ignoring selection {} that does not resolve", selection);
            return false;
        }
        if self.selection.as_ref() != Some(&selection) {
            self.selection = Some(selection);
            self.marks = None;
            self.dirty = true;
        }
        true
    }

    /// Clear the selection (editor lost focus)
    pub fn deselect(&mut self) {
        if self.selection.take().is_some() {
            self.marks = None;
            self.dirty = true;
        }
    }

    pub(crate) fn set_pending_marks(&mut self, marks: Option<Marks>) {
        if self.marks != marks {
            self.marks = marks;
            self.dirty = true;
        }
    }

    /// Apply one operation: mutate the tree, carry the selection across it,
    /// and record it for the next change notification.
    pub fn apply(&mut self, op: Operation) -> bool {
        if !op.apply_to(&mut self.document) {
            tracing::warn!("Skipping operation that does not fit the document: {:?}", op);
            return false;
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.transform(&op);
        }
        tracing::trace!(?op, "applied");
        self.operations.push(op);
        self.dirty = true;
        true
    }

    /// Split the leaves under the selection boundaries so the selection
    /// starts and ends exactly on leaf edges.
    pub(crate) fn split_at_selection_edges(&mut self) {
        let Some(end) = self.selection.as_ref().map(|s| s.end().clone()) else {
            return;
        };
        self.split_leaf_at(&end);
        if let Some(start) = self.selection.as_ref().map(|s| s.start().clone()) {
            self.split_leaf_at(&start);
        }
    }

    fn split_leaf_at(&mut self, point: &Point) {
        let len = self.document.text(&point.path).map(Text::len_chars);
        if matches!(len, Some(len) if point.offset > 0 && point.offset < len) {
            self.apply(Operation::SplitNode {
                path: point.path.clone(),
                position: point.offset,
            });
        }
    }

    /// Merge adjacent leaves with equal marks and drop empty leaves that
    /// have a sibling, repeating until the tree is stable.
    pub fn normalize(&mut self) {
        while let Some(op) = self.next_normalization() {
            if !self.apply(op) {
                break;
            }
        }
    }

    fn next_normalization(&self) -> Option<Operation> {
        for (path, node) in self.document.descendants() {
            let Node::Element(el) = node else {
                continue;
            };
            for (index, pair) in el.children.windows(2).enumerate() {
                let (Node::Text(prev), Node::Text(cur)) = (&pair[0], &pair[1]) else {
                    continue;
                };
                // An empty leaf folds into its neighbour whatever its marks
                if prev.marks == cur.marks || cur.is_empty() {
                    return Some(Operation::MergeNode {
                        path: path.child(index + 1),
                        position: prev.len_chars(),
                    });
                }
                if prev.is_empty() {
                    return Some(Operation::RemoveNode {
                        path: path.child(index),
                        node: pair[0].clone(),
                    });
                }
            }
        }
        None
    }

    /// Insert text at the selection, replacing selected text first.
    ///
    /// Pending marks apply to the inserted text. Deleting across blocks
    /// removes the covered text but does not merge the blocks.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() || self.selection.is_none() {
            return;
        }
        let pending = self.marks.take();
        self.delete_selected_text();

        let Some(point) = self.selection.as_ref().map(|s| s.anchor.clone()) else {
            return;
        };
        let Some(leaf_marks) = self.document.text(&point.path).map(|t| t.marks.clone()) else {
            return;
        };
        if !self.apply(Operation::InsertText {
            path: point.path.clone(),
            offset: point.offset,
            text: text.to_string(),
        }) {
            return;
        }

        if let Some(marks) = pending.filter(|m| *m != leaf_marks) {
            let inserted = text.chars().count();
            let mut target = point.path.clone();
            if point.offset > 0 {
                self.apply(Operation::SplitNode {
                    path: target.clone(),
                    position: point.offset,
                });
                target = target.next().unwrap_or(target);
            }
            let len = self.document.text(&target).map_or(0, Text::len_chars);
            if inserted < len {
                self.apply(Operation::SplitNode {
                    path: target.clone(),
                    position: inserted,
                });
            }
            self.replace_marks(&target, &marks);
            self.selection = Some(Selection::collapsed(Point::new(target, inserted)));
        }
        self.normalize();
    }

    /// Remove the selected text from every covered leaf and collapse the
    /// selection to its start.
    fn delete_selected_text(&mut self) {
        let Some(selection) = self.selection.clone().filter(Selection::is_expanded) else {
            return;
        };
        let removals: Vec<Operation> = query::leaf_spans(&self.document, &selection)
            .into_iter()
            .filter(|span| span.start < span.end)
            .filter_map(|span| {
                let removed = crate::util::slice_chars(&span.text.text, span.start, span.end)?;
                Some(Operation::RemoveText {
                    path: span.path,
                    offset: span.start,
                    text: removed.to_string(),
                })
            })
            .collect();
        for op in removals.into_iter().rev() {
            self.apply(op);
        }
        if let Some(selection) = self.selection.as_mut() {
            selection.collapse_to_start();
        }
        self.normalize();
    }

    fn replace_marks(&mut self, path: &Path, marks: &Marks) {
        let Some(current) = self.document.text(path).map(|t| t.marks.clone()) else {
            return;
        };
        for name in current.keys().filter(|name| !marks.contains_key(*name)) {
            self.apply(Operation::SetMark {
                path: path.clone(),
                name: name.clone(),
                value: None,
            });
        }
        for (name, value) in marks {
            if current.get(name) != Some(value) {
                self.apply(Operation::SetMark {
                    path: path.clone(),
                    name: name.clone(),
                    value: Some(value.clone()),
                });
            }
        }
    }

    /// Register a listener called on every commit that carries a change
    pub fn on_change(&mut self, listener: impl FnMut(&Change<'_>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Notify listeners of everything applied since the last commit.
    ///
    /// Returns `false` (and notifies nobody) when nothing changed.
    pub fn commit(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        debug_assert!(self
            .selection
            .as_ref()
            .map_or(true, |s| self.document.is_valid_point(&s.anchor)
                && self.document.is_valid_point(&s.focus)));

        let change = Change {
            document: &self.document,
            selection: self.selection.as_ref(),
            operations: &self.operations,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
        tracing::debug!(
            operations = self.operations.len(),
            listeners = self.listeners.len(),
            "committed change"
        );
        self.operations.clear();
        self.dirty = false;
        true
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_initial_value()
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("document", &self.document)
            .field("selection", &self.selection)
            .field("marks", &self.marks)
            .field("pending_operations", &self.operations.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Element, MarkName, MarkValue};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn editor_with(leaves: Vec<Node>) -> Editor {
        Editor::new(Document::new(vec![Element::paragraph(leaves).into()]))
    }

    #[test]
    fn test_select_rejects_dangling_points() {
        let mut editor = Editor::with_initial_value();
        assert!(!editor.select(Selection::collapsed(Point::new([3, 0], 0))));
        assert!(editor.selection().is_none());
        assert!(editor.select(Selection::collapsed(Point::new([0, 0], 4))));
    }

    #[test]
    fn test_normalize_merges_equal_marks() {
        let mut editor = editor_with(vec![Node::text("ab"), Node::text("cd")]);
        editor.select(Selection::collapsed(Point::new([0, 1], 1)));
        editor.normalize();

        assert_eq!(editor.document().children[0].children().len(), 1);
        assert_eq!(editor.selection().unwrap().anchor, Point::new([0, 0], 3));
    }

    #[test]
    fn test_normalize_keeps_different_marks() {
        let mut editor = editor_with(vec![
            Text::new("ab").with_mark(MarkName::BOLD).into(),
            Node::text("cd"),
        ]);
        editor.normalize();
        assert_eq!(editor.document().children[0].children().len(), 2);
    }

    #[test]
    fn test_normalize_drops_empty_leaf() {
        let mut editor = editor_with(vec![
            Node::text(""),
            Text::new("cd").with_mark(MarkName::BOLD).into(),
        ]);
        editor.normalize();
        let leaves = editor.document().children[0].children();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].string(), "cd");
    }

    #[test]
    fn test_commit_notifies_once_and_only_when_dirty() {
        let mut editor = Editor::with_initial_value();
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        editor.on_change(move |_| *seen.borrow_mut() += 1);

        assert!(!editor.commit());
        editor.select(Selection::collapsed(Point::new([0, 0], 0)));
        assert!(editor.commit());
        assert!(!editor.commit());
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_removed_listener_is_not_called() {
        let mut editor = Editor::with_initial_value();
        let calls = Rc::new(RefCell::new(0));
        let seen = Rc::clone(&calls);
        let id = editor.on_change(move |_| *seen.borrow_mut() += 1);

        assert!(editor.remove_listener(id));
        assert!(!editor.remove_listener(id));
        editor.select(Selection::collapsed(Point::new([0, 0], 0)));
        editor.commit();
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_insert_text_at_caret() {
        let mut editor = editor_with(vec![Node::text("held")]);
        editor.select(Selection::collapsed(Point::new([0, 0], 3)));
        editor.insert_text("lo worl");
        assert_eq!(editor.document().plain_text(), "hello world");
        assert_eq!(editor.selection().unwrap().anchor, Point::new([0, 0], 10));
    }

    #[test]
    fn test_insert_text_replaces_selection() {
        let mut editor = editor_with(vec![Node::text("hello world")]);
        editor.select(Selection::new(Point::new([0, 0], 6), Point::new([0, 0], 11)));
        editor.insert_text("there");
        assert_eq!(editor.document().plain_text(), "hello there");
    }

    #[test]
    fn test_insert_text_with_pending_marks_creates_marked_leaf() {
        let mut editor = editor_with(vec![Node::text("ab")]);
        editor.select(Selection::collapsed(Point::new([0, 0], 1)));
        let mut marks = Marks::new();
        marks.insert(MarkName::BOLD, MarkValue::Flag(true));
        editor.set_pending_marks(Some(marks));

        editor.insert_text("X");

        let leaves = editor.document().children[0].children();
        assert_eq!(leaves.len(), 3);
        let middle = leaves[1].as_text().unwrap();
        assert_eq!(middle.text, "X");
        assert!(middle.has_mark(&MarkName::BOLD));
        assert_eq!(editor.selection().unwrap().anchor, Point::new([0, 1], 1));
        assert!(editor.pending_marks().is_none());
    }
}
