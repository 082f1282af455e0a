//! Read-only queries over the document at a selection
//!
//! Two match policies are used deliberately:
//! - marks are character-level, so a mark is only active when every covered
//!   leaf carries it ([`MatchPolicy::Universal`])
//! - block types are structural, so one matching enclosing block is enough
//!   ([`MatchPolicy::Existential`])
//!
//! Nothing here mutates the editor.

use crate::editor::Editor;
use crate::model::{BlockType, Document, MarkName, Marks, Node, Path, Selection, Text};

/// How a predicate must hold across the nodes of a range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Every text leaf covered by the range satisfies the predicate
    Universal,
    /// At least one node intersecting the range (ancestors included) does
    Existential,
}

/// Which matching nodes [`nodes`] yields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Every matching node, outermost first
    All,
    /// Only matching nodes with no matching descendant in the range
    Lowest,
}

/// The part of a text leaf covered by a range, in character offsets
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeafSpan<'a> {
    pub path: Path,
    pub text: &'a Text,
    pub start: usize,
    pub end: usize,
}

impl LeafSpan<'_> {
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Whether the subtree at `path` holds a leaf between the range edges.
///
/// Truncating both edges to the node's depth turns this into a
/// lexicographic bounds check.
fn intersects(path: &Path, range: &Selection) -> bool {
    let depth = path.len();
    let start = &range.start().path;
    let end = &range.end().path;
    let lo = &start[..depth.min(start.len())];
    let hi = &end[..depth.min(end.len())];
    lo <= &path[..] && &path[..] <= hi
}

/// Nodes intersecting `range` that satisfy `predicate`, in document order
pub fn nodes<'a, F>(
    doc: &'a Document,
    range: &Selection,
    mode: MatchMode,
    predicate: F,
) -> Vec<(Path, &'a Node)>
where
    F: Fn(&Node) -> bool,
{
    fn walk<'a, F: Fn(&Node) -> bool>(
        children: &'a [Node],
        parent: &Path,
        range: &Selection,
        predicate: &F,
        out: &mut Vec<(Path, &'a Node)>,
    ) {
        for (index, node) in children.iter().enumerate() {
            let path = parent.child(index);
            if !intersects(&path, range) {
                continue;
            }
            if predicate(node) {
                out.push((path.clone(), node));
            }
            walk(node.children(), &path, range, predicate, out);
        }
    }

    let mut found = Vec::new();
    walk(&doc.children, &Path::root(), range, &predicate, &mut found);

    match mode {
        MatchMode::All => found,
        MatchMode::Lowest => {
            let paths: Vec<Path> = found.iter().map(|(p, _)| p.clone()).collect();
            found
                .into_iter()
                .filter(|(path, _)| !paths.iter().any(|other| path.is_ancestor_of(other)))
                .collect()
        }
    }
}

/// First node in document order intersecting `range` that satisfies `predicate`
pub fn find<'a, F>(doc: &'a Document, range: &Selection, predicate: F) -> Option<(Path, &'a Node)>
where
    F: Fn(&Node) -> bool,
{
    nodes(doc, range, MatchMode::All, predicate).into_iter().next()
}

/// Every text leaf intersecting `range` with the covered character span
pub fn leaf_spans<'a>(doc: &'a Document, range: &Selection) -> Vec<LeafSpan<'a>> {
    let start = range.start();
    let end = range.end();
    nodes(doc, range, MatchMode::All, Node::is_text)
        .into_iter()
        .filter_map(|(path, node)| {
            let text = node.as_text()?;
            let len = text.len_chars();
            let from = if path == start.path { start.offset.min(len) } else { 0 };
            let to = if path == end.path { end.offset.min(len) } else { len };
            Some(LeafSpan {
                path,
                text,
                start: from,
                end: to.max(from),
            })
        })
        .collect()
}

/// Leaves the range actually covers.
///
/// For an expanded range, leaves touched only at an edge (selection ending
/// at offset 0 of the next leaf, or starting at the end of the previous
/// one) are left out. A range over no characters covers nothing.
pub fn covered_leaves<'a>(doc: &'a Document, range: &Selection) -> Vec<LeafSpan<'a>> {
    let spans = leaf_spans(doc, range);
    if range.is_collapsed() {
        return spans;
    }
    spans.into_iter().filter(|s| !s.is_empty()).collect()
}

/// Whether `range` spans at least one character
pub fn covers_text(doc: &Document, range: &Selection) -> bool {
    leaf_spans(doc, range).iter().any(|s| !s.is_empty())
}

/// Carets and expanded ranges over no text both act at a single point
fn acts_as_caret(doc: &Document, range: &Selection) -> bool {
    range.is_collapsed() || !covers_text(doc, range)
}

/// Whether `predicate` holds over `range` under `policy`
pub fn matches_at<F>(doc: &Document, range: &Selection, policy: MatchPolicy, predicate: F) -> bool
where
    F: Fn(&Node) -> bool,
{
    match policy {
        MatchPolicy::Existential => !nodes(doc, range, MatchMode::All, predicate).is_empty(),
        MatchPolicy::Universal => {
            let leaves = covered_leaves(doc, range);
            !leaves.is_empty()
                && leaves
                    .iter()
                    .all(|span| doc.node(&span.path).is_some_and(|n| predicate(n)))
        }
    }
}

/// Marks applicable at the selection.
///
/// A caret reports pending marks when set, else the marks of the leaf at
/// the selection start; an expanded selection reports only the marks shared
/// by every covered leaf. An expanded selection over no text is a caret.
pub fn marks(editor: &Editor) -> Option<Marks> {
    let selection = editor.selection()?;
    let doc = editor.document();

    if acts_as_caret(doc, selection) {
        if let Some(pending) = editor.pending_marks() {
            return Some(pending.clone());
        }
        return doc.text(&selection.start().path).map(|t| t.marks.clone());
    }

    let mut leaves = covered_leaves(doc, selection).into_iter();
    let mut uniform = leaves.next()?.text.marks.clone();
    for span in leaves {
        uniform.retain(|name, value| span.text.marks.get(name) == Some(value));
    }
    Some(uniform)
}

/// Whether `mark` is on across the whole selection
pub fn is_mark_active(editor: &Editor, mark: &MarkName) -> bool {
    let Some(selection) = editor.selection() else {
        return false;
    };
    if acts_as_caret(editor.document(), selection) {
        return marks(editor)
            .and_then(|m| m.get(mark).map(|v| v.is_truthy()))
            .unwrap_or(false);
    }
    matches_at(editor.document(), selection, MatchPolicy::Universal, |node| {
        node.as_text().is_some_and(|t| t.has_mark(mark))
    })
}

/// Whether any block enclosing or inside the selection has `block_type`
pub fn is_block_type_active(editor: &Editor, block_type: &BlockType) -> bool {
    let Some(selection) = editor.selection() else {
        return false;
    };
    matches_at(editor.document(), selection, MatchPolicy::Existential, |node| {
        node.as_element()
            .is_some_and(|el| el.effective_type() == block_type)
    })
}
