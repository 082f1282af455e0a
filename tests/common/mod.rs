//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use weft::keymap::{KeyEvent, Keystroke};
use weft::model::{Element, Text};
use weft::{Document, Editor, MarkName, Node, Point, Selection};

/// Editor over one paragraph holding `leaves`
pub fn editor_with_leaves(leaves: Vec<Node>) -> Editor {
    Editor::new(Document::new(vec![Element::paragraph(leaves).into()]))
}

/// Editor over one paragraph per string
pub fn editor_with_paragraphs(paragraphs: &[&str]) -> Editor {
    Editor::new(Document::new(
        paragraphs
            .iter()
            .map(|p| Element::paragraph(vec![Node::text(*p)]).into())
            .collect(),
    ))
}

/// Initial document with the given selection
pub fn initial_with_selection(selection: Selection) -> Editor {
    let mut editor = Editor::with_initial_value();
    assert!(editor.select(selection));
    editor
}

pub fn bold(text: &str) -> Node {
    Text::new(text).with_mark(MarkName::BOLD).into()
}

pub fn range(anchor: (&[usize], usize), focus: (&[usize], usize)) -> Selection {
    Selection::new(
        Point::new(anchor.0.to_vec(), anchor.1),
        Point::new(focus.0.to_vec(), focus.1),
    )
}

pub fn caret(path: &[usize], offset: usize) -> Selection {
    Selection::collapsed(Point::new(path.to_vec(), offset))
}

/// Leaves of the block at `block` as (text, is_bold)
pub fn leaves(editor: &Editor, block: usize) -> Vec<(String, bool)> {
    editor.document().children[block]
        .children()
        .iter()
        .filter_map(Node::as_text)
        .map(|t| (t.text.clone(), t.has_mark(&MarkName::BOLD)))
        .collect()
}

/// Primary-modifier chord event (Cmd on macOS, Ctrl elsewhere)
pub fn cmd_event(c: char) -> KeyEvent {
    KeyEvent::new(Keystroke::cmd(c))
}
