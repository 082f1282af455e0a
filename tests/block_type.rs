//! toggle_block_type over single, multiple and nested blocks

mod common;

use common::{caret, editor_with_paragraphs, range};
use weft::model::Element;
use weft::{is_block_type_active, toggle_block_type, BlockType, Document, Editor, Node};

fn block_types(editor: &Editor) -> Vec<Option<BlockType>> {
    editor
        .document()
        .children
        .iter()
        .map(|n| n.as_element().unwrap().block_type.clone())
        .collect()
}

// ========================================================================
// Double toggle
// ========================================================================

#[test]
fn test_double_toggle_restores_paragraphs() {
    let mut editor = editor_with_paragraphs(&["one", "two", "three"]);
    editor.select(range((&[0, 0], 1), (&[2, 0], 3)));
    let original = block_types(&editor);

    toggle_block_type(&mut editor, &BlockType::CODE);
    assert_eq!(block_types(&editor), vec![Some(BlockType::CODE); 3]);
    assert!(is_block_type_active(&editor, &BlockType::CODE));

    toggle_block_type(&mut editor, &BlockType::CODE);
    assert_eq!(block_types(&editor), original);
    assert!(!is_block_type_active(&editor, &BlockType::CODE));
}

#[test]
fn test_double_toggle_restores_code_blocks() {
    let mut editor = Editor::new(Document::new(vec![
        Element::new(Some(BlockType::CODE), vec![Node::text("a")]).into(),
    ]));
    editor.select(caret(&[0, 0], 0));

    toggle_block_type(&mut editor, &BlockType::CODE);
    assert_eq!(block_types(&editor), vec![None]);
    toggle_block_type(&mut editor, &BlockType::CODE);
    assert_eq!(block_types(&editor), vec![Some(BlockType::CODE)]);
}

#[test]
fn test_double_toggle_resets_other_types_to_paragraph() {
    let quote = BlockType::new("quote");
    let mut editor = Editor::new(Document::new(vec![
        Element::new(Some(quote), vec![Node::text("a")]).into(),
    ]));
    editor.select(caret(&[0, 0], 0));

    toggle_block_type(&mut editor, &BlockType::CODE);
    toggle_block_type(&mut editor, &BlockType::CODE);
    assert_eq!(block_types(&editor), vec![None]);
}

// ========================================================================
// Activity is existential
// ========================================================================

#[test]
fn test_one_code_block_makes_range_active() {
    let mut editor = Editor::new(Document::new(vec![
        Element::paragraph(vec![Node::text("prose")]).into(),
        Element::new(Some(BlockType::CODE), vec![Node::text("code")]).into(),
    ]));
    editor.select(range((&[0, 0], 0), (&[1, 0], 4)));
    assert!(is_block_type_active(&editor, &BlockType::CODE));

    toggle_block_type(&mut editor, &BlockType::CODE);
    assert_eq!(block_types(&editor), vec![None, None]);
}

#[test]
fn test_blocks_outside_selection_untouched() {
    let mut editor = editor_with_paragraphs(&["one", "two", "three"]);
    editor.select(caret(&[1, 0], 1));

    toggle_block_type(&mut editor, &BlockType::CODE);
    assert_eq!(
        block_types(&editor),
        vec![None, Some(BlockType::CODE), None]
    );
    assert_eq!(editor.document().plain_text(), "one\ntwo\nthree");
}

// ========================================================================
// Nesting
// ========================================================================

#[test]
fn test_only_lowest_blocks_change() {
    let cell = BlockType::new("table-cell");
    let mut editor = Editor::new(Document::new(vec![Element::new(
        Some(cell.clone()),
        vec![
            Element::paragraph(vec![Node::text("a")]).into(),
            Element::paragraph(vec![Node::text("b")]).into(),
        ],
    )
    .into()]));
    editor.select(range((&[0, 0, 0], 0), (&[0, 1, 0], 1)));

    toggle_block_type(&mut editor, &BlockType::CODE);

    let outer = editor.document().children[0].as_element().unwrap();
    assert_eq!(outer.block_type, Some(cell));
    for inner in &outer.children {
        assert_eq!(
            inner.as_element().unwrap().block_type,
            Some(BlockType::CODE)
        );
    }
}
