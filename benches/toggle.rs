//! Benchmarks for the toggle commands and dispatch
//!
//! Run with: cargo bench toggle

use weft::keymap::{KeyEvent, Keystroke};
use weft::model::{Element, Text};
use weft::{
    query, toggle_block_type, toggle_mark, Document, Editor, HotkeyDispatcher, MarkName, Node,
    Point, Selection,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

/// `blocks` paragraphs of alternating bold and plain leaves
fn make_document(blocks: usize) -> Document {
    Document::new(
        (0..blocks)
            .map(|_| {
                Element::paragraph(vec![
                    Text::new("The quick ").with_mark(MarkName::BOLD).into(),
                    Node::text("brown fox "),
                    Text::new("jumps over ").with_mark(MarkName::BOLD).into(),
                    Node::text("the lazy dog."),
                ])
                .into()
            })
            .collect(),
    )
}

fn spanning_selection(blocks: usize) -> Selection {
    Selection::new(Point::new([0, 0], 4), Point::new([blocks - 1, 3], 5))
}

#[divan::bench(args = [1, 10, 100, 1000])]
fn toggle_mark_across_blocks(bencher: divan::Bencher, blocks: usize) {
    bencher
        .with_inputs(|| {
            let mut editor = Editor::new(make_document(blocks));
            editor.select(spanning_selection(blocks));
            editor
        })
        .bench_local_values(|mut editor| {
            toggle_mark(&mut editor, &MarkName::ITALIC);
            editor
        });
}

#[divan::bench(args = [1, 10, 100, 1000])]
fn toggle_block_type_across_blocks(bencher: divan::Bencher, blocks: usize) {
    bencher
        .with_inputs(|| {
            let mut editor = Editor::new(make_document(blocks));
            editor.select(spanning_selection(blocks));
            editor
        })
        .bench_local_values(|mut editor| {
            toggle_block_type(&mut editor, &weft::BlockType::CODE);
            editor
        });
}

#[divan::bench(args = [10, 100, 1000])]
fn is_mark_active(bencher: divan::Bencher, blocks: usize) {
    let mut editor = Editor::new(make_document(blocks));
    editor.select(spanning_selection(blocks));
    bencher.bench_local(|| query::is_mark_active(divan::black_box(&editor), &MarkName::BOLD));
}

#[divan::bench]
fn dispatch_unmatched_key(bencher: divan::Bencher) {
    let dispatcher = HotkeyDispatcher::default();
    let mut editor = Editor::with_initial_value();
    editor.select(Selection::collapsed(Point::new([0, 0], 3)));
    bencher.bench_local(|| {
        let mut event = KeyEvent::new(Keystroke::char('x'));
        dispatcher.on_key_down(&mut editor, &mut event)
    });
}
