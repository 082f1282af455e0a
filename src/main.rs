use anyhow::{anyhow, Result};
use clap::Parser;

use weft::cli::CliArgs;
use weft::keymap::{
    default_modifier_bindings, load_default_keymap, HotkeyDispatcher, HotkeyTable, KeyEvent,
};
use weft::render::Renderer;
use weft::selection_mirror::SelectionMirror;
use weft::{Editor, EditorConfig};

fn main() -> Result<()> {
    weft::tracing::init();

    let script = CliArgs::parse().into_script().map_err(|e| anyhow!(e))?;

    let config = match script.config.as_deref() {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };
    let overlap = script.overlap_policy.unwrap_or(config.overlap_policy);

    let dispatcher = HotkeyDispatcher::new(
        HotkeyTable::with_bindings(load_default_keymap()),
        default_modifier_bindings(),
        overlap,
    );

    let mut editor = Editor::new(script.document);
    let mut mirror = SelectionMirror::attach(&mut editor);
    if let Some(selection) = script.selection {
        editor.select(selection);
        editor.commit();
    }

    for keystroke in script.chords {
        let mut event = KeyEvent::new(keystroke);
        let dispatch = dispatcher.on_key_down(&mut editor, &mut event);
        if dispatch.default_prevented {
            continue;
        }
        // Unhandled printable keys type themselves
        let plain = keystroke.mods.is_empty() || keystroke.mods == weft::keymap::Modifiers::SHIFT;
        match keystroke.key.printable() {
            Some(c) if plain => {
                let c = if keystroke.mods.shift() {
                    c.to_ascii_uppercase()
                } else {
                    c
                };
                editor.insert_text(&c.to_string());
                editor.commit();
            }
            _ => tracing::debug!("{} passed through", keystroke),
        }
    }

    println!("{}", Renderer::new().render_document(editor.document()));
    match mirror.selection() {
        Some(selection) => println!("selection: {}", selection),
        None => println!("selection: none"),
    }

    mirror.detach(&mut editor);
    Ok(())
}
