//! Integration tests for the keymap system

use std::io::Write;

use super::*;
use crate::model::MarkName;

#[test]
fn test_embedded_yaml_parses() {
    let bindings = parse_keymap_yaml(get_default_keymap_yaml())
        .expect("Embedded keymap.yaml should parse successfully");

    assert_eq!(bindings.len(), 4);
    for mark in [MarkName::BOLD, MarkName::ITALIC, MarkName::UNDERLINE, MarkName::CODE] {
        assert!(
            bindings.iter().any(|b| b.mark.as_ref() == Some(&mark)),
            "Should have a {} binding",
            mark
        );
    }
}

#[test]
fn test_embedded_yaml_matches_hardcoded_defaults() {
    let embedded = parse_keymap_yaml(get_default_keymap_yaml()).unwrap();
    assert_eq!(embedded, default_bindings());
}

#[test]
fn test_table_lookup_bold() {
    let table = HotkeyTable::with_bindings(default_bindings());
    assert_eq!(table.lookup(&Keystroke::cmd('b')), Some(&MarkName::BOLD));
    assert_eq!(table.lookup(&Keystroke::char('b')), None);
}

#[test]
fn test_merge_overrides_and_unbinds() {
    let overrides = parse_keymap_yaml(
        r#"
bindings:
  - key: "mod+u"
    mark: strikethrough
  - key: "mod+i"
    mark: unbound
  - key: "mod+shift+h"
    mark: highlight
"#,
    )
    .unwrap();

    let merged = merge_bindings(default_bindings(), overrides);
    let table = HotkeyTable::with_bindings(merged);

    assert_eq!(table.lookup(&Keystroke::cmd('u')), Some(&MarkName::new("strikethrough")));
    assert_eq!(table.lookup(&Keystroke::cmd('i')), None);
    assert_eq!(
        table.lookup(&Keystroke::char_with_mods('h', Modifiers::cmd() | Modifiers::SHIFT)),
        Some(&MarkName::new("highlight"))
    );
    assert_eq!(table.lookup(&Keystroke::cmd('b')), Some(&MarkName::BOLD));
    assert_eq!(table.len(), 4);
}

#[test]
fn test_layers_skip_missing_and_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    let broken = dir.path().join("broken.yaml");
    std::fs::write(&broken, "bindings: [[[").unwrap();

    let bindings = load_keymap_layers(&[missing.as_path(), broken.as_path()]);
    assert_eq!(bindings, default_bindings());
}

#[test]
fn test_layers_merge_user_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bindings:\n  - key: \"mod+b\"\n    mark: unbound").unwrap();

    let bindings = load_keymap_layers(&[file.path()]);
    let table = HotkeyTable::with_bindings(bindings);
    assert_eq!(table.lookup(&Keystroke::cmd('b')), None);
    assert_eq!(table.lookup(&Keystroke::cmd('i')), Some(&MarkName::ITALIC));
}

#[test]
fn test_load_default_keymap() {
    let bindings = load_default_keymap();
    assert!(!bindings.is_empty(), "Default keymap should not be empty");
}
