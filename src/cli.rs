//! Command-line argument parsing for the weft demo host
//!
//! Supports:
//! - Seeding the document text
//! - An initial selection
//! - A sequence of chords replayed through the hotkey dispatcher

use std::path::PathBuf;

use clap::Parser;

use crate::keymap::{parse_key_string, Keystroke, OverlapPolicy};
use crate::model::{Document, Element, Node, Selection};

/// Replay hotkeys against a rich-text document and print the result
#[derive(Parser, Debug)]
#[command(name = "weft", version, about = "Rich-text hotkey playground")]
pub struct CliArgs {
    /// Chords to press in order, in keymap syntax (`mod+b`, `ctrl+shift+u`, `x`)
    #[arg(value_name = "CHORDS")]
    pub chords: Vec<String>,

    /// Initial selection, e.g. `0.0:0..0.0:6` or a caret `0.0:3`
    #[arg(short, long, value_name = "RANGE")]
    pub select: Option<String>,

    /// Document text, one paragraph per line
    #[arg(short, long, value_name = "STR")]
    pub text: Option<String>,

    /// Let both hotkey stages fire on an overlapping chord
    #[arg(long)]
    pub fire_both: bool,

    /// Config file to use instead of the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Parsed run description
#[derive(Debug, Clone)]
pub struct Script {
    pub document: Document,
    pub selection: Option<Selection>,
    pub chords: Vec<Keystroke>,
    /// Policy forced from the command line, overriding the config file
    pub overlap_policy: Option<OverlapPolicy>,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Validate and convert parsed CLI args
    pub fn into_script(self) -> Result<Script, String> {
        let document = match self.text.as_deref() {
            Some(text) => document_from_text(text),
            None => Document::initial(),
        };

        let selection = match self.select.as_deref() {
            Some(range) => {
                let selection: Selection = range
                    .parse()
                    .map_err(|e| format!("Invalid --select {}: {}", range, e))?;
                if !document.is_valid_point(&selection.anchor)
                    || !document.is_valid_point(&selection.focus)
                {
                    return Err(format!("Selection {} is outside the document", range));
                }
                Some(selection)
            }
            None => None,
        };

        let chords = self
            .chords
            .iter()
            .map(|chord| parse_key_string(chord).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Script {
            document,
            selection,
            chords,
            overlap_policy: self.fire_both.then_some(OverlapPolicy::FireBoth),
            config: self.config,
        })
    }
}

/// One paragraph per line; an empty string still yields one empty paragraph
fn document_from_text(text: &str) -> Document {
    let mut blocks: Vec<Node> = text
        .lines()
        .map(|line| Element::paragraph(vec![Node::text(line)]).into())
        .collect();
    if blocks.is_empty() {
        blocks.push(Element::paragraph(vec![Node::text("")]).into());
    }
    Document::new(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeyCode;
    use crate::model::{Point, INITIAL_TEXT};

    fn args(chords: &[&str]) -> CliArgs {
        CliArgs {
            chords: chords.iter().map(|c| c.to_string()).collect(),
            select: None,
            text: None,
            fire_both: false,
            config: None,
        }
    }

    #[test]
    fn test_defaults_use_initial_document() {
        let script = args(&[]).into_script().unwrap();
        assert_eq!(script.document.plain_text(), INITIAL_TEXT);
        assert!(script.selection.is_none());
        assert!(script.chords.is_empty());
        assert_eq!(script.overlap_policy, None);
    }

    #[test]
    fn test_selection_and_chords() {
        let mut a = args(&["mod+b", "x"]);
        a.select = Some("0.0:0..0.0:6".to_string());
        let script = a.into_script().unwrap();

        assert_eq!(
            script.selection,
            Some(Selection::new(Point::new([0, 0], 0), Point::new([0, 0], 6)))
        );
        assert_eq!(script.chords[0], Keystroke::cmd('b'));
        assert_eq!(script.chords[1].key, KeyCode::Char('x'));
    }

    #[test]
    fn test_text_splits_paragraphs() {
        let mut a = args(&[]);
        a.text = Some("one\ntwo".to_string());
        let script = a.into_script().unwrap();
        assert_eq!(script.document.children.len(), 2);
    }

    #[test]
    fn test_selection_outside_document_is_rejected() {
        let mut a = args(&[]);
        a.select = Some("3.0:0".to_string());
        assert!(a.into_script().is_err());
    }

    #[test]
    fn test_bad_chord_is_rejected() {
        assert!(args(&["mod+hyper"]).into_script().is_err());
    }

    #[test]
    fn test_fire_both_flag() {
        let mut a = args(&[]);
        a.fire_both = true;
        let script = a.into_script().unwrap();
        assert_eq!(script.overlap_policy, Some(OverlapPolicy::FireBoth));
    }
}
