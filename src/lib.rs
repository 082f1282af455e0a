//! weft - a rich-text editing core
//!
//! A document tree of elements and marked text leaves, an [`Editor`] that
//! owns it, queries and toggle commands over the selection, and a two-stage
//! hotkey dispatcher that maps key events to those commands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editor;
pub mod keymap;
pub mod model;
pub mod query;
pub mod render;
pub mod selection_mirror;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use commands::{toggle_block_type, toggle_mark, EditorCommand};
pub use config::EditorConfig;
pub use editor::{Change, Editor, ListenerId};
pub use keymap::{Dispatch, HotkeyDispatcher, KeyEvent, OverlapPolicy};
pub use model::{BlockType, Document, MarkName, Node, Point, Selection};
pub use query::{is_block_type_active, is_mark_active, MatchMode, MatchPolicy};
pub use render::Renderer;
pub use selection_mirror::SelectionMirror;
