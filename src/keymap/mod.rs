//! Hotkeys: chord parsing, the hotkey table and the key-down dispatcher
//!
//! # Architecture
//!
//! ```text
//! host key event → KeyEvent → HotkeyDispatcher::on_key_down()
//!                               ├─ stage 1: HotkeyTable::lookup() → toggle_mark
//!                               └─ stage 2: primary modifier + key → EditorCommand
//! ```
//!
//! # Loading
//!
//! ```ignore
//! // Embedded defaults merged with ./keymap.yaml and the user keymap
//! let table = HotkeyTable::with_bindings(load_default_keymap());
//! let overlap = config.overlap_policy;
//! let dispatcher = HotkeyDispatcher::new(table, default_modifier_bindings(), overlap);
//! ```

mod binding;
mod config;
mod defaults;
mod dispatcher;
mod event;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::HotkeyBinding;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError, UNBOUND};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_layers,
    merge_bindings,
};
pub use dispatcher::{
    default_modifier_bindings, Dispatch, HotkeyDispatcher, ModifierBinding, OverlapPolicy,
};
pub use event::KeyEvent;
pub use keymap::HotkeyTable;
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
