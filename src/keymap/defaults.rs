//! Default hotkey table
//!
//! The table ships as keymap.yaml at the crate root, embedded at compile
//! time, with a hardcoded fallback should it ever fail to parse.

use std::path::{Path, PathBuf};

use super::binding::HotkeyBinding;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::Keystroke;
use crate::model::MarkName;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. keymap.yaml in the current directory
/// 3. User keymap from [`config_paths::keymap_file`](crate::config_paths::keymap_file)
pub fn load_default_keymap() -> Vec<HotkeyBinding> {
    let mut layers: Vec<PathBuf> = vec![PathBuf::from("keymap.yaml")];
    if let Some(user_path) = crate::config_paths::keymap_file() {
        layers.push(user_path);
    }
    let layers: Vec<&Path> = layers.iter().map(PathBuf::as_path).collect();
    load_keymap_layers(&layers)
}

/// Embedded defaults with each existing file in `layers` merged on top.
///
/// Missing files are skipped; files that fail to load are logged and
/// skipped.
pub fn load_keymap_layers(layers: &[&Path]) -> Vec<HotkeyBinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    for path in layers {
        if !path.exists() {
            continue;
        }
        match load_keymap_file(path) {
            Ok(layer) => {
                tracing::info!(
                    "Merging keymap from {} ({} bindings)",
                    path.display(),
                    layer.len()
                );
                bindings = merge_bindings(bindings, layer);
            }
            Err(e) => {
                tracing::warn!("Failed to load keymap from {}: {}", path.display(), e);
            }
        }
    }

    bindings
}

/// Merge override bindings into base bindings
///
/// - same chord → replaces the base binding
/// - unbound → removes the base binding for that chord
/// - otherwise → appended
pub fn merge_bindings(
    base: Vec<HotkeyBinding>,
    overrides: Vec<HotkeyBinding>,
) -> Vec<HotkeyBinding> {
    let mut result = base;

    for binding in overrides {
        if binding.is_unbound() {
            result.retain(|b| b.keystroke != binding.keystroke);
            continue;
        }

        match result.iter().position(|b| b.keystroke == binding.keystroke) {
            Some(idx) => result[idx] = binding,
            None => result.push(binding),
        }
    }

    result
}

/// Hardcoded default bindings for the current platform
pub fn default_bindings() -> Vec<HotkeyBinding> {
    vec![
        HotkeyBinding::new(Keystroke::cmd('b'), MarkName::BOLD),
        HotkeyBinding::new(Keystroke::cmd('i'), MarkName::ITALIC),
        HotkeyBinding::new(Keystroke::cmd('u'), MarkName::UNDERLINE),
        HotkeyBinding::new(Keystroke::cmd('`'), MarkName::CODE),
    ]
}
