//! YAML configuration parsing for hotkey tables
//!
//! ```yaml
//! bindings:
//!   - key: "mod+b"
//!     mark: bold
//!   - key: "meta+shift+x"
//!     mark: strikethrough
//!     platform: macos
//! ```

use std::path::Path;

use serde::Deserialize;

use super::binding::HotkeyBinding;
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::model::MarkName;

/// Mark name that removes a chord when merged over a base table
pub const UNBOUND: &str = "unbound";

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub mark: String,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Load hotkey bindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<HotkeyBinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse hotkey bindings from a YAML string.
///
/// Entries for another platform are skipped.
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<HotkeyBinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = current_platform();
    let mut bindings = Vec::with_capacity(config.bindings.len());

    for entry in config.bindings {
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let keystroke = parse_key_string(&entry.key)?;
        let mark = entry.mark.trim();
        if mark.is_empty() {
            return Err(KeymapError::InvalidMark(entry.key));
        }
        if mark.eq_ignore_ascii_case(UNBOUND) {
            bindings.push(HotkeyBinding::unbound(keystroke));
        } else {
            bindings.push(HotkeyBinding::new(keystroke, MarkName::new(mark.to_string())));
        }
    }

    Ok(bindings)
}

/// Parse a key string like "mod+shift+b" into a Keystroke
///
/// `mod` and `cmd` both name the platform primary modifier.
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "" => {
                return Err(KeymapError::InvalidKey(format!(
                    "Empty segment in binding: {}",
                    key_str
                )));
            }
            "mod" | "cmd" | "command" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            key => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                let code = KeyCode::from_name(key)
                    .ok_or_else(|| KeymapError::InvalidKey(format!("Unknown key: {}", key)))?;
                key_part = Some(code);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

fn current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidMark(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidMark(k) => write!(f, "Missing mark for key: {}", k),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let stroke = parse_key_string("a").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('a'));
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_mod_alias() {
        let stroke = parse_key_string("mod+b").unwrap();
        assert_eq!(stroke, Keystroke::cmd('b'));
        assert!(stroke.mods.has_cmd());

        assert_eq!(parse_key_string("cmd+b").unwrap(), stroke);
    }

    #[test]
    fn test_parse_key_with_multiple_modifiers() {
        let stroke = parse_key_string("Ctrl+Shift+U").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('u'));
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_parse_backtick() {
        let stroke = parse_key_string("mod+`").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('`'));
    }

    #[test]
    fn test_parse_rejects_bad_strings() {
        assert!(matches!(parse_key_string("ctrl+"), Err(KeymapError::InvalidKey(_))));
        assert!(matches!(parse_key_string("ctrl+shift"), Err(KeymapError::InvalidKey(_))));
        assert!(matches!(parse_key_string("a+b"), Err(KeymapError::InvalidKey(_))));
        assert!(matches!(parse_key_string("mod+hyper"), Err(KeymapError::InvalidKey(_))));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: "mod+b"
    mark: bold
  - key: "mod+i"
    mark: italic
  - key: "mod+u"
    mark: unbound
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].mark, Some(MarkName::BOLD));
        assert_eq!(bindings[1].mark, Some(MarkName::ITALIC));
        assert!(bindings[2].is_unbound());
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let yaml = r#"
bindings:
  - key: "mod+b"
    mark: bold
  - key: "meta+shift+x"
    mark: strikethrough
    platform: macos
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();

        #[cfg(target_os = "macos")]
        assert_eq!(bindings.len(), 2);

        #[cfg(not(target_os = "macos"))]
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_parse_yaml_errors() {
        assert!(matches!(
            parse_keymap_yaml("bindings: [{ key: 3 }]"),
            Err(KeymapError::ParseError(_))
        ));
        assert!(matches!(
            parse_keymap_yaml("bindings: [{ key: 'mod+b', mark: '' }]"),
            Err(KeymapError::InvalidMark(_))
        ));
    }
}
