//! Logging setup and selection diagnostics
//!
//! Configure the console via `RUST_LOG`:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=weft::commands=debug` - command decisions only
//! - `RUST_LOG=selection=debug` - selection diffs around each key event
//!
//! # Log Files
//!
//! Logs are written to `~/.config/weft/logs/weft.log` with daily rotation,
//! always at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editor::Editor;
use crate::model::Selection;

/// Initialize the tracing subscriber with console and file logging
///
/// The console layer defaults to `warn` when `RUST_LOG` is unset.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "weft.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight copy of the editor's selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub selection: Option<Selection>,
    pub pending_marks: usize,
}

impl SelectionSnapshot {
    pub fn from_editor(editor: &Editor) -> Self {
        Self {
            selection: editor.selection().cloned(),
            pending_marks: editor.pending_marks().map_or(0, |m| m.len()),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        match (&self.selection, &other.selection) {
            (Some(before), Some(after)) if before != after => {
                changes.push(format!("{} → {}", before, after));
            }
            (None, Some(after)) => changes.push(format!("selected {}", after)),
            (Some(_), None) => changes.push("deselected".to_string()),
            _ => {}
        }

        if self.pending_marks != other.pending_marks {
            changes.push(format!(
                "pending marks: {} → {}",
                self.pending_marks, other.pending_marks
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
