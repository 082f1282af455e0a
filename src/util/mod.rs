//! Utility modules

pub mod text;

pub use text::{char_to_byte, escape_html, slice_chars, split_at_char};
