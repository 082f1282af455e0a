//! Character-offset helpers for text leaves
//!
//! Points address text by character (Unicode scalar value) offsets while
//! `String` indexes by bytes; these helpers convert between the two.

/// Byte index of the character at `char_offset`.
///
/// `char_offset == len_chars` maps to the end of the string; anything past
/// the end yields `None`.
pub fn char_to_byte(text: &str, char_offset: usize) -> Option<usize> {
    if char_offset == 0 {
        return Some(0);
    }
    match text.char_indices().nth(char_offset) {
        Some((byte, _)) => Some(byte),
        None if text.chars().count() == char_offset => Some(text.len()),
        None => None,
    }
}

/// Split `text` at a character offset
pub fn split_at_char(text: &str, char_offset: usize) -> Option<(&str, &str)> {
    let byte = char_to_byte(text, char_offset)?;
    Some(text.split_at(byte))
}

/// Substring between two character offsets (`start <= end`)
pub fn slice_chars(text: &str, start: usize, end: usize) -> Option<&str> {
    if start > end {
        return None;
    }
    let from = char_to_byte(text, start)?;
    let to = char_to_byte(text, end)?;
    text.get(from..to)
}

/// Escape text for inclusion in HTML markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte_ascii() {
        assert_eq!(char_to_byte("hello", 0), Some(0));
        assert_eq!(char_to_byte("hello", 3), Some(3));
        assert_eq!(char_to_byte("hello", 5), Some(5));
        assert_eq!(char_to_byte("hello", 6), None);
    }

    #[test]
    fn test_char_to_byte_multibyte() {
        // 'é' is two bytes
        assert_eq!(char_to_byte("héllo", 2), Some(3));
        assert_eq!(char_to_byte("héllo", 5), Some(6));
        assert_eq!(char_to_byte("", 0), Some(0));
    }

    #[test]
    fn test_split_and_slice() {
        assert_eq!(split_at_char("héllo", 2), Some(("hé", "llo")));
        assert_eq!(slice_chars("héllo", 1, 3), Some("él"));
        assert_eq!(slice_chars("héllo", 3, 1), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }
}
