//! Text statistics over raw object bytes.
//!
//! Bytes are decoded as UTF-8 with invalid sequences replaced by U+FFFD, so
//! analysis never fails. Lowercase classification follows the Unicode
//! `Alphabetic` and `Lowercase` properties, which covers accented and
//! non-Latin letters.

pub const PREVIEW_MAX_BYTES: usize = 1_000;
pub const PREVIEW_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStats {
    /// Length of the raw payload, not of the decoded text.
    pub byte_len: usize,
    pub char_count: usize,
    pub lowercase_count: usize,
}

pub fn analyze_bytes(bytes: &[u8]) -> TextStats {
    let text = String::from_utf8_lossy(bytes);
    TextStats {
        byte_len: bytes.len(),
        char_count: text.chars().count(),
        lowercase_count: count_lowercase_letters(&text),
    }
}

pub fn count_lowercase_letters(text: &str) -> usize {
    text.chars()
        .filter(|ch| ch.is_alphabetic() && ch.is_lowercase())
        .count()
}

/// Short single-line excerpt of the payload for debug logging.
pub fn debug_preview(bytes: &[u8]) -> String {
    let head = &bytes[..bytes.len().min(PREVIEW_MAX_BYTES)];
    String::from_utf8_lossy(head)
        .chars()
        .take(PREVIEW_MAX_CHARS)
        .collect::<String>()
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accented_lowercase_letters() {
        let stats = analyze_bytes("café".as_bytes());

        assert_eq!(stats.lowercase_count, 4);
        assert_eq!(stats.char_count, 4);
        assert_eq!(stats.byte_len, 5);
    }

    #[test]
    fn uppercase_digits_and_symbols_are_not_counted() {
        assert_eq!(analyze_bytes(b"ABC123!@#").lowercase_count, 0);
        assert_eq!(analyze_bytes(b"").lowercase_count, 0);
    }

    #[test]
    fn counts_non_latin_lowercase_letters() {
        assert_eq!(count_lowercase_letters("Ωμέγα"), 4);
        assert_eq!(count_lowercase_letters("Привет"), 5);
        assert_eq!(count_lowercase_letters("ação ÇÃO"), 4);
        assert_eq!(count_lowercase_letters("漢字"), 0);
    }

    #[test]
    fn invalid_utf8_is_replaced_instead_of_failing() {
        let bytes = [b'a', 0xFF, 0xFE, b'b', b'C'];
        let stats = analyze_bytes(&bytes);

        assert_eq!(stats.lowercase_count, 2);
        assert_eq!(stats.byte_len, 5);
        assert!(stats.char_count <= stats.byte_len);
    }

    #[test]
    fn analysis_is_deterministic_and_bounded() {
        let inputs: [&[u8]; 4] = [
            b"Hello, World",
            "straße ÄÖÜ äöü".as_bytes(),
            &[0xC3, 0x28, b'x', 0xE2, 0x82],
            b"\n\t lowercase\r\n",
        ];

        for input in inputs {
            let first = analyze_bytes(input);
            let second = analyze_bytes(input);
            assert_eq!(first, second);
            assert!(first.lowercase_count <= first.char_count);
            assert!(first.char_count <= first.byte_len);
        }
    }

    #[test]
    fn preview_escapes_newlines_and_truncates() {
        assert_eq!(debug_preview(b"line one\nline two"), "line one\\nline two");

        let long = "é".repeat(600);
        let preview = debug_preview(long.as_bytes());
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS);
        assert!(preview.chars().all(|ch| ch == 'é'));
    }
}
