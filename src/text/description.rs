/// Default preview budget, in characters.
pub const PREVIEW_CHARS: usize = 1200;

const ELLIPSIS: char = '…';

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a description into a preview and the remainder.
///
/// Whitespace is collapsed first. Text within `limit` characters is returned
/// whole with an empty remainder. Longer text is cut at the last space among
/// the first `limit` characters (or exactly at `limit` when there is none) and
/// the preview gets a trailing ellipsis.
pub fn split_description(text: &str, limit: usize) -> (String, String) {
    let raw = collapse_whitespace(text);
    if raw.chars().count() <= limit {
        return (raw, String::new());
    }

    // Byte offset of char `limit`; it exists because the text is longer than
    // `limit` chars.
    let limit_byte = raw.char_indices().nth(limit).map_or(raw.len(), |(i, _)| i);

    // Only spaces strictly inside the first `limit` chars are candidates, so a
    // word-boundary preview plus its ellipsis always fits the budget.
    let cut = match raw[..limit_byte].rfind(' ') {
        Some(pos) if pos > 0 => pos,
        _ => limit_byte,
    };

    let mut preview = raw[..cut].trim_end().to_string();
    preview.push(ELLIPSIS);
    let remainder = raw[cut..].trim_start().to_string();
    (preview, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        let text = "a".repeat(500);
        let (preview, remainder) = split_description(&text, PREVIEW_CHARS);
        assert_eq!(preview, text);
        assert!(remainder.is_empty());
    }

    #[test]
    fn test_no_spaces_cuts_at_limit() {
        let text = "x".repeat(2000);
        let (preview, remainder) = split_description(&text, PREVIEW_CHARS);
        assert_eq!(preview.chars().count(), 1201);
        assert!(preview.ends_with('…'));
        assert_eq!(preview.trim_end_matches('…').chars().count(), 1200);
        assert_eq!(remainder.chars().count(), 800);
    }

    #[test]
    fn test_cuts_at_last_space_before_limit() {
        let text = format!("{} {}", "a".repeat(1000), "b".repeat(600));
        let (preview, remainder) = split_description(&text, PREVIEW_CHARS);
        assert_eq!(preview, format!("{}…", "a".repeat(1000)));
        assert_eq!(remainder, "b".repeat(600));
    }

    #[test]
    fn test_space_exactly_at_limit() {
        let text = format!("{} {}", "a".repeat(10), "b".repeat(10));
        let (preview, remainder) = split_description(&text, 10);
        assert_eq!(preview, format!("{}…", "a".repeat(10)));
        assert_eq!(remainder, "b".repeat(10));
    }

    #[test]
    fn test_space_at_limit_with_earlier_spaces() {
        let text = format!("{} {} {}", "a".repeat(600), "b".repeat(599), "c".repeat(50));
        let (preview, remainder) = split_description(&text, PREVIEW_CHARS);
        assert_eq!(preview, format!("{}…", "a".repeat(600)));
        assert!(preview.chars().count() <= PREVIEW_CHARS);
        assert_eq!(remainder, format!("{} {}", "b".repeat(599), "c".repeat(50)));

        let (again, rest) = split_description(&preview, PREVIEW_CHARS);
        assert_eq!(again, preview);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let (preview, remainder) = split_description("  Senior\n\n  Analyst\t role ", PREVIEW_CHARS);
        assert_eq!(preview, "Senior Analyst role");
        assert!(remainder.is_empty());
    }

    #[test]
    fn test_multibyte_text_counts_chars() {
        let text = "é".repeat(30);
        let (preview, remainder) = split_description(&text, 20);
        assert_eq!(preview, format!("{}…", "é".repeat(20)));
        assert_eq!(remainder, "é".repeat(10));
    }

    #[test]
    fn test_resplitting_a_word_boundary_preview_is_stable() {
        let text = format!("{} {}", "word ".repeat(200).trim(), "tail ".repeat(200));
        let (preview, _) = split_description(&text, PREVIEW_CHARS);
        let (again, remainder) = split_description(&preview, PREVIEW_CHARS);
        assert_eq!(again, preview);
        assert!(remainder.is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(split_description("   ", PREVIEW_CHARS), (String::new(), String::new()));
    }
}
