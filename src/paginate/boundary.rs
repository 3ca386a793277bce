//! Page boundary search.

/// Where the page at the front of a buffer ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageEnd {
    /// A whitespace character at byte offset `at` closes the page. The
    /// character itself (`width` bytes) is the separator and belongs to
    /// neither page.
    Whitespace { at: usize, width: usize },
    /// No whitespace after the budget; the whole buffer is one page.
    Exhausted,
}

/// Find the end of the first page in `text`.
///
/// Returns `None` while `text` holds no more than `chars_per_page` chars,
/// so a buffer of exactly the budget is left alone. Otherwise scans
/// forward from char offset `chars_per_page` for the first whitespace
/// character.
pub(crate) fn find_page_end(text: &str, chars_per_page: usize) -> Option<PageEnd> {
    // The char at offset `chars_per_page` exists iff the text is over budget.
    let (start, _) = text.char_indices().nth(chars_per_page)?;

    let end = text[start..]
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| PageEnd::Whitespace {
            at: start + i,
            width: c.len_utf8(),
        })
        .unwrap_or(PageEnd::Exhausted);

    Some(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_budget_has_no_end() {
        assert_eq!(find_page_end("", 10), None);
        assert_eq!(find_page_end("short", 10), None);
        // Exactly the budget: strict comparison, no split
        assert_eq!(find_page_end("aaaaa bbbb", 10), None);
    }

    #[test]
    fn test_whitespace_at_budget_offset() {
        // Offset 10 is itself a space
        assert_eq!(
            find_page_end("aaaaaaaaaa bbb", 10),
            Some(PageEnd::Whitespace { at: 10, width: 1 })
        );
    }

    #[test]
    fn test_whitespace_before_budget_is_ignored() {
        // The space at 5 is before the search start
        assert_eq!(
            find_page_end("aaaaa bbbbb ccccc", 10),
            Some(PageEnd::Whitespace { at: 11, width: 1 })
        );
    }

    #[test]
    fn test_no_whitespace_after_budget() {
        assert_eq!(find_page_end("aaaaa bbbbbbbbbbbb", 10), Some(PageEnd::Exhausted));
        assert_eq!(find_page_end(&"a".repeat(20), 10), Some(PageEnd::Exhausted));
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        // Each 'é' is two bytes; the budget is in chars
        let text = "éééé éééé";
        assert_eq!(
            find_page_end(text, 3),
            Some(PageEnd::Whitespace { at: 8, width: 1 })
        );
    }

    #[test]
    fn test_any_unicode_whitespace_separates() {
        assert_eq!(
            find_page_end("abc\ndef", 2),
            Some(PageEnd::Whitespace { at: 3, width: 1 })
        );
        // NO-BREAK SPACE is whitespace and two bytes wide
        assert_eq!(
            find_page_end("abc\u{a0}def", 2),
            Some(PageEnd::Whitespace { at: 3, width: 2 })
        );
    }
}
