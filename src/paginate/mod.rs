//! Incremental pagination of chapter text.
//!
//! A [`Paginator`] accepts text chunks in reading order and cuts them into
//! pages of roughly `chars_per_page` characters. Pages always end at a
//! whitespace character, which is consumed as the separator, so a word is
//! never split across two pages:
//!
//! ```
//! use spritz::{PagerConfig, Paginator};
//!
//! let config = PagerConfig::new(2, 5).unwrap();
//! let mut paginator = Paginator::new(config).unwrap();
//! paginator.feed("aaaaa bbbbb ccccc ddddd").unwrap();
//!
//! let pages = paginator.finish().unwrap();
//! let texts: Vec<&str> = pages.iter().map(|p| p.text()).collect();
//! assert_eq!(texts, ["aaaaa bbbbb", "ccccc ddddd", ""]);
//! ```

mod boundary;

use tracing::{debug, trace};

use crate::document::Page;
use crate::error::{Error, Result};

use boundary::{PageEnd, find_page_end};

/// Sizing policy for a [`Paginator`].
///
/// The page budget is `words_per_page * average_word_length` characters.
/// The average word length only estimates where to start looking for a
/// split point; it is not a word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    words_per_page: usize,
    average_word_length: usize,
}

impl PagerConfig {
    pub const DEFAULT_WORDS_PER_PAGE: usize = 1024;
    pub const DEFAULT_AVERAGE_WORD_LENGTH: usize = 5;

    /// Create a configuration, rejecting a non-positive page budget.
    pub fn new(words_per_page: usize, average_word_length: usize) -> Result<Self> {
        let config = Self {
            words_per_page,
            average_word_length,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the number of words per page.
    pub fn with_words_per_page(self, words_per_page: usize) -> Result<Self> {
        Self::new(words_per_page, self.average_word_length)
    }

    /// Replace the average word length estimate.
    pub fn with_average_word_length(self, average_word_length: usize) -> Result<Self> {
        Self::new(self.words_per_page, average_word_length)
    }

    pub fn words_per_page(&self) -> usize {
        self.words_per_page
    }

    pub fn average_word_length(&self) -> usize {
        self.average_word_length
    }

    /// Page budget in characters.
    pub fn chars_per_page(&self) -> usize {
        self.words_per_page * self.average_word_length
    }

    fn validate(&self) -> Result<()> {
        if self.words_per_page == 0 {
            return Err(Error::Config("words_per_page must be positive".to_string()));
        }
        if self.average_word_length == 0 {
            return Err(Error::Config(
                "average_word_length must be positive".to_string(),
            ));
        }
        if self
            .words_per_page
            .checked_mul(self.average_word_length)
            .is_none()
        {
            return Err(Error::Config(format!(
                "page budget overflows: {} words of {} chars",
                self.words_per_page, self.average_word_length
            )));
        }
        Ok(())
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            words_per_page: Self::DEFAULT_WORDS_PER_PAGE,
            average_word_length: Self::DEFAULT_AVERAGE_WORD_LENGTH,
        }
    }
}

/// Greedy, whitespace-safe page splitter.
///
/// Text is accumulated in an internal buffer. Whenever the buffer grows
/// past the page budget, pages are cut from its front at the first
/// whitespace at or after the budget. A run with no whitespace past the
/// budget is emitted whole rather than truncated.
#[derive(Debug)]
pub struct Paginator {
    chars_per_page: usize,
    buffer: String,
    pages: Vec<Page>,
    finished: bool,
}

impl Paginator {
    /// Create a paginator. Fails before any text is seen if the
    /// configuration's page budget is not positive.
    pub fn new(config: PagerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chars_per_page: config.chars_per_page(),
            buffer: String::new(),
            pages: Vec::new(),
            finished: false,
        })
    }

    /// Append a chunk of text and cut every complete page it yields.
    pub fn feed(&mut self, chunk: &str) -> Result<()> {
        if self.finished {
            return Err(Error::Sequencing);
        }

        self.buffer.push_str(chunk);
        debug!(
            chunk_bytes = chunk.len(),
            buffer_bytes = self.buffer.len(),
            "fed chunk"
        );

        // Cut pages from a moving cursor and drain the buffer once at the end.
        let mut consumed = 0;
        while let Some(end) = find_page_end(&self.buffer[consumed..], self.chars_per_page) {
            let rest = &self.buffer[consumed..];
            let (page, advance) = match end {
                PageEnd::Whitespace { at, width } => (&rest[..at], at + width),
                PageEnd::Exhausted => (rest, rest.len()),
            };

            trace!(
                page = self.pages.len() + 1,
                bytes = page.len(),
                split_at_whitespace = matches!(end, PageEnd::Whitespace { .. }),
                "emitted page"
            );
            self.pages.push(Page::new(page));
            consumed += advance;
        }
        self.buffer.drain(..consumed);

        Ok(())
    }

    /// Flush the remaining buffer as the final page and return all pages.
    ///
    /// The final page is pushed even when the buffer is empty, so the
    /// result always holds at least one page.
    pub fn finish(&mut self) -> Result<Vec<Page>> {
        if self.finished {
            return Err(Error::Sequencing);
        }
        self.finished = true;

        let rest = std::mem::take(&mut self.buffer);
        self.pages.push(Page::new(rest));
        debug!(pages = self.pages.len(), "paginator finished");

        Ok(std::mem::take(&mut self.pages))
    }

    /// Number of pages cut so far and not yet handed out by `finish`.
    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn paginate(config: PagerConfig, chunks: &[&str]) -> Vec<String> {
        let mut paginator = Paginator::new(config).unwrap();
        for chunk in chunks {
            paginator.feed(chunk).unwrap();
        }
        paginator
            .finish()
            .unwrap()
            .into_iter()
            .map(|p| p.text().to_string())
            .collect()
    }

    fn small() -> PagerConfig {
        PagerConfig::new(2, 5).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = PagerConfig::default();
        assert_eq!(config.words_per_page(), 1024);
        assert_eq!(config.average_word_length(), 5);
        assert_eq!(config.chars_per_page(), 5120);
    }

    #[test]
    fn test_config_rejects_zero() {
        assert!(matches!(PagerConfig::new(0, 5), Err(Error::Config(_))));
        assert!(matches!(PagerConfig::new(1024, 0), Err(Error::Config(_))));
        assert!(matches!(
            PagerConfig::default().with_words_per_page(0),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_rejects_overflow() {
        assert!(matches!(
            PagerConfig::new(usize::MAX, 2),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_split_at_whitespace() {
        assert_eq!(
            paginate(small(), &["aaaaa bbbbb ccccc ddddd"]),
            ["aaaaa bbbbb", "ccccc ddddd", ""]
        );
    }

    #[test]
    fn test_unbroken_run_is_one_page() {
        let run = "a".repeat(20);
        assert_eq!(paginate(small(), &[run.as_str()]), [run.as_str(), ""]);
    }

    #[test]
    fn test_no_input_yields_one_empty_page() {
        assert_eq!(paginate(small(), &[]), [""]);
        assert_eq!(paginate(small(), &["", ""]), [""]);
    }

    #[test]
    fn test_exact_budget_does_not_split() {
        assert_eq!(paginate(small(), &["aaaaa bbbb"]), ["aaaaa bbbb"]);
    }

    #[test]
    fn test_one_over_budget_without_space() {
        assert_eq!(paginate(small(), &["aaaaa bbbbb"]), ["aaaaa bbbbb", ""]);
    }

    #[test]
    fn test_chunks_are_concatenated_without_separator() {
        // The chunk boundary is not whitespace; "bbb" + "bb" forms one word
        assert_eq!(
            paginate(small(), &["aaaaa bbb", "bb ccccc"]),
            ["aaaaa bbbbb", "ccccc"]
        );
    }

    #[test]
    fn test_remainder_carries_into_next_chunk() {
        let mut paginator = Paginator::new(small()).unwrap();
        paginator.feed("aaaaa bbbbb cc").unwrap();
        assert_eq!(paginator.page_count(), 1);
        paginator.feed("ccc ddddd eeeee").unwrap();
        assert_eq!(paginator.page_count(), 2);

        let pages = paginator.finish().unwrap();
        let texts: Vec<&str> = pages.iter().map(|p| p.text()).collect();
        assert_eq!(texts, ["aaaaa bbbbb", "ccccc ddddd", "eeeee"]);
    }

    #[test]
    fn test_newline_is_a_separator() {
        assert_eq!(
            paginate(small(), &["aaaaa bbbbb\nccccc"]),
            ["aaaaa bbbbb", "ccccc"]
        );
    }

    #[test]
    fn test_multibyte_text_is_measured_in_chars() {
        // 10 chars, 20 bytes: exactly the budget
        let word = "éééééééééé";
        assert_eq!(paginate(small(), &[word]), [word]);

        let text = format!("{word}é {word}");
        assert_eq!(paginate(small(), &[text.as_str()]), [format!("{word}é"), word.to_string()]);
    }

    #[test]
    fn test_feed_after_finish_is_rejected() {
        let mut paginator = Paginator::new(small()).unwrap();
        paginator.feed("text").unwrap();
        paginator.finish().unwrap();

        assert!(matches!(paginator.feed("more"), Err(Error::Sequencing)));
        assert!(matches!(paginator.finish(), Err(Error::Sequencing)));
    }

    /// Char-by-char rendition of the cut rule, used as an oracle.
    fn reference(chars_per_page: usize, chunks: &[&str]) -> Vec<String> {
        let mut pages = Vec::new();
        let mut buffer: Vec<char> = Vec::new();
        for chunk in chunks {
            buffer.extend(chunk.chars());
            while buffer.len() > chars_per_page {
                match buffer[chars_per_page..].iter().position(|c| c.is_whitespace()) {
                    Some(offset) => {
                        let at = chars_per_page + offset;
                        pages.push(buffer[..at].iter().collect());
                        buffer.drain(..=at);
                    }
                    None => pages.push(buffer.drain(..).collect()),
                }
            }
        }
        pages.push(buffer.into_iter().collect());
        pages
    }

    fn mixed_chunks() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z\u{e9} \t\n\u{a0}]{0,30}", 0..8)
    }

    fn word_lists() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zé]{1,12}", 0..60)
    }

    proptest! {
        #[test]
        fn prop_pages_rejoin_to_input(
            words in word_lists(),
            words_per_page in 1usize..6,
            average_word_length in 1usize..6,
        ) {
            let config = PagerConfig::new(words_per_page, average_word_length).unwrap();
            let input = words.join(" ");
            let pages = paginate(config, &[input.as_str()]);

            // With single-space separated words, an empty final page means the
            // page before it was emitted whole, without consuming a separator.
            let body = match pages.split_last() {
                Some((last, rest)) if last.is_empty() && !rest.is_empty() => rest,
                _ => &pages[..],
            };
            prop_assert_eq!(body.join(" "), input);
        }

        #[test]
        fn prop_chunked_mixed_whitespace_matches_reference(
            chunks in mixed_chunks(),
            words_per_page in 1usize..4,
            average_word_length in 1usize..6,
        ) {
            let config = PagerConfig::new(words_per_page, average_word_length).unwrap();
            let chunks: Vec<&str> = chunks.iter().map(String::as_str).collect();

            prop_assert_eq!(
                paginate(config, &chunks),
                reference(config.chars_per_page(), &chunks)
            );
        }

        #[test]
        fn prop_pages_never_split_words(
            words in word_lists(),
            words_per_page in 1usize..6,
            average_word_length in 1usize..6,
        ) {
            let config = PagerConfig::new(words_per_page, average_word_length).unwrap();
            let input = words.join(" ");
            let pages = paginate(config, &[input.as_str()]);

            for page in &pages {
                for word in page.split(' ').filter(|w| !w.is_empty()) {
                    prop_assert!(words.iter().any(|w| w == word));
                }
            }
        }

        #[test]
        fn prop_full_pages_reach_budget(
            words in word_lists(),
            words_per_page in 1usize..6,
            average_word_length in 1usize..6,
        ) {
            let config = PagerConfig::new(words_per_page, average_word_length).unwrap();
            let input = words.join(" ");
            let pages = paginate(config, &[input.as_str()]);

            prop_assert!(!pages.is_empty());
            for page in &pages[..pages.len() - 1] {
                prop_assert!(page.chars().count() >= config.chars_per_page());
            }
        }

        #[test]
        fn prop_pagination_is_deterministic(
            chunks in prop::collection::vec("[a-z \n]{0,40}", 0..8),
            words_per_page in 1usize..6,
        ) {
            let config = PagerConfig::new(words_per_page, 5).unwrap();
            let chunks: Vec<&str> = chunks.iter().map(String::as_str).collect();
            prop_assert_eq!(paginate(config, &chunks), paginate(config, &chunks));
        }
    }
}
