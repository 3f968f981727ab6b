//! `lexicon` — Module to load and preprocess the prohibited-word list.
//!
//! The lexicon is the configured set of disallowed terms (typically
//! profanity) that the scanner checks incidental letter runs against. It is
//! loaded once, normalized, and then shared read-only across every in-flight
//! generation attempt — wrap it in an `Arc` for batch work; it is never
//! mutated after construction.
//!
//! The parsing logic:
//! - Each line of the input holds one word.
//! - Blank lines and lines starting with `#` are skipped.
//! - Words are normalized the same way grid content is: uppercased, with
//!   anything that is not an ASCII letter dropped.
//! - Words that normalize to the empty string are skipped.

use std::collections::HashSet;

/// Normalize a word the way the grid stores characters: ASCII uppercase,
/// letters only.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Immutable set of prohibited words, with cached length bounds so the
/// scanner and the filler guard can skip impossible substring lengths cheaply.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: HashSet<String>,
    min_len: usize,
    max_len: usize,
}

impl Lexicon {
    /// Build a lexicon from any iterable of words, normalizing each.
    pub fn new<I, S>(words: I) -> Lexicon
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        let min_len = words.iter().map(String::len).min().unwrap_or(0);
        let max_len = words.iter().map(String::len).max().unwrap_or(0);
        Lexicon { words, min_len, max_len }
    }

    /// A new lexicon holding this lexicon's words plus `extra`, normalized
    /// the same way. Used to fold configured prohibited words into a loaded
    /// lexicon.
    #[must_use]
    pub fn extended<I, S>(&self, extra: I) -> Lexicon
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = self.words.clone();
        words.extend(
            extra
                .into_iter()
                .map(|w| normalize_word(w.as_ref()))
                .filter(|w| !w.is_empty()),
        );
        let min_len = words.iter().map(String::len).min().unwrap_or(0);
        let max_len = words.iter().map(String::len).max().unwrap_or(0);
        Lexicon { words, min_len, max_len }
    }

    /// Parse a raw lexicon from an in-memory string, one word per line.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> Lexicon {
        Lexicon::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Read a lexicon file from disk and parse it.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<Lexicon> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read lexicon from '{}': {}", path_ref.display(), e),
            )
        })?;
        Ok(Self::parse_from_str(&data))
    }

    /// Membership test. `word` is expected to already be normalized
    /// (the scanner reads uppercase letters straight off the grid).
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.could_contain_len(word.len()) && self.words.contains(word)
    }

    /// Cheap length prefilter: no lexicon word has this length.
    #[must_use]
    pub fn could_contain_len(&self, len: usize) -> bool {
        !self.words.is_empty() && len >= self.min_len && len <= self.max_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Length of the longest prohibited word (0 when empty).
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let lexicon = Lexicon::parse_from_str("rat\nbad\n");
        assert_eq!(lexicon.len(), 2);
        assert!(lexicon.contains("RAT"));
        assert!(lexicon.contains("BAD"));
        assert!(!lexicon.contains("CAT"));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let lexicon = Lexicon::parse_from_str("Rat\nBAD");
        assert!(lexicon.contains("RAT"));
        assert!(lexicon.contains("BAD"));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let lexicon = Lexicon::parse_from_str("# header\n\nrat\n  \n# tail");
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_normalize_strips_non_letters() {
        assert_eq!(normalize_word("b-a d1"), "BAD");
        assert_eq!(normalize_word("123"), "");
    }

    #[test]
    fn test_length_prefilter() {
        let lexicon = Lexicon::new(["rat", "worse"]);
        assert!(!lexicon.could_contain_len(2));
        assert!(lexicon.could_contain_len(3));
        assert!(lexicon.could_contain_len(5));
        assert!(!lexicon.could_contain_len(6));
        assert_eq!(lexicon.max_len(), 5);
    }

    #[test]
    fn test_empty_lexicon() {
        let lexicon = Lexicon::parse_from_str("");
        assert!(lexicon.is_empty());
        assert!(!lexicon.contains("RAT"));
        assert!(!lexicon.could_contain_len(3));
    }

    #[test]
    fn test_extended_merges_and_updates_bounds() {
        let base = Lexicon::new(["rat"]);
        let merged = base.extended(["Worse", ""]);
        assert_eq!(merged.len(), 2);
        assert!(merged.contains("RAT"));
        assert!(merged.contains("WORSE"));
        assert!(merged.could_contain_len(5));
        assert_eq!(merged.max_len(), 5);
        // the original is untouched
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_deduplicates() {
        let lexicon = Lexicon::new(["rat", "RAT", "r-at"]);
        assert_eq!(lexicon.len(), 1);
    }
}
