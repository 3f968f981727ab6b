//! The input word list for one puzzle: the topic title, the descriptive
//! facts supplied by the word-list source, and the words themselves.
//!
//! Words may contain spaces and hyphens in their display form ("ice cream",
//! "x-ray"); those are stripped and the word uppercased before placement.
//! The display forms pass through unchanged into the final `PuzzleData`.

use crate::errors::GenerationError;
use crate::lexicon::normalize_word;
use serde::{Deserialize, Serialize};

/// A validated topical word list plus its pass-through metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordList {
    /// Topic title of the puzzle.
    pub title: String,
    /// Title shown on the rendered page; empty means "use `title`".
    #[serde(default)]
    pub display_title: String,
    /// Short descriptive text from the word-list source.
    #[serde(default)]
    pub short_fact: String,
    /// Long descriptive text from the word-list source.
    #[serde(default)]
    pub long_fact: String,
    /// The words to place, in their display form.
    pub words: Vec<String>,
}

impl WordList {
    /// Convenience constructor for programmatic callers and tests.
    pub fn new<T, I, S>(title: T, words: I) -> WordList
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordList {
            title: title.into(),
            display_title: String::new(),
            short_fact: String::new(),
            long_fact: String::new(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Check every word for characters the grid cannot hold. Only ASCII
    /// letters, spaces and hyphens are legal in the display form.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidWord`] naming the first offending
    /// word and character.
    pub fn validate(&self) -> Result<(), GenerationError> {
        for word in &self.words {
            if let Some(invalid_char) = word
                .chars()
                .find(|&c| !(c.is_ascii_alphabetic() || c == ' ' || c == '-'))
            {
                return Err(GenerationError::InvalidWord { word: word.clone(), invalid_char });
            }
        }
        Ok(())
    }

    /// Placement forms of the words: uppercased, spaces and hyphens stripped,
    /// deduplicated, empties dropped. Order follows the input list.
    #[must_use]
    pub fn normalized_words(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.words
            .iter()
            .map(|w| normalize_word(w))
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .collect()
    }

    /// Load a word list from a JSON file.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if the file cannot be read or is not valid
    /// word-list JSON.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;
        serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}
