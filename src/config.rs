//! Generation configuration supplied by the project/settings source.
//!
//! Serialized field names are camelCase (`minScanLength`,
//! `maxPlacementAttempts`, ...) to match the recognized option names of the
//! settings layer; every field has a default so a partial config document
//! deserializes cleanly.

use crate::errors::GenerationError;
use serde::{Deserialize, Serialize};

/// Default filler alphabet: the 26 ASCII uppercase letters.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// All knobs for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PuzzleConfig {
    /// Grid height in cells.
    pub rows: usize,
    /// Grid width in cells.
    pub columns: usize,
    /// Minimum length of incidental words the scanner reports.
    pub min_scan_length: usize,
    /// Characters the filler draws from, uniformly.
    pub alphabet: String,
    /// Base seed for the injectable RNG; fixed seed means reproducible output.
    pub seed: u64,
    /// Prohibited words from the settings document, merged into the lexicon
    /// supplied at generation time (normalized the same way).
    pub lexicon: Vec<String>,
    /// Total attempt bound across placement retries and filler retries.
    pub max_placement_attempts: usize,
    /// Whether an intentionally placed answer word that is also in the
    /// lexicon counts as accepted. Off by default: such a word fails the
    /// generation unless the caller explicitly opts in.
    pub allow_profane_answers: bool,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig {
            rows: 10,
            columns: 10,
            min_scan_length: 3,
            alphabet: DEFAULT_ALPHABET.to_string(),
            seed: 0,
            lexicon: Vec::new(),
            max_placement_attempts: 8,
            allow_profane_answers: false,
        }
    }
}

impl PuzzleConfig {
    /// Reject configurations no attempt could satisfy.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidConfig`] for zero dimensions, an
    /// empty alphabet, a zero attempt bound, or a scan length below 2.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GenerationError::InvalidConfig {
                reason: format!("grid dimensions must be positive, got {}x{}", self.rows, self.columns),
            });
        }
        if self.alphabet.is_empty() {
            return Err(GenerationError::InvalidConfig {
                reason: "filler alphabet is empty".to_string(),
            });
        }
        if self.max_placement_attempts == 0 {
            return Err(GenerationError::InvalidConfig {
                reason: "maxPlacementAttempts must be at least 1".to_string(),
            });
        }
        if self.min_scan_length < 2 {
            return Err(GenerationError::InvalidConfig {
                reason: format!("minScanLength must be at least 2, got {}", self.min_scan_length),
            });
        }
        Ok(())
    }

    /// The filler alphabet as uppercase characters.
    #[must_use]
    pub fn alphabet_chars(&self) -> Vec<char> {
        self.alphabet.chars().map(|c| c.to_ascii_uppercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PuzzleConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PuzzleConfig =
            serde_json::from_str(r#"{"rows":5,"columns":7,"minScanLength":4}"#).unwrap();
        assert_eq!(config.rows, 5);
        assert_eq!(config.columns, 7);
        assert_eq!(config.min_scan_length, 4);
        assert_eq!(config.alphabet, DEFAULT_ALPHABET);
        assert_eq!(config.max_placement_attempts, 8);
        assert!(!config.allow_profane_answers);
    }

    #[test]
    fn test_camel_case_option_names() {
        let config: PuzzleConfig = serde_json::from_str(
            r#"{"maxPlacementAttempts":3,"allowProfaneAnswers":true,"lexicon":["rat"],"seed":42}"#,
        )
        .unwrap();
        assert_eq!(config.max_placement_attempts, 3);
        assert!(config.allow_profane_answers);
        assert_eq!(config.lexicon, vec!["rat"]);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let config = PuzzleConfig { rows: 0, ..PuzzleConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_alphabet() {
        let config = PuzzleConfig { alphabet: String::new(), ..PuzzleConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_attempts() {
        let config = PuzzleConfig { max_placement_attempts: 0, ..PuzzleConfig::default() };
        assert!(config.validate().is_err());
    }
}
