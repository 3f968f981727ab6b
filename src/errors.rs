//! Error types for puzzle generation with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each [`GenerationError`] variant has a unique code (G001-G005) for
//! documentation lookup:
//!
//! - G001: `InvalidWord` (Illegal character in an input word)
//! - G002: `PlacementFailed` (No valid position exists for a word)
//! - G003: `ProfanityRejected` (Prohibited incidental words survived every retry)
//! - G004: `Cancelled` (Generation aborted via the cancel token)
//! - G005: `InvalidConfig` (Configuration no attempt could satisfy)
//!
//! Grid-level failures ([`crate::grid::GridError`]) never reach callers:
//! `Conflict` is recovered inside the placer by trying the next candidate,
//! and `OutOfBounds` indicates a programming error.
//!
//! All placement and scan failures are recoverable within the orchestrator's
//! retry loop; only exhaustion of the attempt bound produces a
//! `GenerationError`, which carries the attempt count so the caller can
//! report "could not generate a clean puzzle" without internal detail.

use crate::scanner::FoundProfanity;
use std::io;

/// Final, user-visible error for a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// An input word contains a character the grid cannot hold.
    #[error("invalid word \"{word}\": illegal character '{invalid_char}'")]
    InvalidWord { word: String, invalid_char: char },

    /// No valid position existed for `word`, even after backtracking, on any
    /// attempt.
    #[error("no valid placement for word \"{word}\" after {attempts} attempt(s)")]
    PlacementFailed { word: String, attempts: usize },

    /// Unresolved prohibited incidental words remained after every filler
    /// retry. Carries the last attempt's full findings so a human can adjust
    /// the word list or the lexicon.
    #[error("{count} prohibited incidental word(s) remained after {attempts} attempt(s)", count = .findings.len())]
    ProfanityRejected { findings: Vec<FoundProfanity>, attempts: usize },

    /// The cancel token was triggered while an attempt was in flight.
    #[error("generation cancelled")]
    Cancelled,

    /// The configuration cannot be satisfied by any attempt.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GenerationError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::InvalidWord { .. } => "G001",
            GenerationError::PlacementFailed { .. } => "G002",
            GenerationError::ProfanityRejected { .. } => "G003",
            GenerationError::Cancelled => "G004",
            GenerationError::InvalidConfig { .. } => "G005",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GenerationError::InvalidWord { .. } => "Illegal character in an input word",
            GenerationError::PlacementFailed { .. } => "No valid position exists for a word",
            GenerationError::ProfanityRejected { .. } => {
                "Prohibited incidental words survived every retry"
            }
            GenerationError::Cancelled => "Generation aborted via the cancel token",
            GenerationError::InvalidConfig { .. } => "Configuration no attempt could satisfy",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerationError::InvalidWord { .. } => {
                Some("Words may contain only ASCII letters, spaces and hyphens")
            }
            GenerationError::PlacementFailed { .. } => {
                Some("Enlarge the grid, shorten the word, or drop it from the list")
            }
            GenerationError::ProfanityRejected { .. } => {
                Some("Raise maxPlacementAttempts, shrink the lexicon, or change the word list")
            }
            GenerationError::InvalidConfig { .. } => {
                Some("Check rows, columns, alphabet, minScanLength and maxPlacementAttempts")
            }
            GenerationError::Cancelled => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

impl From<GenerationError> for io::Error {
    fn from(ge: GenerationError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidInput, ge.to_string())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
