//! Lexicon error kinds.

use thiserror::Error;

/// Errors raised during lexical lookup.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// Layer 1 could not cover the input with vocabulary matches. Fatal for
    /// the whole parse.
    #[error("unknown token '{surface}' at position {position}")]
    UnknownToken { surface: String, position: usize },
}

/// Result type for lexicon operations.
pub type LexiconResult<T> = Result<T, LexiconError>;
