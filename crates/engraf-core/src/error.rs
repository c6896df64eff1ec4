//! Core error kinds.

use thiserror::Error;

/// Errors raised by the vector space.
#[derive(Error, Debug)]
pub enum VectorError {
    /// String-keyed write against a dimension outside the catalog.
    #[error("unknown dimension '{name}'")]
    UnknownDimension { name: String },
}

/// Errors raised while building phrase records.
///
/// These are local to one hypothesis: the enclosing layer drops the offending
/// hypothesis and continues with the others.
#[derive(Error, Debug)]
pub enum PhraseError {
    /// Determiner/noun number mismatch inside a noun phrase.
    #[error("number agreement: determiner '{determiner}' cannot modify noun '{noun}'")]
    NumberAgreement { determiner: String, noun: String },

    /// "and" and "or" chained in a single coordination.
    #[error("mixed conjunctions '{first}' and '{second}' in one coordination")]
    MixedConjunction { first: String, second: String },
}

/// Result type for phrase-building operations.
pub type PhraseResult<T> = Result<T, PhraseError>;
