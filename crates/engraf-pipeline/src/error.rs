//! Pipeline error kinds.

use engraf_lexicon::LexiconError;
use thiserror::Error;

/// Errors surfaced by the convenience parse entry point. The per-layer
/// `execute_layer_k` methods report failure through their result records
/// instead, mirroring how hypotheses degrade rather than abort.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Layer 1 could not cover the input.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    /// No hypothesis survived all layers.
    #[error("parse failure after layer {layer}: {message}")]
    ParseFailure { layer: u8, message: String },
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
