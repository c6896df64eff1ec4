//! Grounding error kinds.

use thiserror::Error;

/// Errors raised while binding phrases to scene entities. These are local to
/// one noun phrase: the containing hypothesis survives with that phrase
/// unbound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroundingError {
    /// A pronoun with nothing in the scene's recent queue to refer to.
    #[error("no referent for pronoun '{pronoun}'")]
    NoReferent { pronoun: String },

    /// No scene object matched the noun phrase.
    #[error("no scene object matches '{description}'")]
    NoMatch { description: String },
}
