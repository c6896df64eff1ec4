// engraf-core: Core types for the ENGRAF layered parser

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF Core
//!
//! Foundational types for ENGRAF, a layered multi-hypothesis parser that
//! turns English sentences about a 3D scene into executable scene
//! operations.
//!
//! This crate provides the semantic vector space every lexical and phrasal
//! item lives in, the typed phrase records built by the phrase sub-networks,
//! the composite tokens that carry phrases between layers, and the
//! hypothesis container all five layers exchange.
//!
//! ## Key components
//!
//! - [`Dimension`]: the closed dimension catalog, partitioned into POS and
//!   semantic dimensions
//! - [`VectorSpace`]: fixed-length signed-real vectors with additive
//!   composition
//! - [`Phrase`]: the tagged phrase variant (NP, PP, VP, sentence,
//!   coordination)
//! - [`Token`]: lexical and composite tokens with phrase back-pointers
//! - [`Hypothesis`]: one ranked parse alternative with its confidence
//!
//! ## Example
//!
//! ```rust
//! use engraf_core::{Dimension, VectorSpace};
//!
//! let red = VectorSpace::from_word("red", &[(Dimension::Adj, 1.0), (Dimension::Red, 1.0)]);
//! let cube = VectorSpace::from_word("cube", &[(Dimension::Noun, 1.0)]);
//! let np = &red + &cube;
//! assert!(np.isa(Dimension::Red));
//! assert!(np.isa(Dimension::Noun));
//! ```

pub mod combinatorics;
pub mod dimensions;
pub mod error;
pub mod hypothesis;
pub mod phrase;
pub mod token;
pub mod vector;

pub use combinatorics::CartesianOdometer;
pub use dimensions::{pos_mask, semantic_mask, Dimension, DIMENSION_COUNT};
pub use error::{PhraseError, PhraseResult, VectorError};
pub use hypothesis::{
    sort_by_confidence, truncate_to_bound, Hypothesis, Replacement, StructuralMarker,
};
pub use phrase::{
    ConjunctionPhrase, Grounding, NounPhrase, Phrase, PrepositionalPhrase, SentencePhrase,
    VerbPhrase,
};
pub use token::Token;
pub use vector::VectorSpace;
