// engraf-lexicon: Vocabulary and morphology for the ENGRAF parser

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF Lexicon
//!
//! Maps surface words to semantic vectors. Three mechanisms cover the
//! lexical surface:
//!
//! - a base entry table, including multi-word compounds keyed by their
//!   joined surface ("left of", "in front of"),
//! - an inflection generator that derives plural nouns, verb past/participle
//!   forms, and comparative/superlative adjectives at lookup time,
//! - literal recognizers for quoted strings, `[x,y,z]` vector literals, and
//!   bare numerals.
//!
//! The vocabulary is read-only after construction; every lookup returns a
//! fresh vector.

pub mod error;
pub mod inflection;
pub mod literals;
pub mod vocabulary;

pub use error::{LexiconError, LexiconResult};
pub use inflection::{InflectionConfig, InflectionKind};
pub use literals::{parse_numeral, parse_quoted_literal, parse_vector_literal};
pub use vocabulary::{LexiconMatch, MatchKind, Vocabulary};
