// engraf-atn: ATN engine and phrase sub-networks for the ENGRAF parser

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF ATN
//!
//! The Augmented Transition Network machinery driving phrase recognition
//! inside every LATN layer.
//!
//! [`engine::run_atn`] is a generic depth-first graph runner: nodes carry
//! labeled arcs whose guards test the current token and accumulator and
//! whose effects mutate the accumulator. Arcs are tried in declaration
//! order; dead ends rewind the stream to the branch entry. Ambiguity is the
//! enclosing layer's business: it runs the network greedily from every
//! position and enumerates the alternatives as hypotheses.
//!
//! The four phrase sub-networks ([`np`], [`pp`], [`vp`], [`sentence`]) each
//! build their typed phrase accumulator from `engraf-core`.

pub mod engine;
pub mod np;
pub mod pp;
pub mod sentence;
pub mod stream;
pub mod vp;

pub use engine::{run_atn, Atn, AtnBuilder, NodeId};
pub use np::{np_atn, parse_np};
pub use pp::{parse_pp, pp_atn};
pub use sentence::{parse_sentence, sentence_atn};
pub use stream::TokenStream;
pub use vp::{parse_vp, vp_atn};
