// engraf-tokenizer: Layered multi-hypothesis tokenization for ENGRAF

#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # ENGRAF Tokenizer
//!
//! The five LATN tokenization layers. Layer 1 lifts a character stream into
//! ranked lexical hypotheses; Layers 2-5 each scan the prior layer's
//! hypotheses with a phrase sub-network, replace recognized spans with
//! composite tokens, and enumerate coordination and (at Layer 3)
//! PP-attachment alternatives as additional hypotheses.
//!
//! Every layer is a pure function `(hypotheses, config) -> hypotheses`;
//! outbound lists are sorted by descending confidence with stable order
//! among equals.

pub mod config;
pub mod coordination;
pub mod layer1;
pub mod layer2;
pub mod layer3;
pub mod layer4;
pub mod layer5;

pub use config::TokenizerConfig;
pub use coordination::{find_phrase_sequences, replace_sequences, PhraseParser, PhraseSequence};
pub use layer1::tokenize_layer1;
pub use layer2::tokenize_layer2;
pub use layer3::{enumerate_pp_attachments, tokenize_layer3};
pub use layer4::tokenize_layer4;
pub use layer5::tokenize_layer5;
