//! Layer 2: noun-phrase token replacement.

use crate::config::TokenizerConfig;
use crate::coordination::run_layer;
use engraf_atn::{parse_np, TokenStream};
use engraf_core::{Hypothesis, Phrase, PhraseResult};

fn parse(stream: &mut TokenStream<'_>) -> PhraseResult<Option<Phrase>> {
    parse_np(stream).map(|p| p.map(Phrase::Noun))
}

/// Replace noun-phrase spans in every inbound hypothesis with composite NP
/// tokens, enumerating local and phrase-level coordination variants.
#[must_use]
pub fn tokenize_layer2(inbound: &[Hypothesis], config: &TokenizerConfig) -> Vec<Hypothesis> {
    run_layer(inbound, "Layer 2", config, &parse)
}
