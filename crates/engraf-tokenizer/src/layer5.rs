//! Layer 5: sentence token replacement.

use crate::config::TokenizerConfig;
use crate::coordination::run_layer;
use engraf_atn::{parse_sentence, TokenStream};
use engraf_core::{Hypothesis, Phrase, PhraseResult};

fn parse(stream: &mut TokenStream<'_>) -> PhraseResult<Option<Phrase>> {
    parse_sentence(stream).map(|p| p.map(Phrase::Sentence))
}

/// Replace sentence spans with composite SP tokens, coordinating compound
/// sentences in the phrase-level variant.
#[must_use]
pub fn tokenize_layer5(inbound: &[Hypothesis], config: &TokenizerConfig) -> Vec<Hypothesis> {
    run_layer(inbound, "Layer 5", config, &parse)
}
