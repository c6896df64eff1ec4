//! Layer 4: verb-phrase token replacement.

use crate::config::TokenizerConfig;
use crate::coordination::run_layer;
use engraf_atn::{parse_vp, TokenStream};
use engraf_core::{Hypothesis, Phrase, PhraseResult};

fn parse(stream: &mut TokenStream<'_>) -> PhraseResult<Option<Phrase>> {
    parse_vp(stream).map(|p| p.map(Phrase::Verb))
}

/// Replace verb-phrase spans with composite VP tokens. Coordination chains
/// ("draw a cube and color it red") become CONJ-VP tokens in the
/// phrase-level variant.
#[must_use]
pub fn tokenize_layer4(inbound: &[Hypothesis], config: &TokenizerConfig) -> Vec<Hypothesis> {
    run_layer(inbound, "Layer 4", config, &parse)
}
