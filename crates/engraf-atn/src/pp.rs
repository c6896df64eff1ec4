//! The prepositional-phrase sub-network, run over Layer-2 tokens.
//!
//! Shape: optional "not", a preposition, then either an NP composite token
//! or a bare `[x,y,z]` literal as the object of the preposition.

use crate::engine::{run_atn, Atn, AtnBuilder};
use crate::stream::TokenStream;
use engraf_core::{Dimension, PhraseResult, PrepositionalPhrase};

/// Build the PP sub-network.
#[must_use]
pub fn pp_atn() -> Atn<PrepositionalPhrase> {
    let mut b = AtnBuilder::<PrepositionalPhrase>::new();
    let start = b.node("pp-start");
    let prep = b.node("pp-prep");
    let object = b.node("pp-object");
    let end = b.node("pp-end");

    b.consume(
        start,
        prep,
        "negation",
        |t, _| t.is_lexical(Dimension::Neg),
        |pp, t| {
            pp.apply_negation(&t.vector);
            Ok(())
        },
    );
    b.jump(start, prep, "no-negation");

    b.consume(
        prep,
        object,
        "preposition",
        |t, _| t.is_lexical(Dimension::Prep),
        |pp, t| {
            pp.apply_preposition(&t.vector);
            Ok(())
        },
    );

    b.consume(
        object,
        end,
        "np-object",
        |t, _| t.is_phrase_level(Dimension::Np) && t.phrase.is_some(),
        |pp, t| {
            if let Some(phrase) = t.effective_phrase() {
                pp.apply_object(phrase.clone(), &t.vector);
            }
            Ok(())
        },
    );
    b.consume(
        object,
        end,
        "vector-literal",
        |t, _| t.is_lexical(Dimension::VectorLit),
        |pp, t| {
            pp.apply_vector_literal(&t.vector);
            Ok(())
        },
    );

    b.build(start, end)
}

/// Try to parse one PP at the stream's current position.
///
/// # Errors
/// Propagates phrase-building failures; the caller drops the candidate.
pub fn parse_pp(stream: &mut TokenStream<'_>) -> PhraseResult<Option<PrepositionalPhrase>> {
    run_atn(&pp_atn(), stream, PrepositionalPhrase::new())
}
