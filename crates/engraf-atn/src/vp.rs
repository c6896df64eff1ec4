//! The verb-phrase sub-network, run over Layer-3 tokens.
//!
//! Shape: a verb (or to-be form), an optional NP object, any run of PP
//! tokens, and an adjective complement for transform or copular verbs
//! ("make it bigger", "is red").

use crate::engine::{run_atn, Atn, AtnBuilder};
use crate::stream::TokenStream;
use engraf_core::{Dimension, PhraseResult, VerbPhrase};

fn takes_adjective_complement(vp: &VerbPhrase) -> bool {
    vp.vector.isa(Dimension::Transform) || vp.is_tobe()
}

/// Build the VP sub-network.
#[must_use]
pub fn vp_atn() -> Atn<VerbPhrase> {
    let mut b = AtnBuilder::<VerbPhrase>::new();
    let start = b.node("vp-start");
    let after_verb = b.node("vp-after-verb");
    let trailing = b.node("vp-trailing");
    let end = b.node("vp-end");

    b.consume(
        start,
        after_verb,
        "verb",
        |t, _| t.is_lexical(Dimension::Verb) && !t.isa(Dimension::Tobe),
        |vp, t| {
            vp.apply_verb(&t.vector);
            Ok(())
        },
    );
    b.consume(
        start,
        after_verb,
        "tobe",
        |t, _| t.is_lexical(Dimension::Tobe),
        |vp, t| {
            vp.apply_tobe(&t.vector);
            Ok(())
        },
    );

    b.consume(
        after_verb,
        trailing,
        "object",
        |t, _| t.is_phrase_level(Dimension::Np) && t.phrase.is_some(),
        |vp, t| {
            if let Some(phrase) = t.effective_phrase() {
                vp.apply_object(phrase.clone(), &t.vector);
            }
            Ok(())
        },
    );
    b.jump(after_verb, trailing, "no-object");

    b.consume(
        trailing,
        trailing,
        "pp",
        |t, _| t.is_phrase_level(Dimension::Pp),
        |vp, t| {
            if let Some(phrase) = t.effective_phrase() {
                vp.apply_pp_token(phrase, &t.vector);
            }
            Ok(())
        },
    );
    b.consume(
        trailing,
        trailing,
        "naming-complement",
        |t, vp| t.is_lexical(Dimension::Quoted) && vp.vector.isa(Dimension::Naming),
        |vp, t| {
            vp.apply_naming_complement(&t.vector);
            Ok(())
        },
    );
    b.consume(
        trailing,
        trailing,
        "complement-adverb",
        |t, vp| t.is_lexical(Dimension::Adv) && takes_adjective_complement(vp),
        |vp, t| {
            vp.apply_adverb(&t.vector);
            Ok(())
        },
    );
    b.consume(
        trailing,
        trailing,
        "adjective-complement",
        |t, vp| t.is_lexical(Dimension::Adj) && takes_adjective_complement(vp),
        |vp, t| {
            vp.apply_adjective_complement(&t.vector);
            Ok(())
        },
    );
    b.jump(trailing, end, "done");

    b.build(start, end)
}

/// Try to parse one VP at the stream's current position.
///
/// # Errors
/// Propagates phrase-building failures; the caller drops the candidate.
pub fn parse_vp(stream: &mut TokenStream<'_>) -> PhraseResult<Option<VerbPhrase>> {
    run_atn(&vp_atn(), stream, VerbPhrase::new())
}
