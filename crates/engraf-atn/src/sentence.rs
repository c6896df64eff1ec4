//! The sentence sub-network, run over Layer-4 tokens.
//!
//! Shape: optional question marker or sentence-initial to-be, optional
//! subject NP, then either a VP-token predicate or a copular complement
//! ("the cube is red"). Imperatives have no subject.

use crate::engine::{run_atn, Atn, AtnBuilder};
use crate::stream::TokenStream;
use engraf_core::{Dimension, PhraseResult, SentencePhrase};

/// Build the sentence sub-network.
#[must_use]
pub fn sentence_atn() -> Atn<SentencePhrase> {
    let mut b = AtnBuilder::<SentencePhrase>::new();
    let start = b.node("sp-start");
    let subj = b.node("sp-subject");
    let pred = b.node("sp-predicate");
    let copular = b.node("sp-copular");
    let complement = b.node("sp-complement");
    let end = b.node("sp-end");

    b.consume(
        start,
        subj,
        "question-word",
        |t, _| t.is_lexical(Dimension::Question),
        |sp, t| {
            sp.apply_question_marker(&t.vector);
            Ok(())
        },
    );
    b.consume(
        start,
        subj,
        "inverted-tobe",
        |t, _| t.is_lexical(Dimension::Tobe),
        |sp, t| {
            sp.apply_tobe(&t.vector);
            sp.vector.set(Dimension::Question, 1.0);
            Ok(())
        },
    );
    b.jump(start, subj, "declarative");

    b.consume(
        subj,
        pred,
        "subject",
        |t, _| t.is_phrase_level(Dimension::Np) && t.phrase.is_some(),
        |sp, t| {
            if let Some(phrase) = t.effective_phrase() {
                sp.apply_subject(phrase.clone(), &t.vector);
            }
            Ok(())
        },
    );
    b.jump(subj, pred, "imperative");

    b.consume(
        pred,
        end,
        "vp-predicate",
        |t, _| t.is_phrase_level(Dimension::Vp) && t.phrase.is_some(),
        |sp, t| {
            if let Some(phrase) = t.effective_phrase() {
                sp.apply_predicate(phrase.clone(), &t.vector);
            }
            Ok(())
        },
    );
    b.consume(
        pred,
        copular,
        "tobe",
        |t, _| t.is_lexical(Dimension::Tobe),
        |sp, t| {
            sp.apply_tobe(&t.vector);
            Ok(())
        },
    );
    // An inverted to-be consumed at sentence start skips straight to the
    // complement once the subject has landed.
    b.jump_if(pred, copular, "tobe-already-seen", |sp| sp.tobe.is_some());

    b.consume(
        copular,
        copular,
        "complement-adverb",
        |t, _| t.is_lexical(Dimension::Adv),
        |sp, t| {
            sp.apply_adverb(&t.vector);
            Ok(())
        },
    );
    b.consume(
        copular,
        complement,
        "complement-adjective",
        |t, _| t.is_lexical(Dimension::Adj),
        |sp, t| {
            sp.apply_adjective(&t.vector);
            Ok(())
        },
    );
    b.consume(
        complement,
        complement,
        "complement-adjective",
        |t, _| t.is_lexical(Dimension::Adj),
        |sp, t| {
            sp.apply_adjective(&t.vector);
            Ok(())
        },
    );
    b.jump(complement, end, "done");

    b.build(start, end)
}

/// Try to parse one sentence at the stream's current position.
///
/// # Errors
/// Propagates phrase-building failures; the caller drops the candidate.
pub fn parse_sentence(stream: &mut TokenStream<'_>) -> PhraseResult<Option<SentencePhrase>> {
    run_atn(&sentence_atn(), stream, SentencePhrase::new())
}
