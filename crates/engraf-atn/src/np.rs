//! The noun-phrase sub-network, run over Layer-1 lexical tokens.
//!
//! Shape: optional determiner, any run of (adverb-scaled) adjectives, a head
//! (noun, pronoun, or `[x,y,z]` literal), and an optional `called '<name>'`
//! annotation. Determiner/noun number agreement is checked when the head
//! noun lands.

use crate::engine::{run_atn, Atn, AtnBuilder};
use crate::stream::TokenStream;
use engraf_core::{Dimension, NounPhrase, PhraseResult};

/// Build the NP sub-network.
#[must_use]
pub fn np_atn() -> Atn<NounPhrase> {
    let mut b = AtnBuilder::<NounPhrase>::new();
    let start = b.node("np-start");
    let mods = b.node("np-mods");
    let post = b.node("np-post");
    let named = b.node("np-named");
    let end = b.node("np-end");

    b.consume(
        start,
        mods,
        "determiner",
        |t, _| t.is_lexical(Dimension::Det),
        |np, t| {
            np.apply_determiner(&t.vector);
            Ok(())
        },
    );
    b.jump(start, mods, "no-determiner");

    b.consume(
        mods,
        mods,
        "adverb",
        |t, _| t.is_lexical(Dimension::Adv),
        |np, t| {
            np.apply_adverb(&t.vector);
            Ok(())
        },
    );
    b.consume(
        mods,
        mods,
        "adjective",
        |t, _| t.is_lexical(Dimension::Adj),
        |np, t| {
            np.apply_adjective(&t.vector);
            Ok(())
        },
    );
    // A verb/noun homograph ("group") in bare position reads as the verb;
    // with a determiner it is unambiguously the noun.
    b.consume(
        mods,
        post,
        "noun",
        |t, np| {
            t.is_lexical(Dimension::Noun)
                && (np.determiner.is_some() || !t.isa(Dimension::Verb))
        },
        |np, t| np.apply_noun(&t.vector),
    );
    b.consume(
        mods,
        post,
        "pronoun",
        |t, np| t.is_lexical(Dimension::Pronoun) && np.determiner.is_none(),
        |np, t| {
            np.apply_pronoun(&t.vector);
            Ok(())
        },
    );
    b.consume(
        mods,
        post,
        "vector-literal",
        |t, _| t.is_lexical(Dimension::VectorLit),
        |np, t| {
            np.apply_vector_literal(&t.vector);
            Ok(())
        },
    );
    // "scale it by 2": a bare numeral can head a measure NP
    b.consume(
        mods,
        post,
        "number-head",
        |t, np| {
            t.is_lexical(Dimension::Det)
                && t.vector.get(Dimension::Number) != 0.0
                && np.determiner.is_none()
        },
        |np, t| {
            np.apply_number_head(&t.vector);
            Ok(())
        },
    );

    // "called 'charlie'" / "named 'sun'"
    b.consume(
        post,
        named,
        "naming-marker",
        |t, _| t.is_lexical(Dimension::Naming) && t.isa(Dimension::VerbPast),
        |np, t| {
            np.apply_naming_marker(&t.vector);
            Ok(())
        },
    );
    b.jump(post, end, "done");
    b.consume(
        named,
        end,
        "proper-name",
        |t, _| t.is_lexical(Dimension::Quoted),
        |np, t| {
            np.apply_proper_noun(&t.vector);
            Ok(())
        },
    );

    b.build(start, end)
}

/// Try to parse one NP at the stream's current position.
///
/// # Errors
/// Propagates number-agreement failures; the caller drops the candidate.
pub fn parse_np(stream: &mut TokenStream<'_>) -> PhraseResult<Option<NounPhrase>> {
    run_atn(&np_atn(), stream, NounPhrase::new())
}
