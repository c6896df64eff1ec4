//! Behavior of the typed phrase records and composite tokens.

use engraf_core::{
    ConjunctionPhrase, Dimension, Hypothesis, NounPhrase, Phrase, PhraseError,
    PrepositionalPhrase, Token, VectorSpace, VerbPhrase,
};

fn det(word: &str, features: &[(Dimension, f32)]) -> VectorSpace {
    let mut v = VectorSpace::from_word(word, features);
    v.set(Dimension::Det, 1.0);
    v
}

fn adj(word: &str, features: &[(Dimension, f32)]) -> VectorSpace {
    let mut v = VectorSpace::from_word(word, features);
    v.set(Dimension::Adj, 1.0);
    v
}

fn noun(word: &str) -> VectorSpace {
    VectorSpace::from_word(word, &[(Dimension::Noun, 1.0), (Dimension::Singular, 1.0)])
}

fn red_cube_np() -> NounPhrase {
    let mut np = NounPhrase::new();
    np.apply_determiner(&det("the", &[(Dimension::Def, 1.0), (Dimension::Singular, 1.0)]));
    np.apply_adjective(&adj("red", &[(Dimension::Red, 1.0)]));
    np.apply_noun(&noun("cube")).unwrap();
    np
}

#[test]
fn np_composes_constituent_vectors() {
    let np = red_cube_np();
    assert_eq!(np.determiner.as_deref(), Some("the"));
    assert_eq!(np.noun.as_deref(), Some("cube"));
    assert!(np.vector.isa(Dimension::Red));
    assert!(np.vector.isa(Dimension::Noun));
    assert!(np.is_definite());
    assert_eq!(Phrase::Noun(np).original_text(), "the red cube");
}

#[test]
fn adverb_scales_the_following_adjective() {
    let mut np = NounPhrase::new();
    let mut very = VectorSpace::from_word("very", &[(Dimension::Adv, 2.0)]);
    very.set(Dimension::Adv, 2.0);
    np.apply_adverb(&very);
    np.apply_adjective(&adj("big", &[(Dimension::ScaleX, 1.5), (Dimension::ScaleY, 1.5)]));
    np.apply_noun(&noun("sphere")).unwrap();

    // big alone contributes 1.5; "very" doubles it
    assert_eq!(np.vector.get(Dimension::ScaleX), 3.0);
    // the pending scale vector is cleared after one adjective
    let mut np2 = NounPhrase::new();
    np2.apply_adverb(&very);
    np2.apply_adjective(&adj("big", &[(Dimension::ScaleX, 1.5)]));
    np2.apply_adjective(&adj("red", &[(Dimension::Red, 1.0)]));
    assert_eq!(np2.vector.get(Dimension::Red), 1.0);
}

#[test]
fn singular_determiner_rejects_plural_noun() {
    let mut np = NounPhrase::new();
    np.apply_determiner(&det("a", &[(Dimension::Singular, 1.0)]));
    let mut cubes = VectorSpace::from_word("cubes", &[(Dimension::Noun, 1.0)]);
    cubes.set(Dimension::Plural, 1.0);
    let err = np.apply_noun(&cubes).unwrap_err();
    assert!(matches!(err, PhraseError::NumberAgreement { .. }));
}

#[test]
fn numeric_determiner_rejects_singular_noun() {
    let mut np = NounPhrase::new();
    np.apply_determiner(&det("two", &[(Dimension::Number, 2.0)]));
    let err = np.apply_noun(&noun("cube")).unwrap_err();
    assert!(matches!(err, PhraseError::NumberAgreement { .. }));
}

#[test]
fn conjunction_is_plural_and_rejects_mixing() {
    let and_tok = VectorSpace::from_word(
        "and",
        &[(Dimension::Conj, 1.0), (Dimension::And, 1.0)],
    );
    let or_tok = VectorSpace::from_word(
        "or",
        &[(Dimension::Conj, 1.0), (Dimension::Disj, 1.0), (Dimension::Or, 1.0)],
    );
    let mut conj = ConjunctionPhrase::new(
        &and_tok,
        Phrase::Noun(red_cube_np()),
        Phrase::Noun(red_cube_np()),
    );
    assert!(conj.vector.isa(Dimension::Plural));
    assert_eq!(conj.conjunction, "and");

    let err = conj.extend(&or_tok, Phrase::Noun(red_cube_np())).unwrap_err();
    assert!(matches!(err, PhraseError::MixedConjunction { .. }));
}

#[test]
fn comma_chain_adopts_the_final_conjunction() {
    let comma = VectorSpace::from_word(",", &[(Dimension::Comma, 1.0)]);
    let and_tok = VectorSpace::from_word(
        "and",
        &[(Dimension::Conj, 1.0), (Dimension::And, 1.0)],
    );
    let mut conj = ConjunctionPhrase::new(
        &comma,
        Phrase::Noun(red_cube_np()),
        Phrase::Noun(red_cube_np()),
    );
    assert_eq!(conj.conjunction, ",");
    conj.extend(&and_tok, Phrase::Noun(red_cube_np())).unwrap();
    assert_eq!(conj.conjunction, "and");
    assert_eq!(conj.phrases.len(), 3);
    assert_eq!(
        conj.original_text(),
        "the red cube , the red cube and the red cube"
    );
}

#[test]
fn conjunction_structural_equality() {
    let and_tok = VectorSpace::from_word(
        "and",
        &[(Dimension::Conj, 1.0), (Dimension::And, 1.0)],
    );
    let a = ConjunctionPhrase::new(
        &and_tok,
        Phrase::Noun(red_cube_np()),
        Phrase::Noun(red_cube_np()),
    );
    let b = ConjunctionPhrase::new(
        &and_tok,
        Phrase::Noun(red_cube_np()),
        Phrase::Noun(red_cube_np()),
    );
    assert!(a.equals(&b));

    let mut other_np = NounPhrase::new();
    other_np.apply_noun(&noun("sphere")).unwrap();
    let c = ConjunctionPhrase::new(
        &and_tok,
        Phrase::Noun(red_cube_np()),
        Phrase::Noun(other_np),
    );
    assert!(!a.equals(&c));
}

#[test]
fn composite_token_marks_level_and_renders_word() {
    let token = Token::composite(Phrase::Noun(red_cube_np()));
    assert!(token.isa(Dimension::Np));
    assert!(!token.isa(Dimension::Pp));
    assert_eq!(token.word(), Some("NP(the red cube)"));
    let phrase = token.effective_phrase().unwrap();
    assert_eq!(phrase.original_text(), "the red cube");
}

#[test]
fn composite_conjunction_token_carries_conj() {
    let and_tok = VectorSpace::from_word(
        "and",
        &[(Dimension::Conj, 1.0), (Dimension::And, 1.0)],
    );
    let conj = ConjunctionPhrase::new(
        &and_tok,
        Phrase::Noun(red_cube_np()),
        Phrase::Noun(red_cube_np()),
    );
    let token = Token::composite(Phrase::Conjunction(conj));
    assert!(token.isa(Dimension::Np));
    assert!(token.isa(Dimension::Conj));
    assert!(token.word().unwrap().starts_with("CONJ-NP("));
}

#[test]
fn vp_adjective_complement_collects_contributions() {
    let mut vp = VerbPhrase::new();
    let mut make = VectorSpace::from_word("make", &[(Dimension::Verb, 1.0)]);
    make.set(Dimension::Transform, 1.0);
    vp.apply_verb(&make);
    let mut bigger = adj("bigger", &[(Dimension::ScaleX, 1.5), (Dimension::ScaleY, 1.5)]);
    bigger.set(Dimension::Comp, 1.0);
    vp.apply_adjective_complement(&bigger);
    assert_eq!(vp.adjective_complement.len(), 1);
    assert!(vp.vector.get(Dimension::ScaleX) > 1.0);
}

#[test]
fn diagnostic_rendering_uses_phrase_print_strings() {
    let np_token = Token::composite(Phrase::Noun(red_cube_np()));
    let and_tok = VectorSpace::from_word("and", &[(Dimension::Conj, 1.0), (Dimension::And, 1.0)]);
    let lexical = Token::lexical(and_tok.clone());
    let conj = ConjunctionPhrase::new(
        &and_tok,
        Phrase::Noun(red_cube_np()),
        Phrase::Noun(red_cube_np()),
    );
    let conj_token = Token::composite(Phrase::Conjunction(conj));

    let hyp = Hypothesis::new(vec![np_token, lexical, conj_token], 1.0, "diag");
    let rendered = hyp.render_diagnostic();
    assert!(rendered.contains("[0] [NP] the red cube"));
    assert!(rendered.contains("[1] and ="));
    assert!(rendered.contains("[2] [CONJ-NP]"));
    assert!(rendered.contains("*and*"));
}

#[test]
fn structural_rendering_brackets_the_phrase_tree() {
    let mut pp = PrepositionalPhrase::new();
    pp.apply_preposition(&VectorSpace::from_word("above", &[(Dimension::Prep, 1.0)]));
    let inner = Token::composite(Phrase::Noun(red_cube_np()));
    let inner_phrase = inner.effective_phrase().unwrap().clone();
    pp.apply_object(inner_phrase, &inner.vector);

    let mut vp = VerbPhrase::new();
    vp.apply_verb(&VectorSpace::from_word("move", &[(Dimension::Verb, 1.0)]));
    let obj = Token::composite(Phrase::Noun(red_cube_np()));
    let obj_phrase = obj.effective_phrase().unwrap().clone();
    vp.apply_object(obj_phrase, &obj.vector);
    let pp_token = Token::composite(Phrase::Prepositional(pp.clone()));
    vp.apply_pp(pp, &pp_token.vector);

    let hyp = Hypothesis::new(vec![Token::composite(Phrase::Verb(vp))], 1.0, "test");
    assert_eq!(
        hyp.structural_string(),
        "[VP [NP ]NP [PP [NP ]NP ]PP ]VP"
    );
}
