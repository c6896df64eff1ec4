//! Lookup contract of the core vocabulary.

use engraf_core::Dimension;
use engraf_lexicon::{parse_quoted_literal, parse_vector_literal, MatchKind, Vocabulary};

#[test]
fn category_coverage_of_core_vocabulary() {
    let vocab = Vocabulary::core();
    let checks = [
        ("the", Dimension::Det),
        ("a", Dimension::Det),
        ("it", Dimension::Pronoun),
        ("is", Dimension::Tobe),
        ("and", Dimension::Conj),
        ("or", Dimension::Disj),
        ("not", Dimension::Neg),
        ("would", Dimension::Modal),
        ("what", Dimension::Question),
        ("very", Dimension::Adv),
        ("red", Dimension::Adj),
        ("cube", Dimension::Noun),
        ("draw", Dimension::Verb),
        ("above", Dimension::Prep),
    ];
    for (word, dim) in checks {
        let m = vocab.lookup(word).unwrap_or_else(|| panic!("missing '{word}'"));
        assert!(m.vector.isa(dim), "'{word}' should be {}", dim.name());
    }
}

#[test]
fn verb_intent_dimensions() {
    let vocab = Vocabulary::core();
    assert!(vocab.lookup("draw").unwrap().vector.isa(Dimension::Create));
    assert!(vocab.lookup("move").unwrap().vector.isa(Dimension::Move));
    assert!(vocab.lookup("rotate").unwrap().vector.isa(Dimension::Rotate));
    assert!(vocab.lookup("color").unwrap().vector.isa(Dimension::Style));
    assert!(vocab.lookup("delete").unwrap().vector.isa(Dimension::Edit));
    assert!(vocab.lookup("call").unwrap().vector.isa(Dimension::Naming));
    assert!(vocab.lookup("group").unwrap().vector.isa(Dimension::Organize));
    // "make" covers both creation and transformation
    let make = vocab.lookup("make").unwrap().vector;
    assert!(make.isa(Dimension::Create));
    assert!(make.isa(Dimension::Transform));
}

#[test]
fn compound_prepositions_have_location_content() {
    let vocab = Vocabulary::core();
    let left = vocab.lookup("left of").unwrap();
    assert_eq!(left.kind, MatchKind::Compound);
    assert!(left.vector.get(Dimension::LocX) < 0.0);
    let right = vocab.lookup("right of").unwrap();
    assert!(right.vector.get(Dimension::LocX) > 0.0);
    let front = vocab.lookup("in front of").unwrap();
    assert!(front.vector.get(Dimension::LocZ) > 0.0);
}

#[test]
fn inflections_cover_all_four_classes() {
    let vocab = Vocabulary::core();
    // plural noun
    let spheres = vocab.lookup("spheres").unwrap();
    assert_eq!(spheres.kind, MatchKind::Inflected);
    assert!(spheres.vector.isa(Dimension::Plural));
    // past tense verb
    let moved = vocab.lookup("moved").unwrap();
    assert!(moved.vector.isa(Dimension::VerbPast));
    // gerund
    let drawing = vocab.lookup("drawing").unwrap();
    assert!(drawing.vector.isa(Dimension::VerbPresentPart));
    // comparative strengthens the scalar dimension
    let bigger = vocab.lookup("bigger").unwrap();
    assert!(bigger.vector.isa(Dimension::Comp));
    let base = vocab.lookup("big").unwrap();
    assert!(bigger.vector.get(Dimension::ScaleX) > base.vector.get(Dimension::ScaleX));
    // superlative is stronger still
    let biggest = vocab.lookup("biggest").unwrap();
    assert!(biggest.vector.isa(Dimension::Super));
    assert!(biggest.vector.get(Dimension::ScaleX) > bigger.vector.get(Dimension::ScaleX));
}

#[test]
fn naming_verbs_inflect_for_called_syntax() {
    let vocab = Vocabulary::core();
    let called = vocab.lookup("called").unwrap();
    assert!(called.vector.isa(Dimension::Naming));
    assert!(called.vector.isa(Dimension::VerbPast));
    let named = vocab.lookup("named").unwrap();
    assert!(named.vector.isa(Dimension::Naming));
}

#[test]
fn literal_recognizers() {
    let v = parse_vector_literal("[1,2,3]").unwrap();
    assert!(v.isa(Dimension::VectorLit));
    assert_eq!(v.get(Dimension::LocY), 2.0);

    let q = parse_quoted_literal("'charlie'").unwrap();
    assert!(q.isa(Dimension::Quoted));
    assert_eq!(q.word(), Some("charlie"));
}

#[test]
fn lookups_return_fresh_vectors() {
    let vocab = Vocabulary::core();
    let mut first = vocab.lookup("cube").unwrap().vector;
    first.set(Dimension::Red, 1.0);
    let second = vocab.lookup("cube").unwrap().vector;
    assert!(!second.isa(Dimension::Red));
}
