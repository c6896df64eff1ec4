//! Layer 1 lexical hypothesis generation.

use engraf_core::Dimension;
use engraf_lexicon::{LexiconError, Vocabulary};
use engraf_tokenizer::{tokenize_layer1, TokenizerConfig};

fn layer1(input: &str) -> Vec<engraf_core::Hypothesis> {
    tokenize_layer1(input, &Vocabulary::core(), &TokenizerConfig::default()).unwrap()
}

#[test]
fn simple_sentence_tokenizes_with_full_confidence() {
    let hyps = layer1("draw a red cube");
    let top = &hyps[0];
    assert_eq!(top.token_words(), vec!["draw", "a", "red", "cube"]);
    assert_eq!(top.confidence, 1.0);
    assert!(top.tokens[0].isa(Dimension::Verb));
    assert!(top.tokens[3].isa(Dimension::Noun));
}

#[test]
fn capitalization_and_terminal_punctuation_are_normalized() {
    let hyps = layer1("Draw a red cube.");
    assert_eq!(hyps[0].token_words(), vec!["draw", "a", "red", "cube"]);
}

#[test]
fn compound_preposition_prefers_longest_match() {
    let hyps = layer1("the cube in front of the sphere");
    let top = &hyps[0];
    assert!(top
        .token_words()
        .contains(&"in front of"));
    // the compound factor is 0.85
    assert!((top.confidence - 0.85).abs() < 1e-5);
}

#[test]
fn inflected_words_cost_a_tenth() {
    let hyps = layer1("cubes");
    let top = &hyps[0];
    assert!(top.tokens[0].isa(Dimension::Plural));
    assert!((top.confidence - 0.9).abs() < 1e-5);
}

#[test]
fn unknown_word_amid_known_words_survives_at_low_confidence() {
    let hyps = layer1("draw a florp");
    let top = &hyps[0];
    assert_eq!(top.token_words(), vec!["draw", "a", "florp"]);
    assert!(top.tokens[2].isa(Dimension::Unknown));
    assert!((top.confidence - 0.3).abs() < 1e-5);
}

#[test]
fn single_unknown_word_is_fatal() {
    let err = tokenize_layer1("florp", &Vocabulary::core(), &TokenizerConfig::default())
        .unwrap_err();
    match err {
        LexiconError::UnknownToken { surface, position } => {
            assert_eq!(surface, "florp");
            assert_eq!(position, 0);
        }
    }
}

#[test]
fn empty_input_is_fatal() {
    assert!(tokenize_layer1("", &Vocabulary::core(), &TokenizerConfig::default()).is_err());
    assert!(tokenize_layer1("   ", &Vocabulary::core(), &TokenizerConfig::default()).is_err());
}

#[test]
fn commas_quoted_strings_and_vectors_are_atoms() {
    let hyps = layer1("the cube called 'charlie' at [1, 2, 3], the sphere");
    let top = &hyps[0];
    let words = top.token_words();
    assert!(words.contains(&"charlie"));
    assert!(words.contains(&","));
    let vector_tok = top
        .tokens
        .iter()
        .find(|t| t.isa(Dimension::VectorLit))
        .unwrap();
    assert_eq!(vector_tok.vector.get(Dimension::LocY), 2.0);
}

#[test]
fn hypotheses_are_sorted_by_descending_confidence() {
    let hyps = layer1("move the sphere above the cube");
    for pair in hyps.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}
