//! The vocabulary: surface word (or multi-word compound) to vector.

use crate::inflection::{self, InflectionConfig};
use std::collections::HashMap;
use tracing::debug;

use engraf_core::Dimension::*;
use engraf_core::{Dimension, VectorSpace};

/// How a lookup matched, driving the Layer-1 confidence product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Exact base-form entry.
    Base,
    /// Derived by the inflection generator.
    Inflected,
    /// Multi-word compound entry.
    Compound,
}

impl MatchKind {
    /// Confidence factor this match contributes at Layer 1.
    #[must_use]
    pub fn confidence(self) -> f32 {
        match self {
            MatchKind::Base => 1.0,
            MatchKind::Inflected => 0.9,
            MatchKind::Compound => 0.85,
        }
    }
}

/// A successful lookup: a fresh vector plus the match kind.
#[derive(Debug, Clone)]
pub struct LexiconMatch {
    pub vector: VectorSpace,
    pub kind: MatchKind,
}

/// Read-only mapping from surface form to semantic vector.
///
/// Multi-word compounds ("left of", "in front of") are keyed by their joined
/// surface; [`Vocabulary::max_compound_words`] tells the tokenizer how far to
/// probe when preferring longest matches.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: HashMap<String, VectorSpace>,
    inflection: InflectionConfig,
    max_compound_words: usize,
}

impl Vocabulary {
    /// An empty vocabulary with default inflection factors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            inflection: InflectionConfig::default(),
            max_compound_words: 1,
        }
    }

    /// The built-in scene vocabulary.
    #[must_use]
    pub fn core() -> Self {
        let mut vocab = Self::new();
        install_core_entries(&mut vocab);
        vocab
    }

    /// Override the inflection factors.
    #[must_use]
    pub fn with_inflection(mut self, config: InflectionConfig) -> Self {
        self.inflection = config;
        self
    }

    /// Add or replace an entry. The surface may contain spaces for compounds.
    pub fn insert(&mut self, surface: &str, features: &[(Dimension, f32)]) {
        let words = surface.split_whitespace().count();
        self.max_compound_words = self.max_compound_words.max(words);
        self.entries
            .insert(surface.to_string(), VectorSpace::from_word(surface, features));
    }

    /// Longest compound length, in words.
    #[must_use]
    pub fn max_compound_words(&self) -> usize {
        self.max_compound_words
    }

    #[must_use]
    pub fn contains(&self, surface: &str) -> bool {
        self.entries.contains_key(surface)
    }

    /// Look up a surface form, trying the exact entry first and the
    /// inflection generator second. Returns a fresh vector each time.
    #[must_use]
    pub fn lookup(&self, surface: &str) -> Option<LexiconMatch> {
        if let Some(entry) = self.entries.get(surface) {
            let kind = if surface.contains(' ') {
                MatchKind::Compound
            } else {
                MatchKind::Base
            };
            return Some(LexiconMatch {
                vector: entry.clone(),
                kind,
            });
        }

        for analysis in inflection::analyze(surface) {
            if let Some(base) = self.entries.get(&analysis.base) {
                if inflection::applies_to(analysis.kind, base) {
                    debug!(surface, base = %analysis.base, "inflected lookup");
                    return Some(LexiconMatch {
                        vector: inflection::derive(analysis.kind, base, surface, &self.inflection),
                        kind: MatchKind::Inflected,
                    });
                }
            }
        }
        None
    }

    /// All lookups for a surface form: the exact/compound entry plus every
    /// applicable inflection, for layers that enumerate lexical ambiguity.
    #[must_use]
    pub fn lookup_all(&self, surface: &str) -> Vec<LexiconMatch> {
        let mut matches = Vec::new();
        if let Some(entry) = self.entries.get(surface) {
            let kind = if surface.contains(' ') {
                MatchKind::Compound
            } else {
                MatchKind::Base
            };
            matches.push(LexiconMatch {
                vector: entry.clone(),
                kind,
            });
        }
        for analysis in inflection::analyze(surface) {
            if let Some(base) = self.entries.get(&analysis.base) {
                if inflection::applies_to(analysis.kind, base) {
                    matches.push(LexiconMatch {
                        vector: inflection::derive(analysis.kind, base, surface, &self.inflection),
                        kind: MatchKind::Inflected,
                    });
                }
            }
        }
        matches
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::core()
    }
}

fn install_core_entries(v: &mut Vocabulary) {
    // Determiners
    v.insert("a", &[(Det, 1.0), (Singular, 1.0)]);
    v.insert("an", &[(Det, 1.0), (Singular, 1.0)]);
    v.insert("the", &[(Det, 1.0), (Def, 1.0)]);
    v.insert("this", &[(Det, 1.0), (Def, 1.0), (Singular, 1.0)]);
    v.insert("that", &[(Det, 1.0), (Def, 1.0), (Singular, 1.0)]);
    v.insert("these", &[(Det, 1.0), (Def, 1.0), (Plural, 1.0)]);
    v.insert("those", &[(Det, 1.0), (Def, 1.0), (Plural, 1.0)]);
    v.insert("all", &[(Det, 1.0), (Def, 1.0), (Plural, 1.0)]);
    v.insert("some", &[(Det, 1.0), (Plural, 1.0)]);
    let numbers = [
        ("one", 1.0),
        ("two", 2.0),
        ("three", 3.0),
        ("four", 4.0),
        ("five", 5.0),
        ("six", 6.0),
        ("seven", 7.0),
        ("eight", 8.0),
        ("nine", 9.0),
        ("ten", 10.0),
    ];
    for (word, value) in numbers {
        if value > 1.0 {
            v.insert(word, &[(Det, 1.0), (Number, value)]);
        } else {
            v.insert(word, &[(Det, 1.0), (Number, value), (Singular, 1.0)]);
        }
    }

    // Pronouns
    v.insert("it", &[(Pronoun, 1.0), (Singular, 1.0)]);
    v.insert("they", &[(Pronoun, 1.0), (Plural, 1.0)]);
    v.insert("them", &[(Pronoun, 1.0), (Plural, 1.0)]);

    // To-be forms
    v.insert("is", &[(Tobe, 1.0), (Singular, 1.0)]);
    v.insert("are", &[(Tobe, 1.0), (Plural, 1.0)]);
    v.insert("was", &[(Tobe, 1.0), (Singular, 1.0), (VerbPast, 1.0)]);
    v.insert("were", &[(Tobe, 1.0), (Plural, 1.0), (VerbPast, 1.0)]);
    v.insert("be", &[(Tobe, 1.0)]);
    v.insert("been", &[(Tobe, 1.0), (VerbPastPart, 1.0)]);
    v.insert("am", &[(Tobe, 1.0), (Singular, 1.0)]);

    // Conjunctions and negation
    v.insert("and", &[(Conj, 1.0), (And, 1.0)]);
    v.insert("or", &[(Conj, 1.0), (Disj, 1.0), (Or, 1.0)]);
    v.insert("not", &[(Neg, 1.0)]);
    v.insert("no", &[(Neg, 1.0)]);

    // Modals and question words
    for word in [
        "can", "could", "may", "might", "must", "shall", "should", "will", "would",
    ] {
        v.insert(word, &[(Modal, 1.0)]);
    }
    for word in ["what", "where", "who", "when", "why", "how"] {
        v.insert(word, &[(Question, 1.0)]);
    }

    // Adverb intensifiers; the adv value is the scaling strength applied to
    // the following adjective.
    v.insert("very", &[(Adv, 1.5)]);
    v.insert("extremely", &[(Adv, 2.0)]);
    v.insert("really", &[(Adv, 1.5)]);
    v.insert("quite", &[(Adv, 1.2)]);
    v.insert("much", &[(Adv, 1.5)]);
    v.insert("slightly", &[(Adv, 0.5)]);

    // Color adjectives
    v.insert("red", &[(Adj, 1.0), (Red, 1.0)]);
    v.insert("green", &[(Adj, 1.0), (Green, 1.0)]);
    v.insert("blue", &[(Adj, 1.0), (Blue, 1.0)]);
    v.insert("yellow", &[(Adj, 1.0), (Red, 1.0), (Green, 1.0)]);
    v.insert("orange", &[(Adj, 1.0), (Red, 1.0), (Green, 0.5)]);
    v.insert("purple", &[(Adj, 1.0), (Red, 0.5), (Blue, 1.0)]);
    v.insert("cyan", &[(Adj, 1.0), (Green, 1.0), (Blue, 1.0)]);
    v.insert("magenta", &[(Adj, 1.0), (Red, 1.0), (Blue, 1.0)]);
    v.insert("white", &[(Adj, 1.0), (Red, 1.0), (Green, 1.0), (Blue, 1.0)]);
    v.insert("black", &[(Adj, 1.0), (Red, 0.05), (Green, 0.05), (Blue, 0.05)]);
    v.insert("gray", &[(Adj, 1.0), (Red, 0.5), (Green, 0.5), (Blue, 0.5)]);

    // Size and shape adjectives
    v.insert(
        "big",
        &[(Adj, 1.0), (ScaleX, 1.5), (ScaleY, 1.5), (ScaleZ, 1.5)],
    );
    v.insert(
        "large",
        &[(Adj, 1.0), (ScaleX, 1.5), (ScaleY, 1.5), (ScaleZ, 1.5)],
    );
    v.insert(
        "huge",
        &[(Adj, 1.0), (ScaleX, 2.0), (ScaleY, 2.0), (ScaleZ, 2.0)],
    );
    v.insert(
        "small",
        &[(Adj, 1.0), (ScaleX, 0.5), (ScaleY, 0.5), (ScaleZ, 0.5)],
    );
    v.insert(
        "little",
        &[(Adj, 1.0), (ScaleX, 0.5), (ScaleY, 0.5), (ScaleZ, 0.5)],
    );
    v.insert(
        "tiny",
        &[(Adj, 1.0), (ScaleX, 0.25), (ScaleY, 0.25), (ScaleZ, 0.25)],
    );
    v.insert("tall", &[(Adj, 1.0), (ScaleY, 1.5)]);
    v.insert("short", &[(Adj, 1.0), (ScaleY, 0.6)]);
    v.insert("wide", &[(Adj, 1.0), (ScaleX, 1.5)]);
    v.insert("narrow", &[(Adj, 1.0), (ScaleX, 0.6)]);
    v.insert("deep", &[(Adj, 1.0), (ScaleZ, 1.5)]);
    v.insert("flat", &[(Adj, 1.0), (ScaleY, 0.3)]);

    // Surface adjectives
    v.insert("rough", &[(Adj, 1.0), (Texture, 1.0)]);
    v.insert("smooth", &[(Adj, 1.0), (Texture, 0.1)]);
    v.insert("shiny", &[(Adj, 1.0), (Texture, 0.3)]);
    v.insert("transparent", &[(Adj, 1.0), (Transparency, 1.0)]);
    v.insert("clear", &[(Adj, 1.0), (Transparency, 1.0)]);
    v.insert("opaque", &[(Adj, 1.0), (Transparency, 0.05)]);

    // Shape nouns
    for word in [
        "cube", "box", "sphere", "ball", "cylinder", "cone", "pyramid", "arch", "circle",
        "square", "triangle", "ellipsoid", "table", "object", "shape", "thing",
    ] {
        v.insert(word, &[(Noun, 1.0), (Singular, 1.0)]);
    }
    // Assembly nouns
    for word in ["assembly", "house", "tower"] {
        v.insert(word, &[(Noun, 1.0), (Singular, 1.0), (Assembly, 1.0)]);
    }
    // "group" is both the assembly noun and the organize verb; one entry
    // carries both categories and the phrase ATNs pick the reading.
    v.insert(
        "group",
        &[
            (Noun, 1.0),
            (Singular, 1.0),
            (Assembly, 1.0),
            (Verb, 1.0),
            (Action, 1.0),
            (Organize, 1.0),
        ],
    );
    // Measurement units
    for word in ["degree", "meter", "pixel", "unit"] {
        v.insert(word, &[(Noun, 1.0), (Singular, 1.0), (Unit, 1.0)]);
    }

    // Creation verbs
    for word in ["draw", "create", "place", "add", "build"] {
        v.insert(word, &[(Verb, 1.0), (Action, 1.0), (Create, 1.0)]);
    }
    // "make" both creates ("make a cube") and transforms ("make it bigger")
    v.insert(
        "make",
        &[(Verb, 1.0), (Action, 1.0), (Create, 1.0), (Transform, 1.0)],
    );
    v.insert(
        "put",
        &[(Verb, 1.0), (Action, 1.0), (Create, 1.0), (Move, 0.5)],
    );

    // Transform verbs
    for word in ["move", "shift", "translate"] {
        v.insert(
            word,
            &[(Verb, 1.0), (Action, 1.0), (Transform, 1.0), (Move, 1.0)],
        );
    }
    for word in ["rotate", "spin", "turn"] {
        v.insert(
            word,
            &[(Verb, 1.0), (Action, 1.0), (Transform, 1.0), (Rotate, 1.0)],
        );
    }
    for word in ["scale", "resize", "shrink", "grow"] {
        v.insert(
            word,
            &[(Verb, 1.0), (Action, 1.0), (Transform, 1.0), (Scale, 1.0)],
        );
    }
    for word in ["color", "paint", "texture"] {
        v.insert(
            word,
            &[(Verb, 1.0), (Action, 1.0), (Transform, 1.0), (Style, 1.0)],
        );
    }

    // Organization, editing, selection, naming verbs
    for word in ["ungroup", "align", "arrange", "position"] {
        v.insert(word, &[(Verb, 1.0), (Action, 1.0), (Organize, 1.0)]);
    }
    for word in ["delete", "remove", "erase", "undo", "redo", "copy", "paste"] {
        v.insert(word, &[(Verb, 1.0), (Action, 1.0), (Edit, 1.0)]);
    }
    for word in ["select", "choose", "pick"] {
        v.insert(word, &[(Verb, 1.0), (Action, 1.0), (Select, 1.0)]);
    }
    for word in ["call", "name"] {
        v.insert(word, &[(Verb, 1.0), (Action, 1.0), (Naming, 1.0)]);
    }

    // Prepositions: spatial placement carries a unit offset on the relevant
    // location dimension so the interpreter can derive placement deltas.
    v.insert("at", &[(Prep, 1.0), (SpatialLocation, 1.0), (SpatialProximity, 1.0)]);
    v.insert("in", &[(Prep, 1.0), (SpatialLocation, 1.0), (SpatialProximity, 0.5)]);
    v.insert("on", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocY, 1.0)]);
    v.insert("above", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocY, 1.0)]);
    v.insert("over", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocY, 1.0)]);
    v.insert("below", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocY, -1.0)]);
    v.insert("under", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocY, -1.0)]);
    v.insert("beside", &[(Prep, 1.0), (SpatialProximity, 1.0), (LocX, 1.0)]);
    v.insert("near", &[(Prep, 1.0), (SpatialProximity, 1.0)]);
    v.insert("behind", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocZ, -1.0)]);
    v.insert("between", &[(Prep, 1.0), (SpatialLocation, 1.0), (SpatialProximity, 0.5)]);
    v.insert("to", &[(Prep, 1.0), (DirectionalTarget, 1.0)]);
    v.insert("from", &[(Prep, 1.0), (DirectionalTarget, -1.0)]);
    v.insert("toward", &[(Prep, 1.0), (DirectionalTarget, 0.5)]);
    v.insert("by", &[(Prep, 1.0), (DirectionalAgency, 1.0)]);
    v.insert("with", &[(Prep, 1.0), (DirectionalAgency, 0.5)]);
    v.insert("of", &[(Prep, 1.0), (RelationalPossession, 1.0)]);
    v.insert("than", &[(Prep, 1.0), (RelationalComparison, 1.0)]);

    // Multi-word compound prepositions; Layer 1 prefers longest match.
    v.insert("next to", &[(Prep, 1.0), (SpatialProximity, 1.0), (LocX, 1.0)]);
    v.insert("left of", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocX, -1.0)]);
    v.insert("right of", &[(Prep, 1.0), (SpatialLocation, 1.0), (LocX, 1.0)]);
    v.insert(
        "in front of",
        &[(Prep, 1.0), (SpatialLocation, 1.0), (LocZ, 1.0)],
    );
    v.insert(
        "on top of",
        &[(Prep, 1.0), (SpatialLocation, 1.0), (LocY, 1.0)],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_lookup_is_exact() {
        let vocab = Vocabulary::core();
        let m = vocab.lookup("cube").unwrap();
        assert_eq!(m.kind, MatchKind::Base);
        assert!(m.vector.isa(Noun));
        assert_eq!(m.vector.word(), Some("cube"));
    }

    #[test]
    fn compound_lookup_prefers_joined_surface() {
        let vocab = Vocabulary::core();
        let m = vocab.lookup("in front of").unwrap();
        assert_eq!(m.kind, MatchKind::Compound);
        assert!(m.vector.isa(Prep));
        assert!(vocab.max_compound_words() >= 3);
    }

    #[test]
    fn inflected_lookup_derives_plural() {
        let vocab = Vocabulary::core();
        let m = vocab.lookup("cubes").unwrap();
        assert_eq!(m.kind, MatchKind::Inflected);
        assert!(m.vector.isa(Plural));
        assert_eq!(m.vector.word(), Some("cubes"));
    }

    #[test]
    fn unknown_word_misses() {
        let vocab = Vocabulary::core();
        assert!(vocab.lookup("florp").is_none());
    }

    #[test]
    fn match_kind_confidences() {
        assert_eq!(MatchKind::Base.confidence(), 1.0);
        assert_eq!(MatchKind::Inflected.confidence(), 0.9);
        assert_eq!(MatchKind::Compound.confidence(), 0.85);
    }
}
