//! Typed phrase records.
//!
//! Phrases are a tagged variant rather than an inheritance tree: every
//! operation that needs to act on "some phrase" matches on [`Phrase`].
//! A phrase owns the lexical tokens it consumed; composite tokens reference
//! phrases through shared ownership (see [`crate::token::Token`]). Nothing is
//! mutated after a phrase leaves its builder, so the token/phrase references
//! never form update cycles; grounding and attachment clone-and-rebuild.

use crate::dimensions::Dimension;
use crate::error::{PhraseError, PhraseResult};
use crate::vector::VectorSpace;
use serde::{Deserialize, Serialize};

/// Scene binding attached to a noun phrase by Layer-2 grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grounding {
    /// Ids of the scene entities this phrase denotes. Non-empty on success.
    pub object_ids: Vec<String>,
    /// Grounding confidence in [0, 1].
    pub confidence: f32,
    /// True when the phrase deliberately denotes several entities.
    pub multiple: bool,
}

/// A noun phrase: optional determiner, modifiers folded into the vector, and
/// a head noun, pronoun, or vector literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NounPhrase {
    pub vector: VectorSpace,
    pub determiner: Option<String>,
    pub noun: Option<String>,
    pub pronoun: Option<String>,
    pub proper_noun: Option<String>,
    pub preps: Vec<PrepositionalPhrase>,
    pub grounding: Option<Grounding>,
    consumed: Vec<VectorSpace>,
    scale_vector: Option<VectorSpace>,
}

impl NounPhrase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_determiner(&mut self, tok: &VectorSpace) {
        self.determiner = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    /// Adverbs are held in a pending scale vector until the next adjective.
    pub fn apply_adverb(&mut self, tok: &VectorSpace) {
        let scale = self.scale_vector.get_or_insert_with(VectorSpace::new);
        *scale += tok;
        self.consumed.push(tok.clone());
    }

    /// Fold an adjective into the vector, intensified by any pending adverb.
    pub fn apply_adjective(&mut self, tok: &VectorSpace) {
        match self.scale_vector.take() {
            Some(scale) => {
                let strength = scale.scalar_projection(Dimension::Adv);
                self.vector += &(tok * strength);
            }
            None => self.vector += tok,
        }
        self.consumed.push(tok.clone());
    }

    /// Install the head noun, checking determiner/noun number agreement.
    ///
    /// # Errors
    /// [`PhraseError::NumberAgreement`] when a singular determiner meets a
    /// plural noun or a numeric determiner > 1 meets a singular noun. The
    /// enclosing hypothesis is dropped; others continue.
    pub fn apply_noun(&mut self, tok: &VectorSpace) -> PhraseResult<()> {
        if let Some(det) = &self.determiner {
            let noun_plural = tok.isa(Dimension::Plural);
            let det_singular = self.vector.isa(Dimension::Singular);
            let det_number = self.vector.get(Dimension::Number);
            if (det_singular && noun_plural) || (det_number > 1.0 && !noun_plural) {
                return Err(PhraseError::NumberAgreement {
                    determiner: det.clone(),
                    noun: tok.word().unwrap_or("?").to_string(),
                });
            }
        }
        self.noun = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
        Ok(())
    }

    pub fn apply_pronoun(&mut self, tok: &VectorSpace) {
        self.pronoun = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    /// A bare `[x,y,z]` literal standing in head-noun position.
    pub fn apply_vector_literal(&mut self, tok: &VectorSpace) {
        self.noun = Some("vector".to_string());
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    /// A bare numeral standing in head position, as in "scale it by 2".
    pub fn apply_number_head(&mut self, tok: &VectorSpace) {
        self.noun = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    /// Record a proper name from `called '<name>'` syntax. Naming is a
    /// directive, not semantic content, so the vector is left alone.
    pub fn apply_proper_noun(&mut self, name_tok: &VectorSpace) {
        self.proper_noun = name_tok.word().map(str::to_string);
        self.consumed.push(name_tok.clone());
    }

    /// Record the `called`/`named` marker word itself.
    pub fn apply_naming_marker(&mut self, tok: &VectorSpace) {
        self.consumed.push(tok.clone());
    }

    /// Attach a post-modifying prepositional phrase.
    pub fn attach_pp(&mut self, pp: PrepositionalPhrase) {
        self.vector += &pp.vector;
        self.preps.push(pp);
    }

    #[must_use]
    pub fn is_pronoun(&self) -> bool {
        self.pronoun.is_some()
    }

    #[must_use]
    pub fn is_plural(&self) -> bool {
        self.vector.isa(Dimension::Plural)
    }

    #[must_use]
    pub fn is_definite(&self) -> bool {
        self.vector.isa(Dimension::Def)
    }

    #[must_use]
    pub fn consumed_tokens(&self) -> &[VectorSpace] {
        &self.consumed
    }

    #[must_use]
    pub fn consumed_words(&self) -> Vec<&str> {
        self.consumed.iter().filter_map(VectorSpace::word).collect()
    }
}

/// A prepositional phrase: preposition plus an embedded noun phrase or a bare
/// vector literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrepositionalPhrase {
    pub vector: VectorSpace,
    /// Bare preposition surface; a leading "not" is carried in `negated`.
    pub preposition: Option<String>,
    pub negated: bool,
    pub vector_literal: Option<VectorSpace>,
    /// Embedded object: a [`Phrase::Noun`] or a coordination of them.
    pub object: Option<Box<Phrase>>,
    consumed: Vec<VectorSpace>,
}

impl PrepositionalPhrase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_negation(&mut self, tok: &VectorSpace) {
        self.negated = true;
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    pub fn apply_preposition(&mut self, tok: &VectorSpace) {
        self.preposition = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    pub fn apply_vector_literal(&mut self, tok: &VectorSpace) {
        self.vector_literal = Some(tok.clone());
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    /// Install the object of the preposition from a Layer-2 composite token.
    pub fn apply_object(&mut self, phrase: Phrase, token_vector: &VectorSpace) {
        self.vector += token_vector;
        self.consumed
            .push(token_vector.clone().with_word(phrase.original_text()));
        self.object = Some(Box::new(phrase));
    }

    /// The embedded noun phrase, looking through coordination to the first.
    #[must_use]
    pub fn noun_phrase(&self) -> Option<&NounPhrase> {
        match self.object.as_deref() {
            Some(Phrase::Noun(np)) => Some(np),
            Some(Phrase::Conjunction(conj)) => conj.phrases.iter().find_map(|p| match p {
                Phrase::Noun(np) => Some(np),
                _ => None,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn consumed_tokens(&self) -> &[VectorSpace] {
        &self.consumed
    }
}

/// A verb phrase: verb, optional object NP, prepositional modifiers, and an
/// optional adjective complement for transform verbs ("make it bigger").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerbPhrase {
    pub vector: VectorSpace,
    pub verb: Option<String>,
    /// Set for copular verbs ("is", "are"); the VP then carries `tobe=1`.
    pub tobe: Option<String>,
    pub object: Option<Box<Phrase>>,
    pub preps: Vec<PrepositionalPhrase>,
    pub adjective_complement: Vec<VectorSpace>,
    /// Quoted name following a naming verb ("call it 'fred'").
    pub naming_complement: Option<String>,
    consumed: Vec<VectorSpace>,
    scale_vector: Option<VectorSpace>,
}

impl VerbPhrase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_verb(&mut self, tok: &VectorSpace) {
        self.verb = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    pub fn apply_tobe(&mut self, tok: &VectorSpace) {
        self.tobe = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    pub fn apply_object(&mut self, phrase: Phrase, token_vector: &VectorSpace) {
        self.vector += token_vector;
        self.consumed
            .push(token_vector.clone().with_word(phrase.original_text()));
        self.object = Some(Box::new(phrase));
    }

    pub fn apply_pp(&mut self, pp: PrepositionalPhrase, token_vector: &VectorSpace) {
        self.vector += token_vector;
        self.consumed
            .push(token_vector.clone().with_word(pp_text(&pp)));
        self.preps.push(pp);
    }

    /// Consume a Layer-3 PP token, flattening a coordinated PP into its
    /// member phrases.
    pub fn apply_pp_token(&mut self, phrase: &Phrase, token_vector: &VectorSpace) {
        self.vector += token_vector;
        self.consumed
            .push(token_vector.clone().with_word(phrase.original_text()));
        match phrase {
            Phrase::Prepositional(pp) => self.preps.push(pp.clone()),
            Phrase::Conjunction(conj) => self.preps.extend(
                conj.phrases
                    .iter()
                    .filter_map(Phrase::as_prepositional)
                    .cloned(),
            ),
            _ => {}
        }
    }

    pub fn apply_adverb(&mut self, tok: &VectorSpace) {
        let scale = self.scale_vector.get_or_insert_with(VectorSpace::new);
        *scale += tok;
        self.consumed.push(tok.clone());
    }

    /// Quoted proper-name complement of a naming verb.
    pub fn apply_naming_complement(&mut self, tok: &VectorSpace) {
        self.naming_complement = tok.word().map(str::to_string);
        self.consumed.push(tok.clone());
    }

    /// Adjective complement of a transform verb, adverb-scaled like NP
    /// adjectives.
    pub fn apply_adjective_complement(&mut self, tok: &VectorSpace) {
        let contribution = match self.scale_vector.take() {
            Some(scale) => tok * scale.scalar_projection(Dimension::Adv),
            None => tok.clone(),
        };
        self.vector += &contribution;
        self.adjective_complement.push(contribution);
        self.consumed.push(tok.clone());
    }

    #[must_use]
    pub fn is_tobe(&self) -> bool {
        self.tobe.is_some()
    }

    /// The object noun phrase, looking through coordination to the first.
    #[must_use]
    pub fn object_noun_phrase(&self) -> Option<&NounPhrase> {
        match self.object.as_deref() {
            Some(Phrase::Noun(np)) => Some(np),
            Some(Phrase::Conjunction(conj)) => conj.phrases.iter().find_map(|p| match p {
                Phrase::Noun(np) => Some(np),
                _ => None,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn consumed_tokens(&self) -> &[VectorSpace] {
        &self.consumed
    }
}

/// A sentence: optional subject, optional to-be, and a predicate that is
/// either a verb phrase, a coordination of verb phrases, or a bare vector
/// complement ("the cube is red").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SentencePhrase {
    pub vector: VectorSpace,
    pub subject: Option<Box<Phrase>>,
    pub tobe: Option<String>,
    pub predicate: Option<Box<Phrase>>,
    /// Accumulated adjective content of a copular predicate.
    pub complement: Option<VectorSpace>,
    consumed: Vec<VectorSpace>,
    scale_vector: Option<VectorSpace>,
}

impl SentencePhrase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_subject(&mut self, phrase: Phrase, token_vector: &VectorSpace) {
        self.vector += token_vector;
        self.consumed
            .push(token_vector.clone().with_word(phrase.original_text()));
        self.subject = Some(Box::new(phrase));
    }

    pub fn apply_tobe(&mut self, tok: &VectorSpace) {
        self.tobe = tok.word().map(str::to_string);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    pub fn apply_question_marker(&mut self, tok: &VectorSpace) {
        self.vector.set(Dimension::Question, 1.0);
        self.vector += tok;
        self.consumed.push(tok.clone());
    }

    pub fn apply_predicate(&mut self, phrase: Phrase, token_vector: &VectorSpace) {
        self.vector += token_vector;
        self.consumed
            .push(token_vector.clone().with_word(phrase.original_text()));
        // A copular predicate surfaces its to-be marker and adjective
        // complement at sentence level ("the cube is red").
        if let Phrase::Verb(vp) = &phrase {
            if vp.is_tobe() {
                self.tobe = vp.tobe.clone();
                for contribution in &vp.adjective_complement {
                    match &mut self.complement {
                        Some(c) => *c += contribution,
                        None => self.complement = Some(contribution.clone()),
                    }
                }
                // Subjectless tobe with an object NP is an inverted question
                // ("is the cube red").
                if self.subject.is_none() && vp.object.is_some() {
                    self.vector.set(Dimension::Question, 1.0);
                }
            }
        }
        self.predicate = Some(Box::new(phrase));
    }

    pub fn apply_adverb(&mut self, tok: &VectorSpace) {
        let scale = self.scale_vector.get_or_insert_with(VectorSpace::new);
        *scale += tok;
        self.consumed.push(tok.clone());
    }

    /// Adjective of a copular predicate, folded into the complement vector.
    pub fn apply_adjective(&mut self, tok: &VectorSpace) {
        let contribution = match self.scale_vector.take() {
            Some(scale) => tok * scale.scalar_projection(Dimension::Adv),
            None => tok.clone(),
        };
        self.vector += &contribution;
        match &mut self.complement {
            Some(c) => *c += &contribution,
            None => self.complement = Some(contribution),
        }
        self.consumed.push(tok.clone());
    }

    #[must_use]
    pub fn is_question(&self) -> bool {
        self.vector.isa(Dimension::Question)
    }

    #[must_use]
    pub fn consumed_tokens(&self) -> &[VectorSpace] {
        &self.consumed
    }
}

/// A coordination of homogeneous sub-phrases joined by "and" or "or".
#[derive(Debug, Clone, PartialEq)]
pub struct ConjunctionPhrase {
    /// "and", "or", or "," while the chain is still comma-only.
    pub conjunction: String,
    pub vector: VectorSpace,
    pub phrases: Vec<Phrase>,
    /// Surface separators between successive sub-phrases.
    separators: Vec<String>,
}

impl ConjunctionPhrase {
    /// Start a coordination from two phrases and the joining token.
    #[must_use]
    pub fn new(conj_tok: &VectorSpace, left: Phrase, right: Phrase) -> Self {
        let mut vector = left.vector() + right.vector();
        vector += conj_tok;
        vector.set(Dimension::Plural, 1.0);
        let separator = conj_tok.word().unwrap_or("and").to_string();
        Self {
            conjunction: separator.clone(),
            vector,
            phrases: vec![left, right],
            separators: vec![separator],
        }
    }

    /// Chain one more phrase onto the coordination.
    ///
    /// # Errors
    /// [`PhraseError::MixedConjunction`] when "and" and "or" appear in the
    /// same chain; the containing coordination parse is abandoned.
    pub fn extend(&mut self, conj_tok: &VectorSpace, phrase: Phrase) -> PhraseResult<()> {
        let incoming = conj_tok.word().unwrap_or(",");
        if incoming != "," {
            if self.conjunction != "," && self.conjunction != incoming {
                return Err(PhraseError::MixedConjunction {
                    first: self.conjunction.clone(),
                    second: incoming.to_string(),
                });
            }
            self.conjunction = incoming.to_string();
        }
        self.vector += &phrase.vector();
        self.vector += conj_tok;
        self.separators.push(incoming.to_string());
        self.phrases.push(phrase);
        Ok(())
    }

    #[must_use]
    pub fn is_disjunction(&self) -> bool {
        self.vector.isa(Dimension::Disj)
    }

    /// Flatten to the noun phrases of this coordination, in order.
    #[must_use]
    pub fn noun_phrases(&self) -> Vec<&NounPhrase> {
        self.phrases
            .iter()
            .filter_map(|p| match p {
                Phrase::Noun(np) => Some(np),
                _ => None,
            })
            .collect()
    }

    /// Structural equality: same conjunction, same length, pairwise-equal
    /// sub-phrases.
    #[must_use]
    pub fn equals(&self, other: &ConjunctionPhrase) -> bool {
        self.conjunction == other.conjunction
            && self.phrases.len() == other.phrases.len()
            && self.phrases.iter().zip(&other.phrases).all(|(a, b)| a == b)
    }

    #[must_use]
    pub fn original_text(&self) -> String {
        let mut out = String::new();
        for (i, phrase) in self.phrases.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(&self.separators[i - 1]);
                out.push(' ');
            }
            out.push_str(&phrase.original_text());
        }
        out
    }
}

fn pp_text(pp: &PrepositionalPhrase) -> String {
    pp.consumed_tokens()
        .iter()
        .filter_map(VectorSpace::word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The tagged phrase variant. Operations dispatch on the tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Phrase {
    Noun(NounPhrase),
    Prepositional(PrepositionalPhrase),
    Verb(VerbPhrase),
    Sentence(SentencePhrase),
    Conjunction(ConjunctionPhrase),
}

impl Phrase {
    /// The composite vector of this phrase.
    #[must_use]
    pub fn vector(&self) -> VectorSpace {
        match self {
            Phrase::Noun(p) => p.vector.clone(),
            Phrase::Prepositional(p) => p.vector.clone(),
            Phrase::Verb(p) => p.vector.clone(),
            Phrase::Sentence(p) => p.vector.clone(),
            Phrase::Conjunction(p) => p.vector.clone(),
        }
    }

    /// The phrase-level dimension marking composite tokens of this phrase.
    /// Coordinations take the level of their sub-phrases.
    #[must_use]
    pub fn level_dimension(&self) -> Dimension {
        match self {
            Phrase::Noun(_) => Dimension::Np,
            Phrase::Prepositional(_) => Dimension::Pp,
            Phrase::Verb(_) => Dimension::Vp,
            Phrase::Sentence(_) => Dimension::Sp,
            Phrase::Conjunction(conj) => conj
                .phrases
                .first()
                .map_or(Dimension::Np, Phrase::level_dimension),
        }
    }

    /// Concatenation of the surface words this phrase consumed.
    #[must_use]
    pub fn original_text(&self) -> String {
        fn join(tokens: &[VectorSpace]) -> String {
            tokens
                .iter()
                .filter_map(VectorSpace::word)
                .collect::<Vec<_>>()
                .join(" ")
        }
        match self {
            Phrase::Noun(p) => join(&p.consumed),
            Phrase::Prepositional(p) => join(&p.consumed),
            Phrase::Verb(p) => join(&p.consumed),
            Phrase::Sentence(p) => join(&p.consumed),
            Phrase::Conjunction(p) => p.original_text(),
        }
    }

    /// Human-readable diagnostic rendering.
    #[must_use]
    pub fn print_string(&self) -> String {
        match self {
            Phrase::Noun(np) => match &np.grounding {
                Some(g) if !g.object_ids.is_empty() => {
                    format!(
                        "{} ({})",
                        np.noun.as_deref().unwrap_or("?"),
                        g.object_ids.join(", ")
                    )
                }
                _ => self.original_text(),
            },
            Phrase::Prepositional(pp) => {
                let prep = pp.preposition.as_deref().unwrap_or("?");
                let object = match (&pp.vector_literal, &pp.object) {
                    (Some(lit), _) => lit.word().unwrap_or("[vector]").to_string(),
                    (None, Some(obj)) => obj.print_string(),
                    (None, None) => String::new(),
                };
                if pp.negated {
                    format!("not {prep} {object}")
                } else {
                    format!("{prep} {object}")
                }
            }
            Phrase::Verb(vp) => {
                let mut parts = Vec::new();
                if let Some(v) = &vp.verb {
                    parts.push(v.clone());
                }
                if let Some(tobe) = &vp.tobe {
                    parts.push(tobe.clone());
                }
                if let Some(obj) = &vp.object {
                    parts.push(obj.print_string());
                }
                for pp in &vp.preps {
                    parts.push(Phrase::Prepositional(pp.clone()).print_string());
                }
                parts.join(" ")
            }
            Phrase::Sentence(sp) => {
                let mut parts = Vec::new();
                if let Some(subject) = &sp.subject {
                    parts.push(subject.print_string());
                }
                if let Some(tobe) = &sp.tobe {
                    parts.push(tobe.clone());
                }
                match &sp.predicate {
                    Some(pred) => parts.push(pred.print_string()),
                    None => {
                        if sp.complement.is_some() {
                            parts.push(self.original_text());
                        }
                    }
                }
                parts.join(" ")
            }
            Phrase::Conjunction(conj) => {
                let parts: Vec<String> = conj.phrases.iter().map(Phrase::print_string).collect();
                format!("{{ {} }}", parts.join(&format!(" *{}* ", conj.conjunction)))
            }
        }
    }

    #[must_use]
    pub fn as_noun(&self) -> Option<&NounPhrase> {
        match self {
            Phrase::Noun(np) => Some(np),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_prepositional(&self) -> Option<&PrepositionalPhrase> {
        match self {
            Phrase::Prepositional(pp) => Some(pp),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_verb(&self) -> Option<&VerbPhrase> {
        match self {
            Phrase::Verb(vp) => Some(vp),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sentence(&self) -> Option<&SentencePhrase> {
        match self {
            Phrase::Sentence(sp) => Some(sp),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_conjunction(&self) -> Option<&ConjunctionPhrase> {
        match self {
            Phrase::Conjunction(conj) => Some(conj),
            _ => None,
        }
    }
}
