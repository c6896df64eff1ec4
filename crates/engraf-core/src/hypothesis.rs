//! The tokenization hypothesis shared by all LATN layers.

use crate::dimensions::Dimension;
use crate::phrase::{Phrase, PrepositionalPhrase};
use crate::token::Token;
use crate::vector::VectorSpace;
use std::fmt;

/// A span of layer-k tokens consumed by a composite replacement token.
#[derive(Debug, Clone)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub token: Token,
}

/// One complete parse alternative at some layer.
#[derive(Debug, Clone)]
pub struct Hypothesis {
    pub tokens: Vec<Token>,
    /// Confidence in [0, 1]; hypothesis lists stay sorted descending.
    pub confidence: f32,
    pub description: String,
    pub replacements: Vec<Replacement>,
}

impl Hypothesis {
    #[must_use]
    pub fn new(tokens: Vec<Token>, confidence: f32, description: impl Into<String>) -> Self {
        Self {
            tokens,
            confidence,
            description: description.into(),
            replacements: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when any token carries the given phrase-level or POS dimension.
    #[must_use]
    pub fn has_token_type(&self, dim: Dimension) -> bool {
        self.tokens.iter().any(|t| t.isa(dim))
    }

    /// All tokens carrying the given dimension.
    #[must_use]
    pub fn tokens_of_type(&self, dim: Dimension) -> Vec<&Token> {
        self.tokens.iter().filter(|t| t.isa(dim)).collect()
    }

    /// Surface words of all tokens, in order.
    #[must_use]
    pub fn token_words(&self) -> Vec<&str> {
        self.tokens.iter().filter_map(Token::word).collect()
    }

    /// Structural signature used to deduplicate coordination variants:
    /// two hypotheses with the same phrase sequence collapse into one.
    #[must_use]
    pub fn signature(&self) -> String {
        self.token_words().join("|")
    }

    /// Grounding records attached to this hypothesis's tokens, a derived
    /// view over the grounded phrase clones.
    #[must_use]
    pub fn groundings(&self) -> Vec<&crate::phrase::Grounding> {
        fn collect<'a>(phrase: &'a Phrase, out: &mut Vec<&'a crate::phrase::Grounding>) {
            match phrase {
                Phrase::Noun(np) => {
                    if let Some(g) = &np.grounding {
                        out.push(g);
                    }
                    for pp in &np.preps {
                        if let Some(obj) = pp.object.as_deref() {
                            collect(obj, out);
                        }
                    }
                }
                Phrase::Prepositional(pp) => {
                    if let Some(obj) = pp.object.as_deref() {
                        collect(obj, out);
                    }
                }
                Phrase::Verb(vp) => {
                    if let Some(obj) = vp.object.as_deref() {
                        collect(obj, out);
                    }
                    for pp in &vp.preps {
                        if let Some(obj) = pp.object.as_deref() {
                            collect(obj, out);
                        }
                    }
                }
                Phrase::Sentence(sp) => {
                    if let Some(subject) = sp.subject.as_deref() {
                        collect(subject, out);
                    }
                    if let Some(predicate) = sp.predicate.as_deref() {
                        collect(predicate, out);
                    }
                }
                Phrase::Conjunction(conj) => {
                    for sub in &conj.phrases {
                        collect(sub, out);
                    }
                }
            }
        }
        let mut out = Vec::new();
        for token in &self.tokens {
            if let Some(phrase) = token.grounded_phrase.as_deref().or(token.phrase.as_deref()) {
                collect(phrase, &mut out);
            }
        }
        out
    }

    /// Derived structural rendering over the bracket vocabulary, e.g.
    /// `[SP [VP [NP ]NP<sphere_1> [PP [NP ]NP<cube_1> ]PP ]VP ]SP`.
    ///
    /// Openers carry the zero vector; closers carry the full phrase vector
    /// and, for grounded NPs, the id of the first bound scene object. This is
    /// a view computed from the token/phrase tree, never a source of truth.
    #[must_use]
    pub fn structural_rendering(&self) -> Vec<StructuralMarker> {
        let mut out = Vec::new();
        for token in &self.tokens {
            if let Some(phrase) = token.effective_phrase() {
                render_phrase(phrase, &mut out);
            }
        }
        out
    }

    /// The structural rendering flattened to a diagnostic string.
    #[must_use]
    pub fn structural_string(&self) -> String {
        self.structural_rendering()
            .iter()
            .map(|m| match &m.object_ref {
                Some(id) => format!("{}<{}>", m.marker, id),
                None => m.marker.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Multi-line diagnostic listing: composite tokens render through their
    /// phrase, lexical tokens through their non-zero dimensions.
    #[must_use]
    pub fn render_diagnostic(&self) -> String {
        let mut lines = Vec::new();
        for (i, token) in self.tokens.iter().enumerate() {
            let line = match token.effective_phrase() {
                Some(phrase) => {
                    let label = marker_label(phrase.level_dimension());
                    if token.isa(Dimension::Conj) {
                        format!("[{i}] [CONJ-{label}] {}", phrase.print_string())
                    } else {
                        format!("[{i}] [{label}] {}", phrase.print_string())
                    }
                }
                None => format!(
                    "[{i}] {} = {:?}",
                    token.word().unwrap_or("?"),
                    token.vector.non_zero_dims()
                ),
            };
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hypothesis(conf={:.2}, tokens={:?}, desc='{}')",
            self.confidence,
            self.token_words(),
            self.description
        )
    }
}

/// One marker in the structural rendering of a hypothesis.
#[derive(Debug, Clone)]
pub struct StructuralMarker {
    /// `[NP`, `]NP`, `[PP`, `]PP`, `[VP`, `]VP`, `[SP`, or `]SP`.
    pub marker: String,
    /// Zero vector on openers, full phrase vector on closers.
    pub vector: VectorSpace,
    /// First grounded scene object id, on grounded NP closers only.
    pub object_ref: Option<String>,
}

fn marker_label(dim: Dimension) -> &'static str {
    match dim {
        Dimension::Np => "NP",
        Dimension::Pp => "PP",
        Dimension::Vp => "VP",
        _ => "SP",
    }
}

fn render_phrase(phrase: &Phrase, out: &mut Vec<StructuralMarker>) {
    match phrase {
        Phrase::Conjunction(conj) => {
            for sub in &conj.phrases {
                render_phrase(sub, out);
            }
        }
        Phrase::Noun(np) => {
            let label = marker_label(Dimension::Np);
            out.push(StructuralMarker {
                marker: format!("[{label}"),
                vector: VectorSpace::new(),
                object_ref: None,
            });
            for pp in &np.preps {
                render_pp(pp, out);
            }
            out.push(StructuralMarker {
                marker: format!("]{label}"),
                vector: np.vector.clone(),
                object_ref: np
                    .grounding
                    .as_ref()
                    .and_then(|g| g.object_ids.first().cloned()),
            });
        }
        Phrase::Prepositional(pp) => render_pp(pp, out),
        Phrase::Verb(vp) => {
            let label = marker_label(Dimension::Vp);
            out.push(StructuralMarker {
                marker: format!("[{label}"),
                vector: VectorSpace::new(),
                object_ref: None,
            });
            if let Some(object) = &vp.object {
                render_phrase(object, out);
            }
            for pp in &vp.preps {
                render_pp(pp, out);
            }
            out.push(StructuralMarker {
                marker: format!("]{label}"),
                vector: vp.vector.clone(),
                object_ref: None,
            });
        }
        Phrase::Sentence(sp) => {
            let label = marker_label(Dimension::Sp);
            out.push(StructuralMarker {
                marker: format!("[{label}"),
                vector: VectorSpace::new(),
                object_ref: None,
            });
            if let Some(subject) = &sp.subject {
                render_phrase(subject, out);
            }
            if let Some(predicate) = &sp.predicate {
                render_phrase(predicate, out);
            }
            out.push(StructuralMarker {
                marker: format!("]{label}"),
                vector: sp.vector.clone(),
                object_ref: None,
            });
        }
    }
}

fn render_pp(pp: &PrepositionalPhrase, out: &mut Vec<StructuralMarker>) {
    out.push(StructuralMarker {
        marker: "[PP".to_string(),
        vector: VectorSpace::new(),
        object_ref: None,
    });
    if let Some(object) = &pp.object {
        render_phrase(object, out);
    }
    out.push(StructuralMarker {
        marker: "]PP".to_string(),
        vector: pp.vector.clone(),
        object_ref: None,
    });
}

/// Sort a hypothesis list by descending confidence, preserving insertion
/// order among equals.
pub fn sort_by_confidence(hypotheses: &mut [Hypothesis]) {
    hypotheses.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Drop everything past the top `bound` hypotheses.
pub fn truncate_to_bound(hypotheses: &mut Vec<Hypothesis>, bound: usize) {
    if hypotheses.len() > bound {
        hypotheses.truncate(bound);
    }
}
