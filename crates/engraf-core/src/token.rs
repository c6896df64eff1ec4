//! Tokens: vectors flowing between layers.
//!
//! A Layer-1 token is a bare vector with a surface word. A composite token
//! produced by Layers 2-5 additionally points back at the phrase it replaced,
//! and after grounding carries a grounded clone of that phrase. Phrases are
//! held by `Rc` so hypothesis multiplication can clone token sequences
//! cheaply.

use crate::dimensions::Dimension;
use crate::phrase::Phrase;
use crate::vector::VectorSpace;
use std::rc::Rc;

/// One token in a hypothesis: a vector plus optional phrase back-pointers.
#[derive(Debug, Clone)]
pub struct Token {
    pub vector: VectorSpace,
    /// The phrase this composite token replaced, if any.
    pub phrase: Option<Rc<Phrase>>,
    /// Grounded clone of `phrase` attached by the semantic grounder.
    pub grounded_phrase: Option<Rc<Phrase>>,
}

impl Token {
    /// A Layer-1 lexical token.
    #[must_use]
    pub fn lexical(vector: VectorSpace) -> Self {
        Self {
            vector,
            phrase: None,
            grounded_phrase: None,
        }
    }

    /// Build the composite token for a parsed phrase.
    ///
    /// The token's vector is the phrase's composite vector marked with the
    /// phrase-level dimension (`NP`/`PP`/`VP`/`SP`), plus `conj=1` for
    /// coordinations; the word is a diagnostic rendering such as
    /// `NP(the red sphere)`.
    #[must_use]
    pub fn composite(phrase: Phrase) -> Self {
        let level = phrase.level_dimension();
        let mut vector = phrase.vector();
        vector.set(level, 1.0);
        let label = match level {
            Dimension::Np => "NP",
            Dimension::Pp => "PP",
            Dimension::Vp => "VP",
            _ => "SP",
        };
        let word = if matches!(phrase, Phrase::Conjunction(_)) {
            vector.set(Dimension::Conj, 1.0);
            format!("CONJ-{}({})", label, phrase.original_text())
        } else {
            format!("{}({})", label, phrase.original_text())
        };
        vector.set_word(word);
        Self {
            vector,
            phrase: Some(Rc::new(phrase)),
            grounded_phrase: None,
        }
    }

    /// Rebuild this token with a grounded clone of its phrase attached.
    #[must_use]
    pub fn with_grounded(&self, grounded: Phrase) -> Self {
        let mut out = self.clone();
        out.grounded_phrase = Some(Rc::new(grounded));
        out
    }

    #[inline]
    #[must_use]
    pub fn isa(&self, dim: Dimension) -> bool {
        self.vector.isa(dim)
    }

    /// The phrase level of a composite token. Composite vectors sum their
    /// constituents, so a VP token also carries the `NP` dim of its object;
    /// the highest marker is the token's actual level.
    #[must_use]
    pub fn level(&self) -> Option<Dimension> {
        for dim in [Dimension::Sp, Dimension::Vp, Dimension::Pp, Dimension::Np] {
            if self.vector.isa(dim) {
                return Some(dim);
            }
        }
        None
    }

    /// True when this token is a composite produced by Layers 2-5.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.level().is_some()
    }

    /// True when this token's level is exactly `dim`.
    #[must_use]
    pub fn is_phrase_level(&self, dim: Dimension) -> bool {
        self.level() == Some(dim)
    }

    /// True for a lexical (Layer-1) token carrying `dim`.
    #[must_use]
    pub fn is_lexical(&self, dim: Dimension) -> bool {
        !self.is_composite() && self.vector.isa(dim)
    }

    #[must_use]
    pub fn word(&self) -> Option<&str> {
        self.vector.word()
    }

    /// The grounded phrase when present, else the original phrase.
    #[must_use]
    pub fn effective_phrase(&self) -> Option<&Phrase> {
        self.grounded_phrase
            .as_deref()
            .or(self.phrase.as_deref())
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.vector == other.vector
            && self.phrase.as_deref() == other.phrase.as_deref()
            && self.grounded_phrase.as_deref() == other.grounded_phrase.as_deref()
    }
}
