//! Morphological inflection at lookup time.
//!
//! Derived forms are never stored: a lookup that misses the entry table
//! analyzes the surface for plural, verb-inflection, comparative, and
//! superlative suffixes, recovers the base form, and adjusts the base vector.

use engraf_core::{Dimension, VectorSpace};
use serde::{Deserialize, Serialize};

/// Tunable factors for inflection-derived vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflectionConfig {
    /// Strengthening applied to a scalar adjective's semantic dimensions by
    /// the comparative "-er" form.
    pub comparative_factor: f32,
    /// Strengthening applied by the superlative "-est" form.
    pub superlative_factor: f32,
}

impl Default for InflectionConfig {
    fn default() -> Self {
        Self {
            comparative_factor: 1.5,
            superlative_factor: 2.0,
        }
    }
}

/// Candidate base forms for a suffix-stripped stem.
///
/// English spelling mangles stems three ways: bare concatenation ("tall" +
/// "er"), dropped final "e" ("large" + "er" = "larger"), and doubled final
/// consonant ("big" + "er" = "bigger"). Each candidate is tried against the
/// vocabulary in order.
fn stem_candidates(stem: &str) -> Vec<String> {
    let mut candidates = vec![stem.to_string(), format!("{stem}e")];
    let bytes = stem.as_bytes();
    if bytes.len() >= 2 && bytes[bytes.len() - 1] == bytes[bytes.len() - 2] {
        candidates.push(stem[..stem.len() - 1].to_string());
    }
    candidates
}

/// One analyzed inflection of a surface form.
#[derive(Debug, Clone)]
pub struct InflectionAnalysis {
    /// Base form to look up.
    pub base: String,
    /// How the base vector must be adjusted.
    pub kind: InflectionKind,
}

/// The inflection classes the lexicon generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflectionKind {
    PluralNoun,
    VerbPast,
    VerbPresentParticiple,
    Comparative,
    Superlative,
}

/// Enumerate plausible analyses of `surface`, most specific suffix first.
/// The caller filters against the vocabulary and the base's category.
#[must_use]
pub fn analyze(surface: &str) -> Vec<InflectionAnalysis> {
    let mut analyses = Vec::new();
    let mut push = |bases: Vec<String>, kind: InflectionKind| {
        for base in bases {
            analyses.push(InflectionAnalysis { base, kind });
        }
    };

    if let Some(stem) = surface.strip_suffix("est") {
        push(stem_candidates(stem), InflectionKind::Superlative);
    }
    if let Some(stem) = surface.strip_suffix("ing") {
        push(stem_candidates(stem), InflectionKind::VerbPresentParticiple);
    }
    if let Some(stem) = surface.strip_suffix("ed") {
        push(stem_candidates(stem), InflectionKind::VerbPast);
    }
    if let Some(stem) = surface.strip_suffix("er") {
        push(stem_candidates(stem), InflectionKind::Comparative);
    }
    if let Some(stem) = surface.strip_suffix("ies") {
        push(vec![format!("{stem}y")], InflectionKind::PluralNoun);
    }
    if let Some(stem) = surface.strip_suffix("es") {
        push(vec![stem.to_string()], InflectionKind::PluralNoun);
    }
    if let Some(stem) = surface.strip_suffix('s') {
        push(vec![stem.to_string()], InflectionKind::PluralNoun);
    }
    analyses
}

/// Whether the base vector's category admits this inflection.
#[must_use]
pub fn applies_to(kind: InflectionKind, base: &VectorSpace) -> bool {
    match kind {
        InflectionKind::PluralNoun => base.isa(Dimension::Noun),
        InflectionKind::VerbPast | InflectionKind::VerbPresentParticiple => {
            base.isa(Dimension::Verb)
        }
        InflectionKind::Comparative | InflectionKind::Superlative => base.isa(Dimension::Adj),
    }
}

/// Derive the inflected vector from the base vector.
#[must_use]
pub fn derive(
    kind: InflectionKind,
    base: &VectorSpace,
    surface: &str,
    config: &InflectionConfig,
) -> VectorSpace {
    let mut v = base.clone();
    match kind {
        InflectionKind::PluralNoun => {
            v.set(Dimension::Plural, 1.0);
            v.set(Dimension::Singular, 0.0);
        }
        InflectionKind::VerbPast => {
            v.set(Dimension::VerbPast, 1.0);
            v.set(Dimension::VerbPastPart, 1.0);
        }
        InflectionKind::VerbPresentParticiple => {
            v.set(Dimension::VerbPresentPart, 1.0);
        }
        InflectionKind::Comparative => {
            strengthen_semantic(&mut v, config.comparative_factor);
            v.set(Dimension::Comp, 1.0);
        }
        InflectionKind::Superlative => {
            strengthen_semantic(&mut v, config.superlative_factor);
            v.set(Dimension::Super, 1.0);
        }
    }
    v.set_word(surface);
    v
}

fn strengthen_semantic(v: &mut VectorSpace, factor: f32) {
    for (dim, value) in v.non_zero_dims() {
        if dim.is_semantic() {
            v.set(dim, value * factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_adj() -> VectorSpace {
        VectorSpace::from_word(
            "big",
            &[
                (Dimension::Adj, 1.0),
                (Dimension::ScaleX, 1.5),
                (Dimension::ScaleY, 1.5),
                (Dimension::ScaleZ, 1.5),
            ],
        )
    }

    #[test]
    fn analyze_finds_doubled_consonant_comparative() {
        let analyses = analyze("bigger");
        assert!(analyses
            .iter()
            .any(|a| a.base == "big" && a.kind == InflectionKind::Comparative));
    }

    #[test]
    fn analyze_finds_dropped_e_forms() {
        assert!(analyze("larger")
            .iter()
            .any(|a| a.base == "large" && a.kind == InflectionKind::Comparative));
        assert!(analyze("moved")
            .iter()
            .any(|a| a.base == "move" && a.kind == InflectionKind::VerbPast));
        assert!(analyze("scaling")
            .iter()
            .any(|a| a.base == "scale" && a.kind == InflectionKind::VerbPresentParticiple));
    }

    #[test]
    fn analyze_finds_ies_plural() {
        assert!(analyze("bodies")
            .iter()
            .any(|a| a.base == "body" && a.kind == InflectionKind::PluralNoun));
    }

    #[test]
    fn comparative_strengthens_semantic_dims_only() {
        let derived = derive(
            InflectionKind::Comparative,
            &base_adj(),
            "bigger",
            &InflectionConfig::default(),
        );
        assert_eq!(derived.get(Dimension::ScaleX), 2.25);
        assert_eq!(derived.get(Dimension::Adj), 1.0);
        assert!(derived.isa(Dimension::Comp));
        assert_eq!(derived.word(), Some("bigger"));
    }

    #[test]
    fn superlative_uses_the_stronger_factor() {
        let derived = derive(
            InflectionKind::Superlative,
            &base_adj(),
            "biggest",
            &InflectionConfig::default(),
        );
        assert_eq!(derived.get(Dimension::ScaleX), 3.0);
        assert!(derived.isa(Dimension::Super));
    }

    #[test]
    fn plural_flips_number_dims() {
        let mut cube = VectorSpace::from_word("cube", &[(Dimension::Noun, 1.0)]);
        cube.set(Dimension::Singular, 1.0);
        let derived = derive(
            InflectionKind::PluralNoun,
            &cube,
            "cubes",
            &InflectionConfig::default(),
        );
        assert!(derived.isa(Dimension::Plural));
        assert!(!derived.isa(Dimension::Singular));
    }
}
