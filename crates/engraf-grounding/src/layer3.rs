//! Layer 3 semantic grounding: prepositional phrases to spatial relations.
//!
//! A vector-literal PP grounds directly to that literal as an absolute
//! location. A PP over an NP grounds its embedded NP through the Layer-2
//! grounder and builds a composite spatial-relationship vector: preposition
//! semantics plus the resolved object's vector, annotated with the object
//! reference and the preposition surface.

use crate::config::GroundingConfig;
use crate::error::GroundingError;
use crate::layer2::Layer2Grounder;
use engraf_core::{Phrase, PrepositionalPhrase, VectorSpace};
use engraf_scene::Scene;
use tracing::debug;

/// Result of grounding one prepositional phrase.
#[derive(Debug, Clone)]
pub struct Layer3GroundingResult {
    pub success: bool,
    pub confidence: f32,
    pub description: String,
    /// Composite spatial-relationship vector (or the absolute location for
    /// vector-literal PPs).
    pub spatial_vector: Option<VectorSpace>,
    /// Resolved reference object id, absent for absolute locations.
    pub reference_object: Option<String>,
    pub preposition: Option<String>,
    pub error: Option<GroundingError>,
}

impl Layer3GroundingResult {
    fn failure(error: GroundingError) -> Self {
        Self {
            success: false,
            confidence: 0.0,
            description: error.to_string(),
            spatial_vector: None,
            reference_object: None,
            preposition: None,
            error: Some(error),
        }
    }
}

/// Grounds Layer-3 PP tokens against a scene.
pub struct Layer3Grounder<'a> {
    scene: &'a Scene,
    layer2: Layer2Grounder<'a>,
}

impl<'a> Layer3Grounder<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            layer2: Layer2Grounder::new(scene),
        }
    }

    #[must_use]
    pub fn with_config(scene: &'a Scene, config: GroundingConfig) -> Self {
        Self {
            scene,
            layer2: Layer2Grounder::with_config(scene, config),
        }
    }

    /// Ground a single prepositional phrase.
    #[must_use]
    pub fn ground_pp(
        &self,
        pp: &PrepositionalPhrase,
        return_all_matches: bool,
    ) -> Layer3GroundingResult {
        if let Some(literal) = &pp.vector_literal {
            let mut location = literal.clone();
            location.set_word(format!(
                "Location({})",
                literal.word().unwrap_or("[vector]")
            ));
            return Layer3GroundingResult {
                success: true,
                confidence: 1.0,
                description: format!(
                    "grounded '{}' to absolute location",
                    Phrase::Prepositional(pp.clone()).original_text()
                ),
                spatial_vector: Some(location),
                reference_object: None,
                preposition: pp.preposition.clone(),
                error: None,
            };
        }

        let Some(np) = pp.noun_phrase() else {
            return Layer3GroundingResult::failure(GroundingError::NoMatch {
                description: Phrase::Prepositional(pp.clone()).original_text(),
            });
        };

        // Reuse a grounding already attached during Layer-2 multiplication.
        let (object_ids, confidence) = match &np.grounding {
            Some(g) => (g.object_ids.clone(), g.confidence),
            None => {
                let result = self.layer2.ground_np(np, return_all_matches);
                if !result.success {
                    return Layer3GroundingResult::failure(result.error.unwrap_or(
                        GroundingError::NoMatch {
                            description: Phrase::Prepositional(pp.clone()).original_text(),
                        },
                    ));
                }
                (result.resolved_ids, result.confidence)
            }
        };

        let Some(reference_id) = object_ids.first() else {
            return Layer3GroundingResult::failure(GroundingError::NoMatch {
                description: Phrase::Prepositional(pp.clone()).original_text(),
            });
        };

        let mut spatial = pp.vector.clone();
        if let Some(reference) = self.scene.find_object(reference_id) {
            spatial += &reference.vector;
        }
        let preposition = pp.preposition.clone().unwrap_or_default();
        spatial.set_word(format!("SpatialRel({preposition} {reference_id})"));
        debug!(preposition, reference = %reference_id, "grounded prepositional phrase");

        Layer3GroundingResult {
            success: true,
            confidence,
            description: format!(
                "grounded '{}' to spatial relationship: {} {}",
                Phrase::Prepositional(pp.clone()).original_text(),
                preposition,
                reference_id
            ),
            spatial_vector: Some(spatial),
            reference_object: Some(reference_id.clone()),
            preposition: pp.preposition.clone(),
            error: None,
        }
    }

    /// Ground every prepositional phrase in a list.
    #[must_use]
    pub fn ground_all(
        &self,
        phrases: &[PrepositionalPhrase],
        return_all_matches: bool,
    ) -> Vec<Layer3GroundingResult> {
        phrases
            .iter()
            .map(|pp| self.ground_pp(pp, return_all_matches))
            .collect()
    }
}
