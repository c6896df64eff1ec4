//! Confidence blending configuration for the grounder.

use serde::{Deserialize, Serialize};

/// How grounding confidence folds into hypothesis confidence.
///
/// The blended combination confidence is
/// `base_blend + grounding_blend * mean(grounding confidences)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingConfig {
    pub base_blend: f32,
    pub grounding_blend: f32,
    /// Confidence contributed by an NP that failed to ground.
    pub unbound_confidence: f32,
    /// Bound on the streamed Cartesian product per hypothesis.
    pub max_combinations: usize,
}

impl Default for GroundingConfig {
    fn default() -> Self {
        Self {
            base_blend: 0.7,
            grounding_blend: 0.3,
            unbound_confidence: 0.5,
            max_combinations: 64,
        }
    }
}
