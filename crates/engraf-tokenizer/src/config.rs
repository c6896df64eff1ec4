//! Tunable confidence coefficients for the layered tokenizer.

use serde::{Deserialize, Serialize};

/// Configuration shared by Layers 1-5.
///
/// The defaults reproduce the reference coefficients; they are configuration,
/// not constants, so callers can retune ranking without touching the layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Applied once per layer that found at least one phrase.
    pub layer_bonus: f32,
    /// Bonus for phrase-level coordination variants.
    pub phrase_coordination_bonus: f32,
    /// Penalty for the local variant when phrase-level coordination differs.
    pub local_coordination_penalty: f32,
    /// Confidence subtracted per non-null PP attachment.
    pub attachment_penalty: f32,
    /// Attachment combinations with an average spatial score below this are
    /// dropped as spatially incoherent.
    pub spatial_threshold: f32,
    /// Confidence factor for an unknown-word fallback token at Layer 1.
    pub unknown_confidence: f32,
    /// Safety bound on Layer-1 hypothesis fan-out.
    pub max_layer1_hypotheses: usize,
    /// Emit the phrase-level coordination variant alongside the greedy
    /// local one.
    pub build_phrase_level_coordination: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            layer_bonus: 1.05,
            phrase_coordination_bonus: 1.15,
            local_coordination_penalty: 0.95,
            attachment_penalty: 0.05,
            spatial_threshold: 0.3,
            unknown_confidence: 0.3,
            max_layer1_hypotheses: 64,
            build_phrase_level_coordination: true,
        }
    }
}

impl TokenizerConfig {
    /// Stricter spatial filtering and a tighter hypothesis fan-out.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            spatial_threshold: 0.5,
            max_layer1_hypotheses: 24,
            ..Default::default()
        }
    }

    /// Keep spatially dubious combinations around for exploration.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            spatial_threshold: 0.1,
            max_layer1_hypotheses: 128,
            ..Default::default()
        }
    }
}
