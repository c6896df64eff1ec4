//! Executor options.

use engraf_grounding::GroundingConfig;
use engraf_tokenizer::TokenizerConfig;
use serde::{Deserialize, Serialize};

/// Options controlling a layered parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorOptions {
    /// Ground NPs and PPs against the scene when one is available.
    pub enable_semantic_grounding: bool,
    /// Return alternative grounding candidates for definite singular NPs,
    /// multiplying hypotheses.
    pub return_all_matches: bool,
    /// Keep at most this many hypotheses after each layer.
    pub max_hypotheses: usize,
    /// Enumerate phrase-level coordination variants.
    pub build_phrase_level_coordination: bool,
    pub tokenizer: TokenizerConfig,
    pub grounding: GroundingConfig,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            enable_semantic_grounding: true,
            return_all_matches: false,
            max_hypotheses: 24,
            build_phrase_level_coordination: true,
            tokenizer: TokenizerConfig::default(),
            grounding: GroundingConfig::default(),
        }
    }
}

impl ExecutorOptions {
    /// The tokenizer config with the coordination switch applied.
    #[must_use]
    pub fn effective_tokenizer(&self) -> TokenizerConfig {
        let mut config = self.tokenizer.clone();
        config.build_phrase_level_coordination = self.build_phrase_level_coordination;
        config
    }
}
