//! Per-layer result records.
//!
//! Each `Layer_k_Result` embeds the record of the layer below it, so a
//! Layer-5 call hands back the complete trace of the parse.

use engraf_core::{Hypothesis, NounPhrase, PrepositionalPhrase, SentencePhrase, VerbPhrase};
use engraf_grounding::{Layer2GroundingResult, Layer3GroundingResult};

/// Result of Layer 1 execution (lexical tokenization).
#[derive(Debug, Clone, Default)]
pub struct Layer1Result {
    pub hypotheses: Vec<Hypothesis>,
    pub success: bool,
    pub confidence: f32,
    pub description: String,
}

/// Result of Layer 2 execution (NP tokenization + grounding).
#[derive(Debug, Clone, Default)]
pub struct Layer2Result {
    pub layer1: Layer1Result,
    pub hypotheses: Vec<Hypothesis>,
    pub noun_phrases: Vec<NounPhrase>,
    pub grounding_results: Vec<Layer2GroundingResult>,
    pub success: bool,
    pub confidence: f32,
    pub description: String,
}

/// Result of Layer 3 execution (PP tokenization + attachment + grounding).
#[derive(Debug, Clone, Default)]
pub struct Layer3Result {
    pub layer2: Layer2Result,
    pub hypotheses: Vec<Hypothesis>,
    pub prepositional_phrases: Vec<PrepositionalPhrase>,
    pub grounding_results: Vec<Layer3GroundingResult>,
    pub success: bool,
    pub confidence: f32,
    pub description: String,
}

/// Result of Layer 4 execution (VP tokenization).
#[derive(Debug, Clone, Default)]
pub struct Layer4Result {
    pub layer3: Layer3Result,
    pub hypotheses: Vec<Hypothesis>,
    pub verb_phrases: Vec<VerbPhrase>,
    pub success: bool,
    pub confidence: f32,
    pub description: String,
}

/// Result of Layer 5 execution (sentence tokenization).
#[derive(Debug, Clone, Default)]
pub struct Layer5Result {
    pub layer4: Layer4Result,
    pub hypotheses: Vec<Hypothesis>,
    pub sentences: Vec<SentencePhrase>,
    pub success: bool,
    pub confidence: f32,
    pub description: String,
}

impl Layer5Result {
    /// The best surviving hypothesis, if any.
    #[must_use]
    pub fn best_hypothesis(&self) -> Option<&Hypothesis> {
        self.hypotheses.first()
    }

    /// The best sentence reading, if any.
    #[must_use]
    pub fn best_sentence(&self) -> Option<&SentencePhrase> {
        self.sentences.first()
    }

    /// Serialized structural form of the best hypothesis, e.g.
    /// `[SP [VP [NP ]NP<sphere_1> ]VP ]SP`.
    #[must_use]
    pub fn serialized(&self) -> Option<String> {
        self.best_hypothesis().map(Hypothesis::structural_string)
    }
}
