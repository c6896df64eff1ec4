//! The layered executor: entry points at every layer.
//!
//! Each `execute_layer_k` transparently runs all lower layers, interleaving
//! semantic grounding at Layers 2 and 3 when a scene is available. The
//! executor reads the scene but never mutates it; mutation belongs to the
//! sentence interpreter acting on a finished parse.

use crate::error::{PipelineError, PipelineResult};
use crate::options::ExecutorOptions;
use crate::results::{Layer1Result, Layer2Result, Layer3Result, Layer4Result, Layer5Result};
use engraf_core::{
    truncate_to_bound, Dimension, Hypothesis, NounPhrase, Phrase, PrepositionalPhrase,
    SentencePhrase, VerbPhrase,
};
use engraf_grounding::{Layer2Grounder, Layer3Grounder};
use engraf_lexicon::Vocabulary;
use engraf_scene::{Scene, SpatialValidator};
use engraf_tokenizer::{
    enumerate_pp_attachments, tokenize_layer1, tokenize_layer2, tokenize_layer3, tokenize_layer4,
    tokenize_layer5,
};
use tracing::info;

/// Drives the five LATN layers over an optional scene.
pub struct LatnExecutor {
    vocabulary: Vocabulary,
    scene: Option<Scene>,
    validator: SpatialValidator,
    options: ExecutorOptions,
}

impl LatnExecutor {
    /// An executor with the core vocabulary and no scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::core(),
            scene: None,
            validator: SpatialValidator::new(),
            options: ExecutorOptions::default(),
        }
    }

    /// An executor grounding against the given scene.
    #[must_use]
    pub fn with_scene(scene: Scene) -> Self {
        let mut executor = Self::new();
        executor.scene = Some(scene);
        executor
    }

    #[must_use]
    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    #[must_use]
    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ExecutorOptions {
        &mut self.options
    }

    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = Some(scene);
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn grounding_scene(&self) -> Option<&Scene> {
        if self.options.enable_semantic_grounding {
            self.scene.as_ref()
        } else {
            None
        }
    }

    /// Layer 1: multi-hypothesis lexical tokenization.
    #[must_use]
    pub fn execute_layer1(&self, input: &str) -> Layer1Result {
        let config = self.options.effective_tokenizer();
        match tokenize_layer1(input, &self.vocabulary, &config) {
            Ok(mut hypotheses) => {
                truncate_to_bound(&mut hypotheses, self.options.max_hypotheses);
                let confidence = hypotheses.first().map_or(0.0, |h| h.confidence).min(1.0);
                let description = format!(
                    "Layer 1 tokenized '{input}' into {} hypotheses",
                    hypotheses.len()
                );
                info!(input, hypotheses = hypotheses.len(), "layer 1 complete");
                Layer1Result {
                    hypotheses,
                    success: true,
                    confidence,
                    description,
                }
            }
            Err(err) => Layer1Result {
                hypotheses: Vec::new(),
                success: false,
                confidence: 0.0,
                description: format!("Layer 1 failed: {err}"),
            },
        }
    }

    /// Layer 2: NP tokenization plus semantic grounding.
    #[must_use]
    pub fn execute_layer2(&self, input: &str) -> Layer2Result {
        let layer1 = self.execute_layer1(input);
        if !layer1.success {
            let description = format!("Layer 2 blocked by Layer 1: {}", layer1.description);
            return Layer2Result {
                layer1,
                description,
                ..Default::default()
            };
        }

        let config = self.options.effective_tokenizer();
        let mut hypotheses = tokenize_layer2(&layer1.hypotheses, &config);
        truncate_to_bound(&mut hypotheses, self.options.max_hypotheses);

        let mut grounding_results = Vec::new();
        if let Some(scene) = self.grounding_scene() {
            let grounder = Layer2Grounder::with_config(scene, self.options.grounding.clone());
            let (grounded, results) =
                grounder.ground_hypotheses(&hypotheses, self.options.return_all_matches);
            hypotheses = grounded;
            truncate_to_bound(&mut hypotheses, self.options.max_hypotheses);
            grounding_results = results;
        }

        let noun_phrases = extract_noun_phrases(&hypotheses);
        let best = hypotheses.first().map_or(layer1.confidence, |h| h.confidence);
        let confidence = ((layer1.confidence + best) / 2.0).min(1.0);
        let description = format!(
            "Layer 2 processed {} noun phrases in {} hypotheses",
            noun_phrases.len(),
            hypotheses.len()
        );
        info!(noun_phrases = noun_phrases.len(), "layer 2 complete");
        Layer2Result {
            layer1,
            hypotheses,
            noun_phrases,
            grounding_results,
            success: true,
            confidence,
            description,
        }
    }

    /// Layer 3: PP tokenization, attachment enumeration, and grounding.
    #[must_use]
    pub fn execute_layer3(&self, input: &str) -> Layer3Result {
        let layer2 = self.execute_layer2(input);
        if !layer2.success {
            let description = format!("Layer 3 blocked by Layer 2: {}", layer2.description);
            return Layer3Result {
                layer2,
                description,
                ..Default::default()
            };
        }

        let config = self.options.effective_tokenizer();
        let tokenized = tokenize_layer3(&layer2.hypotheses, &config);
        let mut hypotheses = enumerate_pp_attachments(
            tokenized,
            self.grounding_scene(),
            &self.validator,
            &config,
        );
        truncate_to_bound(&mut hypotheses, self.options.max_hypotheses);

        let prepositional_phrases = extract_prepositional_phrases(&hypotheses);
        let grounding_results = match self.grounding_scene() {
            Some(scene) => {
                let grounder = Layer3Grounder::with_config(scene, self.options.grounding.clone());
                grounder.ground_all(&prepositional_phrases, self.options.return_all_matches)
            }
            None => Vec::new(),
        };

        let best = hypotheses.first().map_or(layer2.confidence, |h| h.confidence);
        let confidence = ((layer2.confidence + best) / 2.0).min(1.0);
        let description = format!(
            "Layer 3 processed {} prepositional phrases",
            prepositional_phrases.len()
        );
        info!(
            prepositional_phrases = prepositional_phrases.len(),
            "layer 3 complete"
        );
        Layer3Result {
            layer2,
            hypotheses,
            prepositional_phrases,
            grounding_results,
            success: true,
            confidence,
            description,
        }
    }

    /// Layer 4: VP tokenization.
    #[must_use]
    pub fn execute_layer4(&self, input: &str) -> Layer4Result {
        let layer3 = self.execute_layer3(input);
        if !layer3.success {
            let description = format!("Layer 4 blocked by Layer 3: {}", layer3.description);
            return Layer4Result {
                layer3,
                description,
                ..Default::default()
            };
        }

        let config = self.options.effective_tokenizer();
        let mut hypotheses = tokenize_layer4(&layer3.hypotheses, &config);
        truncate_to_bound(&mut hypotheses, self.options.max_hypotheses);

        let verb_phrases = extract_verb_phrases(&hypotheses);
        let best = hypotheses.first().map_or(layer3.confidence, |h| h.confidence);
        let confidence = ((layer3.confidence + best) / 2.0).min(1.0);
        let description = format!("Layer 4 processed {} verb phrases", verb_phrases.len());
        info!(verb_phrases = verb_phrases.len(), "layer 4 complete");
        Layer4Result {
            layer3,
            hypotheses,
            verb_phrases,
            success: true,
            confidence,
            description,
        }
    }

    /// Layer 5: sentence tokenization.
    #[must_use]
    pub fn execute_layer5(&self, input: &str) -> Layer5Result {
        let layer4 = self.execute_layer4(input);
        if !layer4.success {
            let description = format!("Layer 5 blocked by Layer 4: {}", layer4.description);
            return Layer5Result {
                layer4,
                description,
                ..Default::default()
            };
        }

        let config = self.options.effective_tokenizer();
        let mut hypotheses = tokenize_layer5(&layer4.hypotheses, &config);
        truncate_to_bound(&mut hypotheses, self.options.max_hypotheses);

        let sentences = extract_sentences(&hypotheses);
        let best = hypotheses.first().map_or(layer4.confidence, |h| h.confidence);
        let confidence = ((layer4.confidence + best) / 2.0).min(1.0);
        let description = format!("Layer 5 processed {} sentences", sentences.len());
        info!(sentences = sentences.len(), "layer 5 complete");
        Layer5Result {
            layer4,
            hypotheses,
            sentences,
            success: true,
            confidence,
            description,
        }
    }

    /// Full parse to Layer 5, converting degraded results into typed errors.
    ///
    /// # Errors
    /// [`PipelineError::Lexicon`] when Layer 1 cannot cover the input;
    /// [`PipelineError::ParseFailure`] when no sentence reading survives.
    pub fn parse(&self, input: &str) -> PipelineResult<Layer5Result> {
        let result = self.execute_layer5(input);
        if !result.layer4.layer3.layer2.layer1.success {
            let config = self.options.effective_tokenizer();
            tokenize_layer1(input, &self.vocabulary, &config)?;
        }
        if !result.success || result.sentences.is_empty() {
            let layer = last_successful_layer(&result);
            return Err(PipelineError::ParseFailure {
                layer,
                message: result.description,
            });
        }
        Ok(result)
    }
}

impl Default for LatnExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn last_successful_layer(result: &Layer5Result) -> u8 {
    let l3 = &result.layer4.layer3;
    if !l3.layer2.layer1.success {
        0
    } else if !l3.layer2.success {
        1
    } else if !l3.success {
        2
    } else if !result.layer4.success {
        3
    } else if !result.success || result.sentences.is_empty() {
        4
    } else {
        5
    }
}

fn extract_noun_phrases(hypotheses: &[Hypothesis]) -> Vec<NounPhrase> {
    let mut out = Vec::new();
    for hypothesis in hypotheses {
        for token in &hypothesis.tokens {
            if !token.is_phrase_level(Dimension::Np) {
                continue;
            }
            match token.effective_phrase() {
                Some(Phrase::Noun(np)) => out.push(np.clone()),
                Some(Phrase::Conjunction(conj)) => {
                    out.extend(conj.noun_phrases().into_iter().cloned());
                }
                _ => {}
            }
        }
    }
    out
}

fn extract_prepositional_phrases(hypotheses: &[Hypothesis]) -> Vec<PrepositionalPhrase> {
    let mut out = Vec::new();
    for hypothesis in hypotheses {
        for token in &hypothesis.tokens {
            match token.effective_phrase() {
                Some(Phrase::Prepositional(pp)) if token.is_phrase_level(Dimension::Pp) => {
                    out.push(pp.clone());
                }
                Some(Phrase::Conjunction(conj)) if token.is_phrase_level(Dimension::Pp) => {
                    out.extend(
                        conj.phrases
                            .iter()
                            .filter_map(Phrase::as_prepositional)
                            .cloned(),
                    );
                }
                Some(Phrase::Noun(np)) => out.extend(np.preps.iter().cloned()),
                _ => {}
            }
        }
    }
    out
}

fn extract_verb_phrases(hypotheses: &[Hypothesis]) -> Vec<VerbPhrase> {
    let mut out = Vec::new();
    for hypothesis in hypotheses {
        for token in &hypothesis.tokens {
            if !token.is_phrase_level(Dimension::Vp) {
                continue;
            }
            match token.effective_phrase() {
                Some(Phrase::Verb(vp)) => out.push(vp.clone()),
                Some(Phrase::Conjunction(conj)) => {
                    out.extend(conj.phrases.iter().filter_map(Phrase::as_verb).cloned());
                }
                _ => {}
            }
        }
    }
    out
}

fn extract_sentences(hypotheses: &[Hypothesis]) -> Vec<SentencePhrase> {
    let mut out = Vec::new();
    for hypothesis in hypotheses {
        for token in &hypothesis.tokens {
            if !token.is_phrase_level(Dimension::Sp) {
                continue;
            }
            match token.effective_phrase() {
                Some(Phrase::Sentence(sp)) => out.push(sp.clone()),
                Some(Phrase::Conjunction(conj)) => {
                    out.extend(conj.phrases.iter().filter_map(Phrase::as_sentence).cloned());
                }
                _ => {}
            }
        }
    }
    out
}
