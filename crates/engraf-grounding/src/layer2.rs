//! Layer 2 semantic grounding: binding noun phrases to scene objects.
//!
//! Pronouns resolve against the scene's recent queue; other NPs rank scene
//! candidates by weighted vector distance. Each hypothesis multiplies into
//! one outbound hypothesis per combination of candidate choices across its
//! NPs, streamed with an early bound so the full Cartesian product is never
//! materialized.

use crate::config::GroundingConfig;
use crate::error::GroundingError;
use engraf_core::{
    sort_by_confidence, CartesianOdometer, Dimension, Grounding, Hypothesis, NounPhrase, Phrase,
    Token,
};
use engraf_scene::{RecentEntry, Scene};
use tracing::{debug, warn};

/// Result of grounding one noun phrase.
#[derive(Debug, Clone)]
pub struct Layer2GroundingResult {
    pub success: bool,
    pub confidence: f32,
    /// Ids of the entities the NP resolved to; non-empty on success.
    pub resolved_ids: Vec<String>,
    /// NP clone carrying the grounding record.
    pub grounded_phrase: Option<Phrase>,
    pub description: String,
    /// Alternative candidates for definite singular NPs, best first.
    pub alternatives: Vec<(f32, String)>,
    pub error: Option<GroundingError>,
}

impl Layer2GroundingResult {
    fn failure(error: GroundingError, confidence: f32) -> Self {
        Self {
            success: false,
            confidence,
            resolved_ids: Vec::new(),
            grounded_phrase: None,
            description: error.to_string(),
            alternatives: Vec::new(),
            error: Some(error),
        }
    }
}

/// Grounds Layer-2 NP tokens against a scene.
pub struct Layer2Grounder<'a> {
    scene: &'a Scene,
    config: GroundingConfig,
}

impl<'a> Layer2Grounder<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            config: GroundingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(scene: &'a Scene, config: GroundingConfig) -> Self {
        Self { scene, config }
    }

    /// Ground a single noun phrase.
    #[must_use]
    pub fn ground_np(&self, np: &NounPhrase, return_all_matches: bool) -> Layer2GroundingResult {
        if let Some(pronoun) = &np.pronoun {
            return self.ground_pronoun(np, pronoun);
        }

        let candidates = self.scene.find_noun_phrase(np);
        if candidates.is_empty() {
            return Layer2GroundingResult::failure(
                GroundingError::NoMatch {
                    description: Phrase::Noun(np.clone()).original_text(),
                },
                self.config.unbound_confidence,
            );
        }

        let (resolved, confidence, alternatives) = if np.is_plural() {
            let ids: Vec<String> = candidates
                .iter()
                .map(|(_, obj)| obj.object_id.clone())
                .collect();
            let avg =
                candidates.iter().map(|(c, _)| *c).sum::<f32>() / candidates.len() as f32;
            (ids, avg, Vec::new())
        } else {
            let (best_conf, best_obj) = candidates[0];
            let alternatives = if np.is_definite() && return_all_matches {
                candidates[1..]
                    .iter()
                    .map(|(c, obj)| (*c, obj.object_id.clone()))
                    .collect()
            } else {
                Vec::new()
            };
            (vec![best_obj.object_id.clone()], best_conf, alternatives)
        };

        let mut grounded = np.clone();
        grounded.grounding = Some(Grounding {
            object_ids: resolved.clone(),
            confidence,
            multiple: np.is_plural(),
        });
        debug!(ids = ?resolved, confidence, "grounded noun phrase");
        Layer2GroundingResult {
            success: true,
            confidence,
            description: format!(
                "grounded '{}' to {}",
                Phrase::Noun(np.clone()).original_text(),
                resolved.join(", ")
            ),
            resolved_ids: resolved,
            grounded_phrase: Some(Phrase::Noun(grounded)),
            alternatives,
            error: None,
        }
    }

    fn ground_pronoun(&self, np: &NounPhrase, pronoun: &str) -> Layer2GroundingResult {
        let entries = self.scene.resolve_pronoun(pronoun);
        if entries.is_empty() {
            // The hypothesis survives with this NP unbound at confidence 0.
            return Layer2GroundingResult::failure(
                GroundingError::NoReferent {
                    pronoun: pronoun.to_string(),
                },
                0.0,
            );
        }
        let resolved: Vec<String> = if np.vector.isa(Dimension::Plural) {
            entries.iter().map(|e| e.id().to_string()).collect()
        } else {
            vec![entries.last().map(RecentEntry::id).unwrap_or_default().to_string()]
        };
        let mut grounded = np.clone();
        grounded.grounding = Some(Grounding {
            object_ids: resolved.clone(),
            confidence: 1.0,
            multiple: np.vector.isa(Dimension::Plural),
        });
        Layer2GroundingResult {
            success: true,
            confidence: 1.0,
            description: format!("resolved pronoun '{}' to {}", pronoun, resolved.join(", ")),
            resolved_ids: resolved,
            grounded_phrase: Some(Phrase::Noun(grounded)),
            alternatives: Vec::new(),
            error: None,
        }
    }

    /// Ground a coordination of NPs as one unit: each member grounds to its
    /// best candidate and the result confidence is the member mean.
    #[must_use]
    pub fn ground_conjunction(
        &self,
        phrase: &Phrase,
        return_all_matches: bool,
    ) -> Layer2GroundingResult {
        let Phrase::Conjunction(conj) = phrase else {
            return Layer2GroundingResult::failure(
                GroundingError::NoMatch {
                    description: phrase.original_text(),
                },
                self.config.unbound_confidence,
            );
        };
        let mut grounded = conj.clone();
        let mut confidences = Vec::new();
        let mut all_ids = Vec::new();
        for sub in &mut grounded.phrases {
            if let Phrase::Noun(np) = sub {
                let result = self.ground_np(np, return_all_matches);
                confidences.push(result.confidence);
                all_ids.extend(result.resolved_ids.clone());
                if let Some(Phrase::Noun(grounded_np)) = result.grounded_phrase {
                    *np = grounded_np;
                }
            }
        }
        if all_ids.is_empty() {
            return Layer2GroundingResult::failure(
                GroundingError::NoMatch {
                    description: phrase.original_text(),
                },
                self.config.unbound_confidence,
            );
        }
        let confidence = confidences.iter().sum::<f32>() / confidences.len() as f32;
        Layer2GroundingResult {
            success: true,
            confidence,
            description: format!("grounded coordination to {}", all_ids.join(", ")),
            resolved_ids: all_ids,
            grounded_phrase: Some(Phrase::Conjunction(grounded)),
            alternatives: Vec::new(),
            error: None,
        }
    }

    /// Multiply hypotheses by their grounding alternatives.
    ///
    /// For every NP token, the candidate list is the best match plus (for
    /// definite singular NPs with `return_all_matches`) its alternatives;
    /// the outbound hypotheses are the streamed Cartesian product across
    /// NPs, each with confidence
    /// `inbound × (base_blend + grounding_blend × mean)`.
    #[must_use]
    pub fn ground_hypotheses(
        &self,
        inbound: &[Hypothesis],
        return_all_matches: bool,
    ) -> (Vec<Hypothesis>, Vec<Layer2GroundingResult>) {
        let mut out = Vec::new();
        let mut all_results = Vec::new();

        for hypothesis in inbound {
            let mut np_positions: Vec<usize> = Vec::new();
            let mut option_lists: Vec<Vec<(f32, Option<Phrase>)>> = Vec::new();

            for (i, token) in hypothesis.tokens.iter().enumerate() {
                if !token.is_phrase_level(Dimension::Np) {
                    continue;
                }
                match token.phrase.as_deref() {
                    Some(Phrase::Noun(np)) => {
                        let result = self.ground_np(np, return_all_matches);
                        let mut options: Vec<(f32, Option<Phrase>)> = Vec::new();
                        if result.success {
                            options.push((result.confidence, result.grounded_phrase.clone()));
                            for (alt_conf, alt_id) in &result.alternatives {
                                let mut alt_np = np.clone();
                                alt_np.grounding = Some(Grounding {
                                    object_ids: vec![alt_id.clone()],
                                    confidence: *alt_conf,
                                    multiple: false,
                                });
                                options.push((*alt_conf, Some(Phrase::Noun(alt_np))));
                            }
                        } else {
                            warn!(description = %result.description, "noun phrase unbound");
                            options.push((result.confidence, None));
                        }
                        np_positions.push(i);
                        option_lists.push(options);
                        all_results.push(result);
                    }
                    Some(phrase @ Phrase::Conjunction(_)) => {
                        let result = self.ground_conjunction(phrase, return_all_matches);
                        let option = if result.success {
                            (result.confidence, result.grounded_phrase.clone())
                        } else {
                            (result.confidence, None)
                        };
                        np_positions.push(i);
                        option_lists.push(vec![option]);
                        all_results.push(result);
                    }
                    _ => {}
                }
            }

            if np_positions.is_empty() {
                out.push(hypothesis.clone());
                continue;
            }

            for combination in
                CartesianOdometer::new(option_lists.iter().map(Vec::len).collect())
                    .take(self.config.max_combinations)
            {
                let mut tokens: Vec<Token> = hypothesis.tokens.clone();
                let mut confidences = Vec::new();
                for (slot, &choice) in combination.iter().enumerate() {
                    let (conf, phrase) = &option_lists[slot][choice];
                    confidences.push(*conf);
                    if let Some(phrase) = phrase {
                        let idx = np_positions[slot];
                        tokens[idx] = tokens[idx].with_grounded(phrase.clone());
                    }
                }
                let mean = confidences.iter().sum::<f32>() / confidences.len() as f32;
                let combo_confidence =
                    self.config.base_blend + self.config.grounding_blend * mean;
                let mut grounded_hyp = hypothesis.clone();
                grounded_hyp.tokens = tokens;
                grounded_hyp.confidence = hypothesis.confidence * combo_confidence;
                out.push(grounded_hyp);
            }
        }

        sort_by_confidence(&mut out);
        (out, all_results)
    }
}

