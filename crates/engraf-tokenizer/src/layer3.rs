//! Layer 3: prepositional-phrase token replacement and attachment
//! enumeration.
//!
//! After PP spans become composite tokens, every PP enumerates its potential
//! attachment targets among the NP and PP tokens to its left (plus "no
//! attachment", which leaves the PP for the verb phrase at Layer 4). The
//! Cartesian product of choices across all PPs becomes one hypothesis per
//! combination; with a scene available, each combination is scored by the
//! spatial validator and incoherent ones are dropped.

use crate::config::TokenizerConfig;
use crate::coordination::run_layer;
use engraf_atn::{parse_pp, TokenStream};
use engraf_core::{
    sort_by_confidence, CartesianOdometer, Dimension, Hypothesis, Phrase, PhraseResult,
    PrepositionalPhrase, Token,
};
use engraf_scene::{Scene, SpatialValidator};
use tracing::{debug, warn};

fn parse(stream: &mut TokenStream<'_>) -> PhraseResult<Option<Phrase>> {
    parse_pp(stream).map(|p| p.map(Phrase::Prepositional))
}

/// Replace prepositional-phrase spans with composite PP tokens.
#[must_use]
pub fn tokenize_layer3(inbound: &[Hypothesis], config: &TokenizerConfig) -> Vec<Hypothesis> {
    run_layer(inbound, "Layer 3", config, &parse)
}

/// The first grounded scene-object id reachable inside a phrase.
fn grounded_object_id(phrase: &Phrase) -> Option<&str> {
    match phrase {
        Phrase::Noun(np) => np
            .grounding
            .as_ref()
            .and_then(|g| g.object_ids.first())
            .map(String::as_str),
        Phrase::Prepositional(pp) => grounded_object_id(pp.object.as_deref()?),
        Phrase::Conjunction(conj) => conj.phrases.iter().find_map(grounded_object_id),
        _ => None,
    }
}

/// Attach a PP to a target phrase, producing the rebuilt phrase.
fn attach_pp_to(target: &Phrase, pp: &PrepositionalPhrase) -> Option<Phrase> {
    match target {
        Phrase::Noun(np) => {
            let mut np = np.clone();
            np.attach_pp(pp.clone());
            Some(Phrase::Noun(np))
        }
        Phrase::Conjunction(conj) => {
            let mut conj = conj.clone();
            for sub in &mut conj.phrases {
                if let Phrase::Noun(np) = sub {
                    np.attach_pp(pp.clone());
                }
            }
            conj.vector += &pp.vector;
            Some(Phrase::Conjunction(conj))
        }
        Phrase::Prepositional(outer) => {
            let mut outer = outer.clone();
            let object = outer.object.take()?;
            let rebuilt = attach_pp_to(&object, pp)?;
            outer.vector += &pp.vector;
            outer.object = Some(Box::new(rebuilt));
            Some(Phrase::Prepositional(outer))
        }
        _ => None,
    }
}

/// Rebuild the target token at `index` with the PP attached, preserving any
/// grounded clone.
fn attach_to_token(token: &Token, pp: &PrepositionalPhrase) -> Option<Token> {
    let base = token.phrase.as_deref()?;
    let rebuilt = attach_pp_to(base, pp)?;
    let mut out = Token::composite(rebuilt);
    if let Some(grounded) = token.grounded_phrase.as_deref() {
        if let Some(regrounded) = attach_pp_to(grounded, pp) {
            out = out.with_grounded(regrounded);
        }
    }
    Some(out)
}

struct AttachmentSite {
    /// Token index of the PP being attached.
    pp_index: usize,
    /// Candidate target token indices, always preceded by `None`.
    targets: Vec<Option<usize>>,
}

fn attachment_sites(tokens: &[Token]) -> Vec<AttachmentSite> {
    let mut sites = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let plain_pp = token.is_phrase_level(Dimension::Pp)
            && matches!(token.phrase.as_deref(), Some(Phrase::Prepositional(_)));
        if !plain_pp {
            continue;
        }
        let mut targets: Vec<Option<usize>> = vec![None];
        for (j, prev) in tokens.iter().enumerate().take(i) {
            if prev.is_phrase_level(Dimension::Np) || prev.is_phrase_level(Dimension::Pp) {
                targets.push(Some(j));
            }
        }
        sites.push(AttachmentSite {
            pp_index: i,
            targets,
        });
    }
    sites
}

fn spatial_score(
    scene: &Scene,
    validator: &SpatialValidator,
    pp: &PrepositionalPhrase,
    target: &Phrase,
) -> f32 {
    let Some(prep) = pp.preposition.as_deref() else {
        return 0.5;
    };
    let reference = pp
        .object
        .as_deref()
        .and_then(grounded_object_id);
    let positioned = grounded_object_id(target);
    match (reference, positioned) {
        (Some(reference_id), Some(target_id)) => {
            validator.score_in_scene(scene, prep, reference_id, target_id)
        }
        _ => 0.5,
    }
}

/// Enumerate PP-attachment combinations for every hypothesis, spatially
/// validating them when a scene is available.
#[must_use]
pub fn enumerate_pp_attachments(
    hypotheses: Vec<Hypothesis>,
    scene: Option<&Scene>,
    validator: &SpatialValidator,
    config: &TokenizerConfig,
) -> Vec<Hypothesis> {
    let mut out = Vec::new();
    for hypothesis in hypotheses {
        let sites = attachment_sites(&hypothesis.tokens);
        if sites.is_empty() {
            out.push(hypothesis);
            continue;
        }
        let radices: Vec<usize> = sites.iter().map(|s| s.targets.len()).collect();
        for combination in CartesianOdometer::new(radices) {
            let mut tokens = hypothesis.tokens.clone();
            let mut removed = Vec::new();
            let mut scores = Vec::new();
            let mut attachments = 0usize;
            let mut coherent = true;

            // Right-to-left, so a PP that another PP attached into is read in
            // its already-extended form and the chain survives the rebuild.
            for (site, &choice) in sites.iter().zip(&combination).rev() {
                let Some(target_idx) = site.targets[choice] else {
                    continue;
                };
                let pp = match tokens[site.pp_index].effective_phrase() {
                    Some(Phrase::Prepositional(pp)) => pp.clone(),
                    _ => continue,
                };
                if let Some(scene) = scene {
                    let target_phrase = tokens[target_idx]
                        .effective_phrase()
                        .cloned()
                        .unwrap_or(Phrase::Prepositional(pp.clone()));
                    scores.push(spatial_score(scene, validator, &pp, &target_phrase));
                }
                match attach_to_token(&tokens[target_idx], &pp) {
                    Some(rebuilt) => {
                        tokens[target_idx] = rebuilt;
                        removed.push(site.pp_index);
                        attachments += 1;
                    }
                    None => {
                        coherent = false;
                        break;
                    }
                }
            }
            if !coherent {
                continue;
            }

            if !scores.is_empty() {
                let average: f32 = scores.iter().sum::<f32>() / scores.len() as f32;
                if average < config.spatial_threshold {
                    warn!(average, "attachment combination spatially incoherent");
                    continue;
                }
            }

            let kept: Vec<Token> = tokens
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !removed.contains(i))
                .map(|(_, t)| t)
                .collect();

            let mut confidence = (hypothesis.confidence
                - config.attachment_penalty * attachments as f32)
                .max(0.1);
            if !scores.is_empty() {
                let average: f32 = scores.iter().sum::<f32>() / scores.len() as f32;
                confidence *= average;
            }

            let mut description = hypothesis.description.clone();
            if attachments > 0 {
                description.push_str(&format!(" ({attachments} PP attachments)"));
            }
            let mut new_hyp = Hypothesis::new(kept, confidence, description);
            new_hyp.replacements = hypothesis.replacements.clone();
            out.push(new_hyp);
        }
    }
    sort_by_confidence(&mut out);
    debug!(combinations = out.len(), "PP attachment enumeration");
    out
}
