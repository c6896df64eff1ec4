//! The sentence interpreter: parsed sentences to scene mutations.
//!
//! This is the only component that mutates the scene. Each call parses the
//! input against a snapshot of the current scene, dispatches the predicate
//! verb phrases on their intent dimensions, applies the mutations, and
//! reports what changed. Every acted-on entity lands on the recent queue so
//! later pronouns can find it.

use crate::creator::{build_object, movement_target, requested_count};
use crate::renderer::Renderer;
use crate::resolver::{resolve_entities, resolve_targets};
use engraf_core::{Dimension, Phrase, SentencePhrase, VectorSpace, VerbPhrase};
use engraf_pipeline::LatnExecutor;
use engraf_scene::{Assembly, RecentEntry, Scene};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What one interpreted sentence did to the scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentenceOutcome {
    pub success: bool,
    pub message: String,
    pub objects_created: Vec<String>,
    pub objects_modified: Vec<String>,
    pub objects_removed: Vec<String>,
    pub assemblies_created: Vec<String>,
}

impl SentenceOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Interprets sentences against an owned scene, driving a renderer.
pub struct SentenceInterpreter<R: Renderer> {
    executor: LatnExecutor,
    scene: Scene,
    renderer: R,
}

impl<R: Renderer> SentenceInterpreter<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self::with_scene(renderer, Scene::new())
    }

    #[must_use]
    pub fn with_scene(renderer: R, scene: Scene) -> Self {
        Self {
            executor: LatnExecutor::new(),
            scene,
            renderer,
        }
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Remove everything from the scene.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.renderer.clear();
    }

    /// Parse and execute one sentence.
    pub fn interpret(&mut self, input: &str) -> SentenceOutcome {
        // The parser core reads a snapshot; mutations land on self.scene.
        self.executor.set_scene(self.scene.clone());
        let result = self.executor.execute_layer5(input);
        if !result.success {
            return SentenceOutcome::failure(result.description);
        }
        let Some(sentence) = result.best_sentence().cloned() else {
            return SentenceOutcome::failure(format!("no sentence reading for '{input}'"));
        };

        let mut outcome = SentenceOutcome {
            success: true,
            ..Default::default()
        };

        if sentence.tobe.is_some() && sentence.complement.is_some() && sentence.subject.is_some() {
            self.apply_copular(&sentence, &mut outcome);
        } else if let Some(predicate) = &sentence.predicate {
            for vp in flatten_verb_phrases(predicate) {
                self.apply_verb_phrase(&vp, &mut outcome);
            }
        } else {
            outcome.success = false;
            outcome.message = format!("nothing to do for '{input}'");
            return outcome;
        }

        for id in outcome.objects_modified.clone() {
            self.scene.touch_recent(RecentEntry::Object(id));
        }
        if outcome.message.is_empty() {
            outcome.message = summarize(&outcome);
        }
        info!(message = %outcome.message, "sentence interpreted");
        outcome
    }

    /// "the cube is red", "the cube and the sphere are tall"
    fn apply_copular(&mut self, sentence: &SentencePhrase, outcome: &mut SentenceOutcome) {
        let Some(subject) = sentence.subject.as_deref() else {
            return;
        };
        let Some(complement) = &sentence.complement else {
            return;
        };
        let targets = resolve_targets(&self.scene, subject);
        if targets.is_empty() {
            outcome.success = false;
            outcome.message = format!("no scene objects for '{}'", subject.original_text());
            return;
        }
        for id in targets {
            self.restyle_object(&id, complement, outcome);
        }
    }

    fn apply_verb_phrase(&mut self, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        if vp.is_tobe() {
            // Copular predicates are handled at sentence level.
            return;
        }
        let v = &vp.vector;
        if v.isa(Dimension::Edit) {
            self.apply_delete(vp, outcome);
        } else if v.isa(Dimension::Organize) {
            self.apply_organize(vp, outcome);
        } else if v.isa(Dimension::Naming) {
            self.apply_naming(vp, outcome);
        } else if v.isa(Dimension::Select) {
            self.apply_select(vp, outcome);
        } else if v.isa(Dimension::Create) && !is_transformation(vp) {
            self.apply_create(vp, outcome);
        } else if v.isa(Dimension::Transform) || v.isa(Dimension::Move) {
            self.apply_transform(vp, outcome);
        } else {
            warn!(verb = vp.verb.as_deref().unwrap_or("?"), "unhandled verb intent");
            outcome.success = false;
            outcome.message = format!(
                "don't know how to '{}'",
                vp.verb.as_deref().unwrap_or("?")
            );
        }
    }

    fn apply_create(&mut self, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let Some(object) = vp.object.as_deref() else {
            outcome.success = false;
            outcome.message = "nothing to create".to_string();
            return;
        };
        let nps: Vec<_> = match object {
            Phrase::Noun(np) => vec![np.clone()],
            Phrase::Conjunction(conj) => conj.noun_phrases().into_iter().cloned().collect(),
            _ => Vec::new(),
        };
        for np in nps {
            for _ in 0..requested_count(&np) {
                let obj = build_object(&self.scene, &np, &vp.preps);
                debug!(id = %obj.object_id, "creating object");
                self.renderer.render_object(&obj);
                outcome.objects_created.push(obj.object_id.clone());
                self.scene.add_object(obj);
            }
        }
    }

    fn apply_transform(&mut self, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let targets = match vp.object.as_deref() {
            Some(phrase) => resolve_targets(&self.scene, phrase),
            None => Vec::new(),
        };
        if targets.is_empty() {
            outcome.success = false;
            outcome.message = "no target objects to modify".to_string();
            return;
        }

        let v = &vp.vector;
        for id in targets {
            if v.isa(Dimension::Move) {
                self.move_object(&id, vp, outcome);
            } else if v.isa(Dimension::Rotate) {
                self.rotate_object(&id, vp, outcome);
            } else if v.isa(Dimension::Scale) {
                self.scale_object(&id, vp, outcome);
            } else {
                // style verbs and generic transforms ("make it bigger")
                let complement = complement_vector(vp);
                self.restyle_object(&id, &complement, outcome);
            }
        }
    }

    fn move_object(&mut self, id: &str, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let Some(position) = movement_target(&self.scene, &vp.preps) else {
            outcome.success = false;
            outcome.message = format!("no destination for moving {id}");
            return;
        };
        if let Some(obj) = self.scene.find_object_mut(id) {
            obj.set_position(position.0, position.1, position.2);
        }
        if let Some(obj) = self.scene.find_object(id) {
            self.renderer.update_object(obj);
            outcome.objects_modified.push(id.to_string());
        }
    }

    fn rotate_object(&mut self, id: &str, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let (rx, ry, rz) = rotation_delta(vp);
        if let Some(obj) = self.scene.find_object_mut(id) {
            for (dim, delta) in [
                (Dimension::RotX, rx),
                (Dimension::RotY, ry),
                (Dimension::RotZ, rz),
            ] {
                let current = obj.vector.get(dim);
                obj.vector.set(dim, current + delta);
            }
        }
        if let Some(obj) = self.scene.find_object(id) {
            self.renderer.update_object(obj);
            outcome.objects_modified.push(id.to_string());
        }
    }

    fn scale_object(&mut self, id: &str, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let factor = scale_factor(vp);
        if let Some(obj) = self.scene.find_object_mut(id) {
            let (sx, sy, sz) = obj.scale();
            obj.vector.set(Dimension::ScaleX, sx * factor.0);
            obj.vector.set(Dimension::ScaleY, sy * factor.1);
            obj.vector.set(Dimension::ScaleZ, sz * factor.2);
        }
        if let Some(obj) = self.scene.find_object(id) {
            self.renderer.update_object(obj);
            outcome.objects_modified.push(id.to_string());
        }
    }

    /// Apply a complement vector: strong colors replace color, scale
    /// dimensions multiply extents, texture and transparency overwrite.
    fn restyle_object(&mut self, id: &str, complement: &VectorSpace, outcome: &mut SentenceOutcome) {
        if let Some(obj) = self.scene.find_object_mut(id) {
            let has_color = [Dimension::Red, Dimension::Green, Dimension::Blue]
                .iter()
                .any(|d| complement.get(*d) > 0.0);
            if has_color {
                for dim in [Dimension::Red, Dimension::Green, Dimension::Blue] {
                    obj.vector.set(dim, complement.get(dim));
                }
            }
            for dim in [Dimension::ScaleX, Dimension::ScaleY, Dimension::ScaleZ] {
                let factor = complement.get(dim);
                if factor > 0.0 {
                    let current = obj.vector.get(dim);
                    let base = if current == 0.0 { 1.0 } else { current };
                    obj.vector.set(dim, base * factor);
                }
            }
            for dim in [Dimension::Texture, Dimension::Transparency] {
                if complement.get(dim) > 0.0 {
                    obj.vector.set(dim, complement.get(dim));
                }
            }
        }
        if let Some(obj) = self.scene.find_object(id) {
            self.renderer.update_object(obj);
            outcome.objects_modified.push(id.to_string());
        }
    }

    fn apply_organize(&mut self, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let verb = vp.verb.as_deref().unwrap_or("");
        if verb == "ungroup" {
            let entities = match vp.object.as_deref() {
                Some(phrase) => resolve_entities(&self.scene, phrase),
                None => Vec::new(),
            };
            for id in entities {
                if self.scene.remove_assembly(&id).is_some() {
                    outcome.message = format!("dissolved {id}");
                }
            }
            return;
        }

        let targets = match vp.object.as_deref() {
            Some(phrase) => resolve_targets(&self.scene, phrase),
            None => Vec::new(),
        };
        if targets.len() < 2 {
            outcome.success = false;
            outcome.message = "grouping needs at least two objects".to_string();
            return;
        }
        let members: Vec<_> = targets
            .iter()
            .filter_map(|id| self.scene.find_object(id).cloned())
            .collect();
        let assembly_id = format!("assembly_{}", self.scene.assemblies().len() + 1);
        self.scene
            .add_assembly(Assembly::new(assembly_id.clone(), members));
        outcome.assemblies_created.push(assembly_id);
    }

    fn apply_delete(&mut self, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let entities = match vp.object.as_deref() {
            Some(phrase) => resolve_entities(&self.scene, phrase),
            None => Vec::new(),
        };
        if entities.is_empty() {
            outcome.success = false;
            outcome.message = "nothing to remove".to_string();
            return;
        }
        for id in entities {
            if let Some(assembly) = self.scene.find_assembly(&id) {
                let member_ids: Vec<String> = assembly
                    .objects
                    .iter()
                    .map(|o| o.object_id.clone())
                    .collect();
                self.scene.remove_assembly(&id);
                for member in member_ids {
                    self.scene.remove_object(&member);
                    self.renderer.remove_object(&member);
                    outcome.objects_removed.push(member);
                }
            } else if self.scene.remove_object(&id).is_some() {
                self.renderer.remove_object(&id);
                outcome.objects_removed.push(id);
            }
        }
    }

    fn apply_naming(&mut self, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let name = vp.naming_complement.clone().or_else(|| {
            vp.object_noun_phrase()
                .and_then(|np| np.proper_noun.clone())
        });
        let Some(name) = name else {
            outcome.success = false;
            outcome.message = "no name given".to_string();
            return;
        };
        let entities = match vp.object.as_deref() {
            Some(phrase) => resolve_entities(&self.scene, phrase),
            None => Vec::new(),
        };
        for id in &entities {
            if let Some(assembly) = self.scene.find_assembly_mut(id) {
                assembly.proper_name = Some(name.clone());
            } else if let Some(obj) = self.scene.find_object_mut(id) {
                obj.metadata.proper_name = Some(name.clone());
                outcome.objects_modified.push(id.clone());
            }
        }
        outcome.message = format!("named {} '{}'", entities.join(", "), name);
    }

    fn apply_select(&mut self, vp: &VerbPhrase, outcome: &mut SentenceOutcome) {
        let entities = match vp.object.as_deref() {
            Some(phrase) => resolve_entities(&self.scene, phrase),
            None => Vec::new(),
        };
        for id in &entities {
            let entry = if self.scene.find_assembly(id).is_some() {
                RecentEntry::Assembly(id.clone())
            } else {
                RecentEntry::Object(id.clone())
            };
            self.scene.touch_recent(entry);
        }
        outcome.message = format!("selected {}", entities.join(", "));
    }
}

/// "make it bigger" transforms; "make a cube" creates.
fn is_transformation(vp: &VerbPhrase) -> bool {
    if !vp.vector.isa(Dimension::Transform) {
        return false;
    }
    if !vp.adjective_complement.is_empty() {
        return true;
    }
    match vp.object_noun_phrase() {
        Some(np) => np.is_pronoun() || np.grounding.is_some(),
        None => false,
    }
}

fn flatten_verb_phrases(predicate: &Phrase) -> Vec<VerbPhrase> {
    match predicate {
        Phrase::Verb(vp) => vec![vp.clone()],
        Phrase::Conjunction(conj) => conj
            .phrases
            .iter()
            .filter_map(Phrase::as_verb)
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

/// Sum of the VP's adjective complement contributions.
fn complement_vector(vp: &VerbPhrase) -> VectorSpace {
    let mut out = VectorSpace::new();
    for contribution in &vp.adjective_complement {
        out += contribution;
    }
    out
}

/// Rotation from a vector-literal PP, else a bare number on the object NP
/// of a "by" PP (degrees about the vertical axis).
fn rotation_delta(vp: &VerbPhrase) -> (f32, f32, f32) {
    for pp in &vp.preps {
        if let Some(literal) = &pp.vector_literal {
            return (
                literal.get(Dimension::LocX),
                literal.get(Dimension::LocY),
                literal.get(Dimension::LocZ),
            );
        }
        if let Some(np) = pp.noun_phrase() {
            let number = np.vector.get(Dimension::Number);
            if number != 0.0 {
                return (0.0, number, 0.0);
            }
        }
    }
    (0.0, 90.0, 0.0)
}

/// Uniform scale factor from a "by N" PP or the adjective complement.
fn scale_factor(vp: &VerbPhrase) -> (f32, f32, f32) {
    for pp in &vp.preps {
        if let Some(np) = pp.noun_phrase() {
            let number = np.vector.get(Dimension::Number);
            if number > 0.0 {
                return (number, number, number);
            }
        }
    }
    let complement = complement_vector(vp);
    let pick = |d: Dimension| {
        let v = complement.get(d);
        if v > 0.0 {
            v
        } else {
            1.0
        }
    };
    (
        pick(Dimension::ScaleX),
        pick(Dimension::ScaleY),
        pick(Dimension::ScaleZ),
    )
}

fn summarize(outcome: &SentenceOutcome) -> String {
    let mut parts = Vec::new();
    if !outcome.objects_created.is_empty() {
        parts.push(format!("created {}", outcome.objects_created.join(", ")));
    }
    if !outcome.objects_modified.is_empty() {
        parts.push(format!("modified {}", outcome.objects_modified.join(", ")));
    }
    if !outcome.objects_removed.is_empty() {
        parts.push(format!("removed {}", outcome.objects_removed.join(", ")));
    }
    if !outcome.assemblies_created.is_empty() {
        parts.push(format!("grouped {}", outcome.assemblies_created.join(", ")));
    }
    if parts.is_empty() {
        "no changes".to_string()
    } else {
        parts.join("; ")
    }
}
