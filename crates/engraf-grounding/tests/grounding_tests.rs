//! Layer 2/3 grounding over real tokenizer output.

use engraf_core::{Dimension, Hypothesis, Phrase, VectorSpace};
use engraf_grounding::{GroundingError, Layer2Grounder, Layer3Grounder};
use engraf_lexicon::Vocabulary;
use engraf_scene::{Scene, SceneObject};
use engraf_tokenizer::{tokenize_layer1, tokenize_layer2, tokenize_layer3, TokenizerConfig};

fn scene_with(objects: &[(&str, &str, Dimension)]) -> Scene {
    let mut scene = Scene::new();
    for (id, name, color) in objects {
        let mut v = VectorSpace::new();
        v.set(*color, 1.0);
        scene.add_object(SceneObject::new(*id, *name, v));
    }
    scene
}

fn layer2(input: &str) -> Vec<Hypothesis> {
    let config = TokenizerConfig::default();
    let l1 = tokenize_layer1(input, &Vocabulary::core(), &config).unwrap();
    tokenize_layer2(&l1, &config)
}

#[test]
fn definite_singular_grounds_to_best_match() {
    let scene = scene_with(&[
        ("cube_1", "cube", Dimension::Red),
        ("sphere_1", "sphere", Dimension::Blue),
    ]);
    let grounder = Layer2Grounder::new(&scene);
    let (grounded, results) = grounder.ground_hypotheses(&layer2("the red cube"), false);

    assert!(results.iter().any(|r| r.success));
    let top = &grounded[0];
    let np_token = &top.tokens[0];
    let grounded_np = np_token.grounded_phrase.as_deref().unwrap();
    let grounding = grounded_np.as_noun().unwrap().grounding.as_ref().unwrap();
    assert_eq!(grounding.object_ids, vec!["cube_1"]);
    assert!(grounding.confidence > 0.9);
}

#[test]
fn grounding_blends_confidence_into_hypothesis() {
    let scene = scene_with(&[("cube_1", "cube", Dimension::Red)]);
    let grounder = Layer2Grounder::new(&scene);
    let inbound = layer2("the red cube");
    let base = inbound[0].confidence;
    let (grounded, _) = grounder.ground_hypotheses(&inbound, false);
    // 0.7 + 0.3 * mean; perfect grounding keeps confidence at the base
    assert!(grounded[0].confidence <= base);
    assert!(grounded[0].confidence >= base * 0.7);
}

#[test]
fn definite_singular_with_alternatives_multiplies_hypotheses() {
    let scene = scene_with(&[
        ("cube_1", "cube", Dimension::Red),
        ("cube_2", "cube", Dimension::Red),
    ]);
    let grounder = Layer2Grounder::new(&scene);
    let inbound = layer2("the red cube");
    let single = grounder.ground_hypotheses(&inbound, false).0.len();
    let multiplied = grounder.ground_hypotheses(&inbound, true).0.len();
    assert!(multiplied > single);
}

#[test]
fn plural_np_grounds_to_all_candidates() {
    let scene = scene_with(&[
        ("cube_1", "cube", Dimension::Red),
        ("cube_2", "cube", Dimension::Red),
    ]);
    let grounder = Layer2Grounder::new(&scene);
    let (grounded, results) = grounder.ground_hypotheses(&layer2("the cubes"), false);
    let ok = results.iter().find(|r| r.success).unwrap();
    assert_eq!(ok.resolved_ids.len(), 2);
    assert!(grounded[0]
        .groundings()
        .iter()
        .any(|g| g.multiple && g.object_ids.len() == 2));
}

#[test]
fn singular_pronoun_resolves_to_most_recent() {
    let scene = scene_with(&[
        ("cube_1", "cube", Dimension::Red),
        ("sphere_1", "sphere", Dimension::Blue),
    ]);
    let grounder = Layer2Grounder::new(&scene);
    let (_, results) = grounder.ground_hypotheses(&layer2("it"), false);
    let ok = results.iter().find(|r| r.success).unwrap();
    assert_eq!(ok.resolved_ids, vec!["sphere_1"]);
    assert_eq!(ok.confidence, 1.0);
}

#[test]
fn plural_pronoun_resolves_to_recent_history() {
    let scene = scene_with(&[
        ("cube_1", "cube", Dimension::Red),
        ("sphere_1", "sphere", Dimension::Blue),
    ]);
    let grounder = Layer2Grounder::new(&scene);
    let (_, results) = grounder.ground_hypotheses(&layer2("them"), false);
    let ok = results.iter().find(|r| r.success).unwrap();
    assert_eq!(ok.resolved_ids.len(), 2);
}

#[test]
fn pronoun_against_empty_scene_fails_without_crash() {
    let scene = Scene::new();
    let grounder = Layer2Grounder::new(&scene);
    let (grounded, results) = grounder.ground_hypotheses(&layer2("it"), false);
    let failed = results.iter().find(|r| !r.success).unwrap();
    assert!(matches!(
        failed.error,
        Some(GroundingError::NoReferent { .. })
    ));
    assert_eq!(failed.confidence, 0.0);
    // the hypothesis survives, unbound
    assert!(!grounded.is_empty());
    assert!(grounded[0].groundings().is_empty());
}

#[test]
fn unmatched_np_pins_hypothesis_at_unbound_confidence() {
    let scene = scene_with(&[("sphere_1", "sphere", Dimension::Blue)]);
    let grounder = Layer2Grounder::new(&scene);
    let inbound = layer2("the red cube");
    let base = inbound[0].confidence;
    let (grounded, results) = grounder.ground_hypotheses(&inbound, false);
    assert!(results.iter().all(|r| !r.success));
    // mean = 0.5 -> blended 0.85
    assert!((grounded[0].confidence - base * 0.85).abs() < 1e-5);
}

#[test]
fn coordination_grounds_each_member() {
    let scene = scene_with(&[
        ("cube_1", "cube", Dimension::Red),
        ("sphere_1", "sphere", Dimension::Blue),
    ]);
    let grounder = Layer2Grounder::new(&scene);
    let inbound = layer2("the cube and the sphere");
    let (grounded, _) = grounder.ground_hypotheses(&inbound, false);
    let conj_hyp = grounded
        .iter()
        .find(|h| h.len() == 1 && h.tokens[0].isa(Dimension::Conj))
        .expect("coordinated hypothesis");
    let groundings = conj_hyp.groundings();
    assert_eq!(groundings.len(), 2);
    let ids: Vec<&str> = groundings
        .iter()
        .flat_map(|g| g.object_ids.iter().map(String::as_str))
        .collect();
    assert!(ids.contains(&"cube_1"));
    assert!(ids.contains(&"sphere_1"));
}

#[test]
fn vector_literal_pp_grounds_to_absolute_location() {
    let scene = Scene::new();
    let grounder = Layer3Grounder::new(&scene);
    let config = TokenizerConfig::default();
    let l3 = tokenize_layer3(&layer2("at [1,2,3]"), &config);
    let pp = l3[0].tokens[0]
        .effective_phrase()
        .unwrap()
        .as_prepositional()
        .unwrap()
        .clone();
    let result = grounder.ground_pp(&pp, false);
    assert!(result.success);
    assert_eq!(result.confidence, 1.0);
    let loc = result.spatial_vector.unwrap();
    assert_eq!(loc.get(Dimension::LocX), 1.0);
    assert_eq!(loc.get(Dimension::LocZ), 3.0);
    assert!(result.reference_object.is_none());
}

#[test]
fn relational_pp_builds_spatial_vector_with_reference() {
    let mut scene = Scene::new();
    let mut cube = SceneObject::new("cube_1", "cube", VectorSpace::new());
    cube.set_position(2.0, 0.0, 1.0);
    scene.add_object(cube);

    let grounder = Layer3Grounder::new(&scene);
    let config = TokenizerConfig::default();
    let l3 = tokenize_layer3(&layer2("above the cube"), &config);
    let pp = l3[0].tokens[0]
        .effective_phrase()
        .unwrap()
        .as_prepositional()
        .unwrap()
        .clone();
    let result = grounder.ground_pp(&pp, false);
    assert!(result.success);
    assert_eq!(result.reference_object.as_deref(), Some("cube_1"));
    assert_eq!(result.preposition.as_deref(), Some("above"));
    let spatial = result.spatial_vector.unwrap();
    // preposition semantics plus the resolved object's vector
    assert!(spatial.isa(Dimension::SpatialLocation));
    assert_eq!(spatial.get(Dimension::LocX), 2.0);
    assert!(spatial.word().unwrap().starts_with("SpatialRel("));
}
