//! End-to-end executor behavior over representative scene-language inputs.

use engraf_core::{Dimension, VectorSpace};
use engraf_pipeline::{ExecutorOptions, LatnExecutor, PipelineError};
use engraf_scene::{RecentEntry, Scene, SceneObject};

fn object_at(id: &str, name: &str, x: f32, y: f32, z: f32) -> SceneObject {
    let mut obj = SceneObject::new(id, name, VectorSpace::new());
    obj.set_position(x, y, z);
    obj
}

#[test]
fn draw_a_red_cube_parses_as_imperative() {
    let executor = LatnExecutor::new();
    let result = executor.execute_layer5("draw a red cube");
    assert!(result.success);
    assert!(result.confidence >= 0.9);

    let sentence = result.best_sentence().expect("sentence reading");
    assert!(sentence.subject.is_none());
    let vp = sentence.predicate.as_deref().unwrap().as_verb().unwrap();
    assert_eq!(vp.verb.as_deref(), Some("draw"));
    let np = vp.object_noun_phrase().unwrap();
    assert_eq!(np.determiner.as_deref(), Some("a"));
    assert_eq!(np.noun.as_deref(), Some("cube"));
    assert!(np.vector.isa(Dimension::Red));
}

#[test]
fn coordinated_subject_with_copular_predicate() {
    let mut scene = Scene::new();
    scene.add_object(object_at("cube_1", "cube", 0.0, 0.0, 0.0));
    scene.add_object(object_at("sphere_1", "sphere", 2.0, 0.0, 0.0));
    let executor = LatnExecutor::with_scene(scene);

    let result = executor.execute_layer5("the cube and the sphere are tall");
    assert!(result.success);
    let sentence = result.best_sentence().expect("sentence reading");
    assert_eq!(sentence.tobe.as_deref(), Some("are"));

    let subject = sentence.subject.as_deref().unwrap();
    let conj = subject.as_conjunction().expect("coordinated subject");
    assert_eq!(conj.conjunction, "and");
    assert!(conj.vector.isa(Dimension::Plural));
    let ids: Vec<String> = conj
        .noun_phrases()
        .iter()
        .filter_map(|np| np.grounding.as_ref())
        .flat_map(|g| g.object_ids.clone())
        .collect();
    assert!(ids.contains(&"cube_1".to_string()));
    assert!(ids.contains(&"sphere_1".to_string()));

    // "tall" raises the vertical scale dimension above 1
    let complement = sentence.complement.as_ref().expect("vector complement");
    assert!(complement.get(Dimension::ScaleY) > 1.0);

    // grounding was highly confident
    let best = result
        .layer4
        .layer3
        .layer2
        .grounding_results
        .iter()
        .filter(|r| r.success)
        .map(|r| r.confidence)
        .fold(0.0f32, f32::max);
    assert!(best >= 0.95);
}

#[test]
fn spatial_validator_prefers_vp_attachment_for_move() {
    let mut scene = Scene::new();
    scene.add_object(object_at("cube_1", "cube", 0.0, 0.0, 0.0));
    scene.add_object(object_at("sphere_1", "sphere", 3.0, 0.0, 0.0));
    let executor = LatnExecutor::with_scene(scene);

    let result = executor.execute_layer5("move the sphere above the cube");
    assert!(result.success);
    let sentence = result.best_sentence().expect("sentence reading");
    let vp = sentence.predicate.as_deref().unwrap().as_verb().unwrap();
    assert_eq!(vp.verb.as_deref(), Some("move"));

    // the PP stayed on the VP: the sphere is beside the cube today, so the
    // NP attachment reading is spatially incoherent
    assert_eq!(vp.preps.len(), 1);
    let pp = &vp.preps[0];
    assert_eq!(pp.preposition.as_deref(), Some("above"));
    let object_np = vp.object_noun_phrase().unwrap();
    assert!(object_np.preps.is_empty());

    // both NPs grounded to their scene objects
    assert_eq!(
        object_np.grounding.as_ref().unwrap().object_ids,
        vec!["sphere_1"]
    );
    assert_eq!(
        pp.noun_phrase().unwrap().grounding.as_ref().unwrap().object_ids,
        vec!["cube_1"]
    );
}

#[test]
fn make_it_bigger_resolves_pronoun_through_recent_queue() {
    let mut scene = Scene::new();
    let mut red_cube = object_at("red_cube_1", "cube", 0.0, 0.0, 0.0);
    red_cube.vector.set(Dimension::Red, 1.0);
    scene.add_object(red_cube);
    scene.touch_recent(RecentEntry::Object("red_cube_1".into()));
    let executor = LatnExecutor::with_scene(scene);

    let result = executor.execute_layer5("make it bigger");
    assert!(result.success);
    let sentence = result.best_sentence().expect("sentence reading");
    let vp = sentence.predicate.as_deref().unwrap().as_verb().unwrap();
    assert_eq!(vp.verb.as_deref(), Some("make"));
    assert!(vp.vector.isa(Dimension::Transform));
    assert_eq!(vp.adjective_complement.len(), 1);
    assert!(vp.adjective_complement[0].get(Dimension::ScaleX) > 1.0);

    let np = vp.object_noun_phrase().unwrap();
    assert_eq!(np.pronoun.as_deref(), Some("it"));
    assert_eq!(
        np.grounding.as_ref().unwrap().object_ids,
        vec!["red_cube_1"]
    );
}

#[test]
fn bare_vector_literal_pp_reaches_layer3() {
    let executor = LatnExecutor::new();
    let result = executor.execute_layer3("at [1,2,3]");
    assert!(result.success);
    let top = &result.hypotheses[0];
    assert_eq!(top.len(), 1);
    let token = &top.tokens[0];
    assert!(token.is_phrase_level(Dimension::Pp));
    assert!(token.isa(Dimension::Prep));
    assert_eq!(token.vector.get(Dimension::LocX), 1.0);
    assert_eq!(token.vector.get(Dimension::LocY), 2.0);
    assert_eq!(token.vector.get(Dimension::LocZ), 3.0);
    assert_eq!(result.prepositional_phrases.len(), 1);
}

#[test]
fn three_way_coordination_with_and_without_oxford_comma() {
    let executor = LatnExecutor::new();
    for input in [
        "the red cube, the blue sphere and the green cylinder",
        "the red cube, the blue sphere, and the green cylinder",
    ] {
        let result = executor.execute_layer2(input);
        assert!(result.success);
        let coordinated = result
            .hypotheses
            .iter()
            .find(|h| h.len() == 1 && h.tokens[0].isa(Dimension::Conj))
            .unwrap_or_else(|| panic!("no coordinated hypothesis for '{input}'"));
        let conj = coordinated.tokens[0]
            .effective_phrase()
            .unwrap()
            .as_conjunction()
            .unwrap();
        assert_eq!(conj.conjunction, "and");
        assert_eq!(conj.phrases.len(), 3);
    }
}

#[test]
fn higher_layers_transparently_run_lower_layers() {
    let executor = LatnExecutor::new();
    let result = executor.execute_layer5("draw a red cube");
    assert!(result.layer4.success);
    assert!(result.layer4.layer3.success);
    assert!(result.layer4.layer3.layer2.success);
    assert!(result.layer4.layer3.layer2.layer1.success);
    assert!(!result.layer4.verb_phrases.is_empty());
    assert!(!result.layer4.layer3.layer2.noun_phrases.is_empty());
}

#[test]
fn hypothesis_lists_stay_sorted_and_bounded() {
    let mut options = ExecutorOptions::default();
    options.max_hypotheses = 4;
    let executor = LatnExecutor::new().with_options(options);
    let result = executor.execute_layer5("move the sphere above the cube and the red cube");
    for layer_hyps in [
        &result.layer4.layer3.layer2.hypotheses,
        &result.layer4.layer3.hypotheses,
        &result.layer4.hypotheses,
        &result.hypotheses,
    ] {
        assert!(layer_hyps.len() <= 4);
        for pair in layer_hyps.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }
}

#[test]
fn empty_input_fails_descriptively() {
    let executor = LatnExecutor::new();
    let result = executor.execute_layer5("");
    assert!(!result.success);
    assert!(result.hypotheses.is_empty());
    assert!(result.description.contains("Layer"));

    match executor.parse("") {
        Err(PipelineError::Lexicon(_)) => {}
        other => panic!("expected lexicon error, got {other:?}"),
    }
}

#[test]
fn unknown_word_fails_the_parse() {
    let executor = LatnExecutor::new();
    match executor.parse("florp") {
        Err(PipelineError::Lexicon(err)) => {
            assert!(err.to_string().contains("florp"));
        }
        other => panic!("expected lexicon error, got {other:?}"),
    }
}

#[test]
fn conjunction_only_input_reports_parse_failure() {
    let executor = LatnExecutor::new();
    match executor.parse("and") {
        Err(PipelineError::ParseFailure { .. }) => {}
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[test]
fn pronoun_against_empty_scene_degrades_not_crashes() {
    let executor = LatnExecutor::with_scene(Scene::new());
    let result = executor.execute_layer2("move it");
    assert!(result.success);
    assert!(result
        .grounding_results
        .iter()
        .any(|r| !r.success && r.confidence == 0.0));
}

#[test]
fn serialized_hypothesis_uses_bracket_vocabulary() {
    let mut scene = Scene::new();
    scene.add_object(object_at("sphere_1", "sphere", 0.0, 0.0, 0.0));
    let executor = LatnExecutor::with_scene(scene);
    let result = executor.execute_layer5("move the sphere");
    let serialized = result.serialized().expect("serialized form");
    assert!(serialized.contains("[SP"));
    assert!(serialized.contains("[VP"));
    assert!(serialized.contains("]NP<sphere_1>"));
    assert!(serialized.ends_with("]SP"));
}

#[test]
fn determinism_identical_runs_produce_identical_rankings() {
    let executor = LatnExecutor::new();
    let a = executor.execute_layer5("move the sphere above the cube");
    let b = executor.execute_layer5("move the sphere above the cube");
    let words_a: Vec<Vec<String>> = a
        .hypotheses
        .iter()
        .map(|h| h.token_words().iter().map(|s| s.to_string()).collect())
        .collect();
    let words_b: Vec<Vec<String>> = b
        .hypotheses
        .iter()
        .map(|h| h.token_words().iter().map(|s| s.to_string()).collect())
        .collect();
    assert_eq!(words_a, words_b);
    let conf_a: Vec<f32> = a.hypotheses.iter().map(|h| h.confidence).collect();
    let conf_b: Vec<f32> = b.hypotheses.iter().map(|h| h.confidence).collect();
    assert_eq!(conf_a, conf_b);
}

#[test]
fn grounding_can_be_disabled() {
    let mut scene = Scene::new();
    scene.add_object(object_at("cube_1", "cube", 0.0, 0.0, 0.0));
    let mut options = ExecutorOptions::default();
    options.enable_semantic_grounding = false;
    let executor = LatnExecutor::with_scene(scene).with_options(options);
    let result = executor.execute_layer2("the cube");
    assert!(result.success);
    assert!(result.grounding_results.is_empty());
    assert!(result.noun_phrases[0].grounding.is_none());
}
