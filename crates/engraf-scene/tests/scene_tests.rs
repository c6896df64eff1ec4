//! Scene model invariants: recent queue, assemblies, noun phrase search.

use engraf_core::{Dimension, NounPhrase, VectorSpace};
use engraf_scene::{Assembly, ObjectMetadata, RecentEntry, Scene, SceneObject};

fn cube(id: &str, x: f32) -> SceneObject {
    let mut obj = SceneObject::new(id, "cube", VectorSpace::new());
    obj.set_position(x, 0.0, 0.0);
    obj
}

fn colored(id: &str, name: &str, dim: Dimension) -> SceneObject {
    let mut v = VectorSpace::new();
    v.set(dim, 1.0);
    SceneObject::new(id, name, v)
}

fn np_with_noun(noun: &str) -> NounPhrase {
    let mut np = NounPhrase::new();
    np.apply_noun(&VectorSpace::from_word(
        noun,
        &[(Dimension::Noun, 1.0), (Dimension::Singular, 1.0)],
    ))
    .unwrap();
    np
}

#[test]
fn objects_get_unique_ids_and_ranks() {
    let mut scene = Scene::new();
    scene.add_object(cube("cube_1", 0.0));
    assert_eq!(scene.next_object_id("cube"), "cube_2");
    scene.add_object(cube("cube_2", 2.0));
    assert_eq!(scene.objects()[0].creation_rank, 0);
    assert_eq!(scene.objects()[1].creation_rank, 1);
}

#[test]
fn recent_queue_deduplicates_and_preserves_order() {
    let mut scene = Scene::new();
    scene.add_object(cube("cube_1", 0.0));
    scene.add_object(cube("cube_2", 2.0));
    scene.touch_recent(RecentEntry::Object("cube_1".into()));
    assert_eq!(
        scene.recent(),
        &[
            RecentEntry::Object("cube_2".into()),
            RecentEntry::Object("cube_1".into()),
        ]
    );
}

#[test]
fn assembly_membership_is_exclusive() {
    let mut scene = Scene::new();
    scene.add_object(cube("cube_1", 0.0));
    scene.add_object(cube("cube_2", 2.0));
    let members = scene.objects().to_vec();
    scene.add_assembly(Assembly::new("assembly_1", members));

    assert!(scene.objects().is_empty());
    assert_eq!(scene.assemblies().len(), 1);
    assert_eq!(scene.all_objects().count(), 2);
    assert!(scene.find_object("cube_1").is_some());

    scene.remove_assembly("assembly_1");
    assert_eq!(scene.objects().len(), 2);
}

#[test]
fn it_resolves_to_most_recent_entity() {
    let mut scene = Scene::new();
    scene.add_object(cube("cube_1", 0.0));
    scene.add_object(cube("cube_2", 2.0));
    let resolved = scene.resolve_pronoun("it");
    assert_eq!(resolved, vec![RecentEntry::Object("cube_2".into())]);
}

#[test]
fn them_resolves_back_to_the_assembly_boundary() {
    let mut scene = Scene::new();
    scene.add_object(cube("cube_1", 0.0));
    scene.add_object(cube("cube_2", 2.0));
    // no assembly yet: all history
    assert_eq!(scene.resolve_pronoun("them").len(), 2);

    let members = scene.objects().to_vec();
    scene.add_assembly(Assembly::new("assembly_1", members));
    scene.add_object(cube("cube_3", 4.0));
    let resolved = scene.resolve_pronoun("they");
    assert_eq!(
        resolved,
        vec![
            RecentEntry::Assembly("assembly_1".into()),
            RecentEntry::Object("cube_3".into()),
        ]
    );
}

#[test]
fn pronoun_against_empty_scene_is_empty_not_a_crash() {
    let scene = Scene::new();
    assert!(scene.resolve_pronoun("it").is_empty());
    assert!(scene.resolve_pronoun("them").is_empty());
}

#[test]
fn noun_search_matches_name_and_plural() {
    let mut scene = Scene::new();
    scene.add_object(colored("cube_1", "cube", Dimension::Red));
    scene.add_object(colored("sphere_1", "sphere", Dimension::Blue));

    let candidates = scene.find_noun_phrase(&np_with_noun("cube"));
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].1.object_id, "cube_1");

    // plural surface still matches the base name
    let candidates = scene.find_noun_phrase(&np_with_noun("cubes"));
    assert_eq!(candidates.len(), 1);

    // generic head noun matches everything
    let candidates = scene.find_noun_phrase(&np_with_noun("object"));
    assert_eq!(candidates.len(), 2);
}

#[test]
fn strong_color_conflict_disqualifies() {
    let mut scene = Scene::new();
    scene.add_object(colored("cube_1", "cube", Dimension::Blue));

    let mut np = NounPhrase::new();
    np.apply_adjective(&VectorSpace::from_word(
        "red",
        &[(Dimension::Adj, 1.0), (Dimension::Red, 1.0)],
    ));
    np.apply_noun(&VectorSpace::from_word(
        "cube",
        &[(Dimension::Noun, 1.0), (Dimension::Singular, 1.0)],
    ))
    .unwrap();

    assert!(scene.find_noun_phrase(&np).is_empty());
}

#[test]
fn closer_match_ranks_first() {
    let mut scene = Scene::new();
    scene.add_object(colored("cube_1", "cube", Dimension::Red));
    scene.add_object(colored("cube_2", "cube", Dimension::Green));

    let mut np = NounPhrase::new();
    np.apply_adjective(&VectorSpace::from_word(
        "red",
        &[(Dimension::Adj, 1.0), (Dimension::Red, 1.0)],
    ));
    np.apply_noun(&VectorSpace::from_word(
        "cube",
        &[(Dimension::Noun, 1.0), (Dimension::Singular, 1.0)],
    ))
    .unwrap();

    let candidates = scene.find_noun_phrase(&np);
    // green cube has a strong-color conflict with the red query
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].1.object_id, "cube_1");
    assert!(candidates[0].0 > 0.9);
}

#[test]
fn scene_round_trips_through_json() {
    let mut scene = Scene::new();
    scene.add_object(colored("cube_1", "cube", Dimension::Red));
    let members = scene.objects().to_vec();
    scene.add_assembly(Assembly::new("assembly_1", members));
    scene.add_object(cube("cube_2", 2.0));

    let json = serde_json::to_string(&scene).unwrap();
    let back: Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(back.objects().len(), 1);
    assert_eq!(back.assemblies().len(), 1);
    assert_eq!(back.recent(), scene.recent());
    assert!(back.find_object("cube_1").is_some());
}

#[test]
fn proper_name_lookup_beats_base_noun() {
    let mut scene = Scene::new();
    let obj = SceneObject::new("cube_1", "cube", VectorSpace::new()).with_metadata(
        ObjectMetadata {
            proper_name: Some("charlie".into()),
            ..Default::default()
        },
    );
    scene.add_object(obj);

    let mut np = NounPhrase::new();
    np.apply_noun(&VectorSpace::from_word(
        "cube",
        &[(Dimension::Noun, 1.0), (Dimension::Singular, 1.0)],
    ))
    .unwrap();
    np.apply_proper_noun(&VectorSpace::from_word("charlie", &[(Dimension::Quoted, 1.0)]));
    assert_eq!(scene.find_noun_phrase(&np).len(), 1);

    np.proper_noun = Some("fred".into());
    assert!(scene.find_noun_phrase(&np).is_empty());
}
