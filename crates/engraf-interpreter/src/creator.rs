//! Object creation from noun phrases.

use engraf_core::{Dimension, NounPhrase, PrepositionalPhrase, VectorSpace};
use engraf_scene::{ObjectMetadata, Scene, SceneObject};

/// Clearance between a placed object and its spatial reference.
const PLACEMENT_GAP: f32 = 0.5;

/// How many objects a noun phrase asks for ("two cubes" makes two).
#[must_use]
pub fn requested_count(np: &NounPhrase) -> usize {
    let number = np.vector.get(Dimension::Number);
    if number > 1.0 {
        number.round() as usize
    } else {
        1
    }
}

/// Build one scene object from a noun phrase, honoring color, scale,
/// texture, transparency, and any placement PPs.
#[must_use]
pub fn build_object(scene: &Scene, np: &NounPhrase, placement: &[PrepositionalPhrase]) -> SceneObject {
    let name = np.noun.clone().unwrap_or_else(|| "object".to_string());
    let object_id = scene.next_object_id(&name);

    let mut vector = VectorSpace::new();
    for dim in [
        Dimension::Red,
        Dimension::Green,
        Dimension::Blue,
        Dimension::ScaleX,
        Dimension::ScaleY,
        Dimension::ScaleZ,
        Dimension::Texture,
        Dimension::Transparency,
    ] {
        vector.set(dim, np.vector.get(dim));
    }

    let preps: Vec<&PrepositionalPhrase> = np.preps.iter().chain(placement.iter()).collect();
    if let Some((x, y, z)) = placement_position(scene, &preps) {
        vector.set(Dimension::LocX, x);
        vector.set(Dimension::LocY, y);
        vector.set(Dimension::LocZ, z);
    }

    let adjectives = np
        .consumed_tokens()
        .iter()
        .filter(|t| t.isa(Dimension::Adj))
        .filter_map(|t| t.word().map(str::to_string))
        .collect();

    SceneObject::new(object_id, name, vector).with_metadata(ObjectMetadata {
        adjectives,
        determiner: np.determiner.clone(),
        proper_name: np.proper_noun.clone(),
    })
}

/// Placement from the first applicable PP: a vector literal is an absolute
/// location; a grounded spatial PP offsets from its reference object along
/// the preposition's direction.
fn placement_position(
    scene: &Scene,
    preps: &[&PrepositionalPhrase],
) -> Option<(f32, f32, f32)> {
    for pp in preps {
        if pp.negated {
            continue;
        }
        if let Some(literal) = &pp.vector_literal {
            return Some((
                literal.get(Dimension::LocX),
                literal.get(Dimension::LocY),
                literal.get(Dimension::LocZ),
            ));
        }
        let reference = pp
            .noun_phrase()
            .and_then(|np| np.grounding.as_ref())
            .and_then(|g| g.object_ids.first())
            .and_then(|id| scene.find_object(id));
        if let Some(reference) = reference {
            let (rx, ry, rz) = reference.position();
            let (sx, sy, sz) = reference.scale();
            let dx = pp.vector.get(Dimension::LocX);
            let dy = pp.vector.get(Dimension::LocY);
            let dz = pp.vector.get(Dimension::LocZ);
            return Some((
                rx + dx * (sx / 2.0 + PLACEMENT_GAP + 0.5),
                ry + dy * (sy / 2.0 + PLACEMENT_GAP + 0.5),
                rz + dz * (sz / 2.0 + PLACEMENT_GAP + 0.5),
            ));
        }
    }
    None
}

/// The same placement logic, exposed for movement targets.
#[must_use]
pub fn movement_target(
    scene: &Scene,
    preps: &[PrepositionalPhrase],
) -> Option<(f32, f32, f32)> {
    let refs: Vec<&PrepositionalPhrase> = preps.iter().collect();
    placement_position(scene, &refs)
}
