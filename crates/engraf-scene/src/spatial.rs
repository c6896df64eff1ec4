//! Per-preposition geometric plausibility tests.
//!
//! Each preposition maps to a scoring function over (reference, target)
//! where the target is the object being positioned relative to the
//! reference: for "the box on the table", table is the reference and box
//! the target. Scores live in [0, 1]; unknown prepositions and unresolvable
//! objects fall through to the neutral 0.5.

use crate::model::Scene;
use crate::object::SceneObject;
use std::collections::HashMap;
use tracing::debug;

/// A scoring closure for one preposition.
pub type SpatialTest = fn(&SceneObject, &SceneObject) -> f32;

const HORIZONTAL_TOLERANCE: f32 = 0.5;
const VERTICAL_TOLERANCE: f32 = 0.5;

fn horizontal_distance(a: &SceneObject, b: &SceneObject) -> f32 {
    let (ax, _, az) = a.position();
    let (bx, _, bz) = b.position();
    ((ax - bx).powi(2) + (az - bz).powi(2)).sqrt()
}

fn co_located(a: &SceneObject, b: &SceneObject) -> bool {
    let (ax, ay, az) = a.position();
    let (bx, by, bz) = b.position();
    (ax - bx).abs() < f32::EPSILON
        && (ay - by).abs() < f32::EPSILON
        && (az - bz).abs() < f32::EPSILON
}

fn score_on(reference: &SceneObject, target: &SceneObject) -> f32 {
    if co_located(reference, target) {
        return 0.1;
    }
    let (_, ty, _) = target.position();
    let resting = ty >= reference.top_y() - VERTICAL_TOLERANCE;
    if resting && horizontal_distance(reference, target) <= HORIZONTAL_TOLERANCE {
        1.0
    } else {
        0.2
    }
}

fn score_under(reference: &SceneObject, target: &SceneObject) -> f32 {
    if co_located(reference, target) {
        return 0.1;
    }
    let (_, ty, _) = target.position();
    let below = ty <= reference.bottom_y() + VERTICAL_TOLERANCE;
    if below && horizontal_distance(reference, target) <= HORIZONTAL_TOLERANCE {
        1.0
    } else {
        0.2
    }
}

fn score_above(reference: &SceneObject, target: &SceneObject) -> f32 {
    let (_, ty, _) = target.position();
    if ty > reference.top_y() {
        1.0
    } else {
        0.2
    }
}

fn score_below(reference: &SceneObject, target: &SceneObject) -> f32 {
    let (_, ty, _) = target.position();
    if ty < reference.bottom_y() {
        1.0
    } else {
        0.2
    }
}

fn score_beside(reference: &SceneObject, target: &SceneObject) -> f32 {
    let (_, ry, _) = reference.position();
    let (_, ty, _) = target.position();
    let lateral = horizontal_distance(reference, target);
    if lateral > HORIZONTAL_TOLERANCE && (ty - ry).abs() <= VERTICAL_TOLERANCE {
        1.0
    } else {
        0.2
    }
}

fn score_left_of(reference: &SceneObject, target: &SceneObject) -> f32 {
    let (rx, ry, _) = reference.position();
    let (tx, ty, _) = target.position();
    if tx < rx && (ty - ry).abs() <= VERTICAL_TOLERANCE {
        1.0
    } else {
        0.2
    }
}

fn score_right_of(reference: &SceneObject, target: &SceneObject) -> f32 {
    let (rx, ry, _) = reference.position();
    let (tx, ty, _) = target.position();
    if tx > rx && (ty - ry).abs() <= VERTICAL_TOLERANCE {
        1.0
    } else {
        0.2
    }
}

fn score_behind(reference: &SceneObject, target: &SceneObject) -> f32 {
    let (_, _, rz) = reference.position();
    let (_, _, tz) = target.position();
    if tz < rz {
        1.0
    } else {
        0.2
    }
}

fn score_in_front_of(reference: &SceneObject, target: &SceneObject) -> f32 {
    let (_, _, rz) = reference.position();
    let (_, _, tz) = target.position();
    if tz > rz {
        1.0
    } else {
        0.2
    }
}

fn score_to(_reference: &SceneObject, _target: &SceneObject) -> f32 {
    // Movement endpoint: geometry is checked after the move, not here.
    0.9
}

/// Table-driven spatial validator.
pub struct SpatialValidator {
    table: HashMap<&'static str, SpatialTest>,
}

impl SpatialValidator {
    #[must_use]
    pub fn new() -> Self {
        let mut table: HashMap<&'static str, SpatialTest> = HashMap::new();
        table.insert("on", score_on);
        table.insert("on top of", score_on);
        table.insert("under", score_under);
        table.insert("below", score_below);
        table.insert("above", score_above);
        table.insert("over", score_above);
        table.insert("beside", score_beside);
        table.insert("next to", score_beside);
        table.insert("near", score_beside);
        table.insert("left of", score_left_of);
        table.insert("right of", score_right_of);
        table.insert("behind", score_behind);
        table.insert("in front of", score_in_front_of);
        table.insert("to", score_to);
        Self { table }
    }

    /// Score a (reference, preposition, target) triple.
    #[must_use]
    pub fn score(&self, preposition: &str, reference: &SceneObject, target: &SceneObject) -> f32 {
        let score = match self.table.get(preposition) {
            Some(test) => test(reference, target),
            None => 0.5,
        };
        debug!(
            preposition,
            reference = %reference.object_id,
            target = %target.object_id,
            score,
            "spatial validation"
        );
        score
    }

    /// Score by object ids, neutral when either object is missing.
    #[must_use]
    pub fn score_in_scene(
        &self,
        scene: &Scene,
        preposition: &str,
        reference_id: &str,
        target_id: &str,
    ) -> f32 {
        match (scene.find_object(reference_id), scene.find_object(target_id)) {
            (Some(reference), Some(target)) => self.score(preposition, reference, target),
            _ => 0.5,
        }
    }
}

impl Default for SpatialValidator {
    fn default() -> Self {
        Self::new()
    }
}
