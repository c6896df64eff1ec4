//! Scene objects and assemblies.

use engraf_core::{Dimension, VectorSpace};
use serde::{Deserialize, Serialize};

/// Descriptive metadata captured from the noun phrase that created an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Adjective surfaces that described the object at creation.
    pub adjectives: Vec<String>,
    /// Determiner used at creation, if any.
    pub determiner: Option<String>,
    /// User-assigned proper name ("call it 'fred'").
    pub proper_name: Option<String>,
}

/// One object in the scene: a stable id, its base noun, and a semantic
/// vector carrying location, scale, rotation, color, texture, and
/// transparency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub object_id: String,
    pub name: String,
    pub vector: VectorSpace,
    pub metadata: ObjectMetadata,
    /// Position in creation order, assigned by the scene.
    pub creation_rank: usize,
}

impl SceneObject {
    #[must_use]
    pub fn new(object_id: impl Into<String>, name: impl Into<String>, vector: VectorSpace) -> Self {
        Self {
            object_id: object_id.into(),
            name: name.into(),
            vector,
            metadata: ObjectMetadata::default(),
            creation_rank: 0,
        }
    }

    /// Builder form attaching creation metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ObjectMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn position(&self) -> (f32, f32, f32) {
        (
            self.vector.get(Dimension::LocX),
            self.vector.get(Dimension::LocY),
            self.vector.get(Dimension::LocZ),
        )
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.vector.set(Dimension::LocX, x);
        self.vector.set(Dimension::LocY, y);
        self.vector.set(Dimension::LocZ, z);
    }

    /// Full extents along each axis; unset scale reads as the unit extent.
    #[must_use]
    pub fn scale(&self) -> (f32, f32, f32) {
        let axis = |d: Dimension| {
            let v = self.vector.get(d);
            if v == 0.0 {
                1.0
            } else {
                v
            }
        };
        (
            axis(Dimension::ScaleX),
            axis(Dimension::ScaleY),
            axis(Dimension::ScaleZ),
        )
    }

    /// Top face height: center y plus half the vertical extent.
    #[must_use]
    pub fn top_y(&self) -> f32 {
        self.vector.get(Dimension::LocY) + self.scale().1 / 2.0
    }

    /// Bottom face height.
    #[must_use]
    pub fn bottom_y(&self) -> f32 {
        self.vector.get(Dimension::LocY) - self.scale().1 / 2.0
    }
}

/// An ordered group of objects that moves, rotates, scales, and colors as
/// one. Membership is exclusive: an owned object never also appears in the
/// scene's standalone list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assembly {
    pub assembly_id: String,
    pub proper_name: Option<String>,
    pub objects: Vec<SceneObject>,
    pub creation_rank: usize,
}

impl Assembly {
    #[must_use]
    pub fn new(assembly_id: impl Into<String>, objects: Vec<SceneObject>) -> Self {
        Self {
            assembly_id: assembly_id.into(),
            proper_name: None,
            objects,
            creation_rank: 0,
        }
    }

    /// Translate every member by the same delta.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        for obj in &mut self.objects {
            let (x, y, z) = obj.position();
            obj.set_position(x + dx, y + dy, z + dz);
        }
    }

    /// Rotate every member's own orientation by the same delta.
    pub fn rotate_by(&mut self, rx: f32, ry: f32, rz: f32) {
        for obj in &mut self.objects {
            for (dim, delta) in [
                (Dimension::RotX, rx),
                (Dimension::RotY, ry),
                (Dimension::RotZ, rz),
            ] {
                let current = obj.vector.get(dim);
                obj.vector.set(dim, current + delta);
            }
        }
    }

    /// Scale every member's extents by the same factors.
    pub fn scale_by(&mut self, sx: f32, sy: f32, sz: f32) {
        for obj in &mut self.objects {
            let (x, y, z) = obj.scale();
            obj.vector.set(Dimension::ScaleX, x * sx);
            obj.vector.set(Dimension::ScaleY, y * sy);
            obj.vector.set(Dimension::ScaleZ, z * sz);
        }
    }

    /// Recolor every member.
    pub fn set_color(&mut self, red: f32, green: f32, blue: f32) {
        for obj in &mut self.objects {
            obj.vector.set(Dimension::Red, red);
            obj.vector.set(Dimension::Green, green);
            obj.vector.set(Dimension::Blue, blue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj_at(id: &str, x: f32, y: f32, z: f32) -> SceneObject {
        let mut o = SceneObject::new(id, "cube", VectorSpace::new());
        o.set_position(x, y, z);
        o
    }

    #[test]
    fn scale_defaults_to_unit_extent() {
        let o = obj_at("cube_1", 0.0, 0.0, 0.0);
        assert_eq!(o.scale(), (1.0, 1.0, 1.0));
        assert_eq!(o.top_y(), 0.5);
        assert_eq!(o.bottom_y(), -0.5);
    }

    #[test]
    fn assembly_operations_fan_out() {
        let mut asm = Assembly::new(
            "assembly_1",
            vec![obj_at("cube_1", 0.0, 0.0, 0.0), obj_at("cube_2", 2.0, 0.0, 0.0)],
        );
        asm.move_by(1.0, 0.5, 0.0);
        assert_eq!(asm.objects[0].position(), (1.0, 0.5, 0.0));
        assert_eq!(asm.objects[1].position(), (3.0, 0.5, 0.0));

        asm.scale_by(2.0, 2.0, 2.0);
        assert_eq!(asm.objects[0].scale(), (2.0, 2.0, 2.0));

        asm.set_color(1.0, 0.0, 0.0);
        assert!(asm.objects[1].vector.isa(Dimension::Red));
    }
}
