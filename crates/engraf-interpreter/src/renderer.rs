//! The rendering seam.
//!
//! The interpreter drives a [`Renderer`] as it mutates the scene; the
//! recording [`MockRenderer`] lets tests assert on draw traffic without a
//! 3D backend.

use engraf_scene::SceneObject;

/// Receives scene mutations as they happen.
pub trait Renderer {
    fn render_object(&mut self, object: &SceneObject);
    fn update_object(&mut self, object: &SceneObject);
    fn remove_object(&mut self, object_id: &str);
    fn clear(&mut self);
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Rendered(String),
    Updated(String),
    Removed(String),
    Cleared,
}

/// A renderer that records every call for inspection.
#[derive(Debug, Default)]
pub struct MockRenderer {
    pub events: Vec<RenderEvent>,
}

impl MockRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids rendered so far, in call order.
    #[must_use]
    pub fn rendered_ids(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Rendered(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for MockRenderer {
    fn render_object(&mut self, object: &SceneObject) {
        self.events
            .push(RenderEvent::Rendered(object.object_id.clone()));
    }

    fn update_object(&mut self, object: &SceneObject) {
        self.events
            .push(RenderEvent::Updated(object.object_id.clone()));
    }

    fn remove_object(&mut self, object_id: &str) {
        self.events
            .push(RenderEvent::Removed(object_id.to_string()));
    }

    fn clear(&mut self) {
        self.events.push(RenderEvent::Cleared);
    }
}

/// A renderer that ignores everything; useful for headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render_object(&mut self, _object: &SceneObject) {}
    fn update_object(&mut self, _object: &SceneObject) {}
    fn remove_object(&mut self, _object_id: &str) {}
    fn clear(&mut self) {}
}
