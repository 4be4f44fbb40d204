//! Single-body object built from a primitive collision shape

use super::{ObjectCategory, ObjectStates, SceneObject};
use crate::backend::{BackendError, BackendResult, BodyDesc, CollisionShape, PhysicsBackend};
use crate::foundation::collections::BodyId;
use crate::foundation::math::{Transform, Vec3};

/// General-purpose object made of one body
#[derive(Debug, Clone)]
pub struct PrimitiveObject {
    name: String,
    category: ObjectCategory,
    shape: CollisionShape,
    transform: Transform,
    rgba: Option<[f32; 4]>,
    states: Option<ObjectStates>,
    body_ids: Vec<BodyId>,
}

impl PrimitiveObject {
    /// Create a movable object with the given shape
    pub fn new(name: impl Into<String>, shape: CollisionShape) -> Self {
        Self {
            name: name.into(),
            category: ObjectCategory::Movable,
            shape,
            transform: Transform::identity(),
            rgba: None,
            states: None,
            body_ids: Vec::new(),
        }
    }

    /// Unit cube of the given half size
    pub fn cube(name: impl Into<String>, half_size: f32) -> Self {
        Self::new(
            name,
            CollisionShape::Box { half_extents: Vec3::new(half_size, half_size, half_size) },
        )
    }

    /// Non-colliding marker sphere
    pub fn visual_marker(name: impl Into<String>, radius: f32) -> Self {
        Self::new(name, CollisionShape::Sphere(radius))
            .with_category(ObjectCategory::VisualMarker)
            .with_rgba([1.0, 0.0, 0.0, 0.3])
    }

    /// Set the category
    #[must_use]
    pub fn with_category(mut self, category: ObjectCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the initial world position
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the visual colour
    #[must_use]
    pub fn with_rgba(mut self, rgba: [f32; 4]) -> Self {
        self.rgba = Some(rgba);
        self
    }

    /// Give the object a state capability
    #[must_use]
    pub fn with_states(mut self, states: ObjectStates) -> Self {
        self.states = Some(states);
        self
    }

    /// Current world transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    fn body_desc(&self) -> BodyDesc {
        let mut desc = BodyDesc::new(self.name.clone(), self.shape.clone())
            .with_transform(self.transform);
        if matches!(self.category, ObjectCategory::Static | ObjectCategory::Floor | ObjectCategory::Building) {
            desc = desc.fixed();
        }
        if let Some(rgba) = self.rgba {
            desc = desc.with_rgba(rgba);
        }
        desc
    }
}

impl SceneObject for PrimitiveObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> ObjectCategory {
        self.category
    }

    fn load(&mut self, backend: &mut dyn PhysicsBackend) -> BackendResult<Vec<BodyId>> {
        if self.is_loaded() {
            return Err(BackendError::Rejected(format!(
                "object '{}' is already instantiated",
                self.name
            )));
        }
        let id = backend.create_body(&self.body_desc())?;
        self.body_ids = vec![id];
        Ok(self.body_ids.clone())
    }

    fn body_ids(&self) -> &[BodyId] {
        &self.body_ids
    }

    fn states(&self) -> Option<ObjectStates> {
        self.states
    }
}
