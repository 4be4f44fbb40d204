//! In-memory backend that records created bodies without simulating them

use super::{BackendResult, BodyDesc, PhysicsBackend};
use crate::foundation::collections::{BodyId, SlotMap};

/// Headless physics backend
///
/// Validates and stores body descriptions. Useful for tools, tests and any
/// host that needs the scene bookkeeping without a running physics engine.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    bodies: SlotMap<BodyId, BodyDesc>,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the description a body was created from
    pub fn body(&self, id: BodyId) -> Option<&BodyDesc> {
        self.bodies.get(id)
    }

    /// Iterate over all bodies in creation order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &BodyDesc)> {
        self.bodies.iter()
    }
}

impl PhysicsBackend for HeadlessBackend {
    fn create_body(&mut self, desc: &BodyDesc) -> BackendResult<BodyId> {
        desc.shape.validate()?;
        let id = self.bodies.insert(desc.clone());
        log::trace!("Created body '{}' ({:?})", desc.name, id);
        Ok(id)
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn contains_body(&self, id: BodyId) -> bool {
        self.bodies.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CollisionShape;

    #[test]
    fn test_create_and_lookup() {
        let mut backend = HeadlessBackend::new();
        let id = backend
            .create_body(&BodyDesc::new("ball", CollisionShape::Sphere(0.1)))
            .unwrap();

        assert_eq!(backend.body_count(), 1);
        assert!(backend.contains_body(id));
        assert_eq!(backend.body(id).map(|d| d.name.as_str()), Some("ball"));
    }

    #[test]
    fn test_bodies_in_creation_order() {
        let mut backend = HeadlessBackend::new();
        let floor = backend
            .create_body(&BodyDesc::new("floor", CollisionShape::ground_plane()).fixed())
            .unwrap();
        let ball = backend
            .create_body(&BodyDesc::new("ball", CollisionShape::Sphere(0.1)))
            .unwrap();

        let bodies: Vec<_> = backend.bodies().map(|(id, d)| (id, d.name.as_str())).collect();
        assert_eq!(bodies, vec![(floor, "floor"), (ball, "ball")]);
    }

    #[test]
    fn test_invalid_shape_is_not_stored() {
        let mut backend = HeadlessBackend::new();
        let result = backend.create_body(&BodyDesc::new("bad", CollisionShape::Sphere(-1.0)));

        assert!(result.is_err());
        assert_eq!(backend.body_count(), 0);
    }
}
