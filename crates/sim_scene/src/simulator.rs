//! Simulation driver
//!
//! The simulator owns the physics backend and the imported scene, and is the
//! only caller allowed to add objects to a scene after it has been loaded.
//! It holds the crate-private [`DriverToken`] that the scene's privileged
//! entry point requires.

use crate::backend::{BackendError, HeadlessBackend, PhysicsBackend};
use crate::foundation::collections::BodyId;
use crate::objects::SharedObject;
use crate::scene::{DriverToken, Scene, SceneError, SceneKind};
use thiserror::Error;

/// Errors raised by the simulator
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// A scene has already been imported
    #[error("A scene is already imported into this simulator")]
    SceneAlreadyImported,

    /// Objects other than visual ones need a scene
    #[error("Import a scene before importing objects")]
    NoScene,

    /// Scene failure
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Backend failure
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Drives one scene and its objects against a backend
pub struct Simulator<K: SceneKind, B: PhysicsBackend = HeadlessBackend> {
    backend: B,
    scene: Option<Scene<K>>,
    visual_objects: Vec<SharedObject>,
    token: DriverToken,
}

impl<K: SceneKind, B: PhysicsBackend> Simulator<K, B> {
    /// Create a simulator over the given backend
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            scene: None,
            visual_objects: Vec::new(),
            token: DriverToken::new(),
        }
    }

    /// Load a scene and keep it as the active scene
    pub fn import_scene(&mut self, mut scene: Scene<K>) -> Result<Vec<BodyId>, SimulatorError> {
        if self.scene.is_some() {
            return Err(SimulatorError::SceneAlreadyImported);
        }
        let ids = scene.load(&mut self.backend)?;
        self.scene = Some(scene);
        Ok(ids)
    }

    /// Instantiate an object in the running simulation
    ///
    /// Visual markers, visual shapes and particles are loaded directly and
    /// tracked by the simulator. Everything else goes through the scene.
    pub fn import_object(&mut self, object: SharedObject) -> Result<Vec<BodyId>, SimulatorError> {
        let category = object.borrow().category();
        if category.is_scene_excluded() {
            let ids = object.borrow_mut().load(&mut self.backend)?;
            log::debug!("Imported {} '{}'", category, object.borrow().name());
            self.visual_objects.push(object);
            return Ok(ids);
        }

        let scene = self.scene.as_mut().ok_or(SimulatorError::NoScene)?;
        let ids = scene.add_object_as_driver(object, &mut self.backend, &self.token)?;
        Ok(ids.unwrap_or_default())
    }

    /// Active scene
    pub fn scene(&self) -> Option<&Scene<K>> {
        self.scene.as_ref()
    }

    /// Active scene, mutably (random queries advance the scene's RNG)
    pub fn scene_mut(&mut self) -> Option<&mut Scene<K>> {
        self.scene.as_mut()
    }

    /// Physics backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Visual-only objects owned by the simulator
    pub fn visual_objects(&self) -> &[SharedObject] {
        &self.visual_objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{share, ObjectCategory, PrimitiveObject, SceneObject};
    use crate::scene::{EmptyScene, EmptySceneConfig};
    use std::rc::Rc;

    fn simulator() -> Simulator<EmptyScene> {
        Simulator::new(HeadlessBackend::new())
    }

    fn empty_scene() -> Scene<EmptyScene> {
        Scene::new(EmptyScene::new(EmptySceneConfig::default().with_seed(0)))
    }

    #[test]
    fn test_import_scene_once() {
        let mut sim = simulator();
        let ids = sim.import_scene(empty_scene()).unwrap();

        assert_eq!(ids.len(), 1);
        assert!(sim.scene().unwrap().is_loaded());
        assert!(matches!(
            sim.import_scene(empty_scene()),
            Err(SimulatorError::SceneAlreadyImported)
        ));
    }

    #[test]
    fn test_import_loaded_scene_fails() {
        let mut sim = simulator();
        let mut scene = empty_scene();
        scene.load(&mut HeadlessBackend::new()).unwrap();

        assert!(matches!(
            sim.import_scene(scene),
            Err(SimulatorError::Scene(SceneError::AlreadyLoaded))
        ));
        assert!(sim.scene().is_none());
    }

    #[test]
    fn test_late_object_goes_through_scene() {
        let mut sim = simulator();
        let mut scene = empty_scene();
        let early = share(PrimitiveObject::cube("early", 0.1));
        scene.add_object(early.clone()).unwrap();
        sim.import_scene(scene).unwrap();

        let late = share(PrimitiveObject::cube("late", 0.1));
        let ids = sim.import_object(late.clone()).unwrap();

        assert_eq!(ids.len(), 1);
        assert!(sim.backend().contains_body(ids[0]));
        let objects = sim.scene().unwrap().objects();
        assert_eq!(objects.len(), 2);
        assert!(objects.iter().any(|o| Rc::ptr_eq(o, &late)));
        assert!(early.borrow().is_loaded());
    }

    #[test]
    fn test_visual_objects_bypass_scene() {
        let mut sim = simulator();
        sim.import_scene(empty_scene()).unwrap();

        let marker = share(PrimitiveObject::visual_marker("goal", 0.2));
        let dust = share(PrimitiveObject::cube("dust", 0.01).with_category(ObjectCategory::Particle));
        sim.import_object(marker.clone()).unwrap();
        sim.import_object(dust).unwrap();

        assert!(sim.scene().unwrap().objects().is_empty());
        assert_eq!(sim.visual_objects().len(), 2);
        assert!(marker.borrow().is_loaded());
        assert_eq!(sim.backend().body_count(), 3);
    }

    #[test]
    fn test_object_without_scene() {
        let mut sim = simulator();
        let result = sim.import_object(share(PrimitiveObject::cube("box", 0.1)));
        assert!(matches!(result, Err(SimulatorError::NoScene)));

        let marker = share(PrimitiveObject::visual_marker("goal", 0.2));
        assert_eq!(sim.import_object(marker).unwrap().len(), 1);
    }
}
