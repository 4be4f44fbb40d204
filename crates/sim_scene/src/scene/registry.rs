//! Object registry shared by concrete scenes
//!
//! A slot map of object handles. Registration is membership only: the
//! registry holds handle clones and never destroys an object.

use crate::backend::PhysicsBackend;
use crate::foundation::collections::{BodyId, ObjectKey, SlotMap};
use crate::objects::SharedObject;
use std::rc::Rc;

/// Slot-map based container of scene objects
#[derive(Default)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectKey, SharedObject>,
}

impl ObjectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object, returning its key
    ///
    /// Registering the same handle twice returns the existing key.
    pub fn insert(&mut self, object: SharedObject) -> ObjectKey {
        if let Some(key) = self.key_of(&object) {
            return key;
        }
        self.objects.insert(object)
    }

    /// Key of an already registered object
    pub fn key_of(&self, object: &SharedObject) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find(|(_, registered)| Rc::ptr_eq(registered, object))
            .map(|(key, _)| key)
    }

    /// Whether the handle is registered
    pub fn contains(&self, object: &SharedObject) -> bool {
        self.key_of(object).is_some()
    }

    /// Look up an object by key
    pub fn get(&self, key: ObjectKey) -> Option<&SharedObject> {
        self.objects.get(key)
    }

    /// Number of registered objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All registered objects, in a stable order
    pub fn handles(&self) -> Vec<SharedObject> {
        self.objects.values().cloned().collect()
    }

    /// Instantiate every object not yet loaded and collect body ids
    ///
    /// Objects that were already instantiated contribute their existing ids.
    pub fn load_all(&self, backend: &mut dyn PhysicsBackend) -> crate::backend::BackendResult<Vec<BodyId>> {
        let mut ids = Vec::new();
        for object in self.objects.values() {
            let mut object = object.borrow_mut();
            if object.is_loaded() {
                ids.extend_from_slice(object.body_ids());
            } else {
                log::debug!("Loading deferred object '{}'", object.name());
                ids.extend(object.load(backend)?);
            }
        }
        Ok(ids)
    }
}

impl std::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("len", &self.objects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::objects::{share, PrimitiveObject, SceneObject};

    #[test]
    fn test_insert_is_idempotent_per_handle() {
        let mut registry = ObjectRegistry::new();
        let cube = share(PrimitiveObject::cube("cube", 0.1));
        assert!(registry.is_empty());

        let first = registry.insert(cube.clone());
        let second = registry.insert(cube.clone());

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
        assert!(registry.contains(&cube));
        assert!(registry.get(first).is_some_and(|o| Rc::ptr_eq(o, &cube)));
    }

    #[test]
    fn test_handles_order_is_stable() {
        let mut registry = ObjectRegistry::new();
        for i in 0..4 {
            registry.insert(share(PrimitiveObject::cube(format!("cube_{i}"), 0.1)));
        }

        let names = |r: &ObjectRegistry| {
            r.handles().iter().map(|o| o.borrow().name().to_string()).collect::<Vec<_>>()
        };
        assert_eq!(names(&registry), names(&registry));
    }

    #[test]
    fn test_load_all_keeps_existing_ids() {
        let mut backend = HeadlessBackend::new();
        let mut registry = ObjectRegistry::new();
        let preloaded = share(PrimitiveObject::cube("preloaded", 0.1));
        let existing = preloaded.borrow_mut().load(&mut backend).unwrap();
        registry.insert(preloaded);
        registry.insert(share(PrimitiveObject::cube("deferred", 0.1)));

        let ids = registry.load_all(&mut backend).unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&existing[0]));
        assert_eq!(backend.body_count(), 2);
    }

    #[test]
    fn test_registry_does_not_own_objects() {
        let cube = share(PrimitiveObject::cube("cube", 0.1));
        {
            let mut registry = ObjectRegistry::new();
            registry.insert(cube.clone());
            assert_eq!(Rc::strong_count(&cube), 2);
        }
        assert_eq!(Rc::strong_count(&cube), 1);
    }
}
