//! Objects that can be placed in a scene
//!
//! The scene layer depends only on the [`SceneObject`] capability set: a
//! category, a `load` operation against the backend, and optionally a set of
//! supported states. Objects are shared handles; whoever constructs an
//! object owns it, scenes only keep track of membership.

mod primitive;
mod states;

pub use primitive::PrimitiveObject;
pub use states::ObjectStates;

use crate::backend::{BackendResult, PhysicsBackend};
use crate::foundation::collections::BodyId;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared handle to an object
///
/// Scenes store clones of this handle; dropping a scene never destroys the
/// objects it tracked.
pub type SharedObject = Rc<RefCell<dyn SceneObject>>;

/// Wrap an object into a [`SharedObject`] handle
pub fn share<T: SceneObject + 'static>(object: T) -> SharedObject {
    Rc::new(RefCell::new(object))
}

/// Broad classification of objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    /// Floor geometry
    Floor,
    /// Building shell (walls, ceilings)
    Building,
    /// Static furniture and fixtures
    Static,
    /// Free rigid bodies
    Movable,
    /// Jointed bodies (cabinets, robots)
    Articulated,
    /// Non-colliding marker used for debugging or goal display
    VisualMarker,
    /// Purely visual geometry
    VisualShape,
    /// Short-lived particle (water drops, dust)
    Particle,
}

impl ObjectCategory {
    /// Whether this category is visual-only or ephemeral
    ///
    /// Such objects are owned and loaded by the simulator directly and are
    /// never tracked by a scene.
    pub const fn is_scene_excluded(self) -> bool {
        matches!(self, Self::VisualMarker | Self::VisualShape | Self::Particle)
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Floor => "floor",
            Self::Building => "building",
            Self::Static => "static",
            Self::Movable => "movable",
            Self::Articulated => "articulated",
            Self::VisualMarker => "visual marker",
            Self::VisualShape => "visual shape",
            Self::Particle => "particle",
        };
        f.write_str(name)
    }
}

/// Capability set every placeable object provides
pub trait SceneObject {
    /// Debug name
    fn name(&self) -> &str;

    /// Object category
    fn category(&self) -> ObjectCategory;

    /// Instantiate the object in the backend and return its body ids
    fn load(&mut self, backend: &mut dyn PhysicsBackend) -> BackendResult<Vec<BodyId>>;

    /// Body ids created by the last `load`, empty before loading
    fn body_ids(&self) -> &[BodyId];

    /// Whether the object has been instantiated in a backend
    fn is_loaded(&self) -> bool {
        !self.body_ids().is_empty()
    }

    /// Supported states, `None` when the object has no state capability
    fn states(&self) -> Option<ObjectStates> {
        None
    }
}
