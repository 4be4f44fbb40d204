//! Specialized collection types
//!
//! Stable, generation-checked keys for everything the scene layer hands out
//! to callers: backend bodies and registered objects.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Opaque identifier of a body created by a physics backend
    ///
    /// Scenes pass these around but never interpret them.
    pub struct BodyId;

    /// Handle of an object inside a scene's object registry
    pub struct ObjectKey;
}
