//! Scene management
//!
//! A scene owns the static world (floors, buildings) and tracks the objects
//! placed in it. It mediates between those objects and the physics backend
//! and answers spatial queries for the agents living in it.
//!
//! ## Architecture
//!
//! ```text
//! Simulator (driver)
//!      ↓
//! Scene<K>  : load-once lifecycle, object-add rules, query forwarding
//!      ↓
//! SceneKind : EmptyScene | StadiumScene | TraversableMapScene | ...
//!      ↓
//! PhysicsBackend
//! ```

mod base;
mod empty;
mod error;
mod flat;
mod registry;
mod stadium;
mod traversable;


pub use base::{DriverToken, Scene, SceneKind, SceneState, ShortestPath};
pub use empty::{EmptyScene, EmptySceneConfig};
pub use error::{SceneError, SceneResult};
pub use registry::ObjectRegistry;
pub use stadium::{StadiumScene, StadiumSceneConfig};
pub use traversable::{FloorMap, TraversableMapConfig, TraversableMapScene};
