//! # Sim Scene
//!
//! Scene lifecycle, object registry and spatial queries for physics
//! simulation.
//!
//! ## Features
//!
//! - **Load-once lifecycle**: every scene loads exactly once; objects added
//!   before loading are deferred, later ones are realized immediately
//! - **Driver-only late additions**: only the [`simulator::Simulator`] can add
//!   objects to a loaded scene
//! - **Spatial queries**: random floors and points, shortest paths, floor
//!   heights, with defaults every scene kind can override
//! - **Scene kinds**: empty ground plane, stadium, and multi-floor
//!   traversable-map scenes with grid navigation
//!
//! ## Quick Start
//!
//! ```rust
//! use sim_scene::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::new(EmptyScene::default());
//!     scene.add_object(share(PrimitiveObject::cube("crate", 0.25)))?;
//!
//!     let mut sim: Simulator<EmptyScene> = Simulator::new(HeadlessBackend::new());
//!     let ids = sim.import_scene(scene)?;
//!     assert_eq!(ids.len(), 2);
//!
//!     sim.import_object(share(PrimitiveObject::cube("late", 0.25)))?;
//!     assert_eq!(sim.scene().map(|s| s.objects().len()), Some(2));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod backend;
pub mod objects;
pub mod navigation;
pub mod scene;
pub mod simulator;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        backend::{BodyDesc, CollisionShape, HeadlessBackend, PhysicsBackend},
        config::Config,
        foundation::{
            collections::{BodyId, ObjectKey},
            math::{Point2, Point3, Vec3, Transform},
        },
        navigation::{OccupancyGrid, NavGraph},
        objects::{share, ObjectCategory, ObjectStates, PrimitiveObject, SceneObject, SharedObject},
        scene::{
            EmptyScene, EmptySceneConfig, FloorMap, Scene, SceneError, SceneKind,
            ShortestPath, StadiumScene, StadiumSceneConfig, TraversableMapConfig,
            TraversableMapScene,
        },
        simulator::{Simulator, SimulatorError},
    };
}
