//! Stadium scene: a fixed arena mesh over a ground plane

use super::base::{SceneKind, SceneState, ShortestPath};
use super::error::SceneResult;
use super::flat;
use super::registry::ObjectRegistry;
use crate::backend::{BodyDesc, CollisionShape, PhysicsBackend};
use crate::config::{Config, Deserialize, Serialize};
use crate::foundation::collections::BodyId;
use crate::foundation::math::{Point2, Point3, Transform};
use crate::objects::SharedObject;
use rand::rngs::StdRng;

/// Stadium scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StadiumSceneConfig {
    /// Mesh asset the backend resolves for the arena
    pub stadium_mesh: String,
    /// Height of the ground plane, slightly below the arena floor
    pub floor_offset: f32,
    /// Random points are drawn from `[-e, e]²`
    pub sample_half_extent: f32,
    /// RNG seed, entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for StadiumSceneConfig {
    fn default() -> Self {
        Self {
            stadium_mesh: "stadium/stadium.obj".to_string(),
            floor_offset: -0.005,
            sample_half_extent: 5.0,
            seed: None,
        }
    }
}

impl Config for StadiumSceneConfig {}

impl StadiumSceneConfig {
    /// Set the RNG seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Sports stadium with a flat playing field
#[derive(Debug)]
pub struct StadiumScene {
    config: StadiumSceneConfig,
    registry: ObjectRegistry,
    rng: StdRng,
    building_ids: Vec<BodyId>,
}

impl StadiumScene {
    /// Create an unloaded stadium scene
    pub fn new(config: StadiumSceneConfig) -> Self {
        let rng = flat::scene_rng(config.seed);
        Self {
            config,
            registry: ObjectRegistry::new(),
            rng,
            building_ids: Vec::new(),
        }
    }

    /// Backend ids of the arena geometry, empty before loading
    pub fn building_ids(&self) -> &[BodyId] {
        &self.building_ids
    }
}

impl Default for StadiumScene {
    fn default() -> Self {
        Self::new(StadiumSceneConfig::default())
    }
}

impl SceneKind for StadiumScene {
    const KIND: &'static str = "stadium";

    fn load_kind(
        &mut self,
        state: &mut SceneState,
        backend: &mut dyn PhysicsBackend,
    ) -> SceneResult<Vec<BodyId>> {
        let stadium = BodyDesc::new("stadium", CollisionShape::Mesh(self.config.stadium_mesh.clone()))
            .fixed();
        self.building_ids.push(backend.create_body(&stadium)?);

        let floor = BodyDesc::new("floor_plane", CollisionShape::ground_plane())
            .with_transform(Transform::at_height(self.config.floor_offset))
            .fixed();
        let floor_id = backend.create_body(&floor)?;
        state.record_floor_body(floor_id);

        let mut ids = self.building_ids.clone();
        ids.push(floor_id);
        ids.extend(self.registry.load_all(backend)?);
        Ok(ids)
    }

    fn objects(&self) -> Vec<SharedObject> {
        self.registry.handles()
    }

    fn register_object(&mut self, object: SharedObject) {
        self.registry.insert(object);
    }

    fn random_point(&mut self, floor: Option<usize>) -> SceneResult<(usize, Point3)> {
        flat::random_ground_point(&mut self.rng, floor, self.config.sample_half_extent)
    }

    fn shortest_path(
        &self,
        floor: usize,
        source: Point2,
        target: Point2,
        entire_path: bool,
    ) -> SceneResult<ShortestPath> {
        flat::straight_path(floor, source, target, entire_path)
    }
}
