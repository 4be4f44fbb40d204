//! Empty scene: a single ground plane and nothing else

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

/// Empty scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmptySceneConfig {
    /// Whether the floor plane is visible
    pub render_floor_plane: bool,
    /// Floor colour when rendered, RGBA in [0, 1]
    pub floor_plane_rgba: [f32; 4],
    /// Random points are drawn from `[-e, e]²`
    pub sample_half_extent: f32,
    /// RNG seed, entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EmptySceneConfig {
    fn default() -> Self {
        Self {
            render_floor_plane: true,
            floor_plane_rgba: [1.0, 1.0, 1.0, 1.0],
            sample_half_extent: 5.0,
            seed: None,
        }
    }
}

impl Config for EmptySceneConfig {}

impl EmptySceneConfig {
    /// Show or hide the floor plane
    #[must_use]
    pub fn with_render_floor_plane(mut self, render: bool) -> Self {
        self.render_floor_plane = render;
        self
    }

    /// Set the floor colour
    #[must_use]
    pub fn with_floor_plane_rgba(mut self, rgba: [f32; 4]) -> Self {
        self.floor_plane_rgba = rgba;
        self
    }

    /// Set the sampling half extent
    #[must_use]
    pub fn with_sample_half_extent(mut self, half_extent: f32) -> Self {
        self.sample_half_extent = half_extent;
        self
    }

    /// Set the RNG seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Infinite flat floor at height zero
#[derive(Debug)]
pub struct EmptyScene {
    config: EmptySceneConfig,
    registry: ObjectRegistry,
    rng: StdRng,
}

impl EmptyScene {
    /// Create an unloaded empty scene
    pub fn new(config: EmptySceneConfig) -> Self {
        let rng = flat::scene_rng(config.seed);
        Self {
            config,
            registry: ObjectRegistry::new(),
            rng,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EmptySceneConfig {
        &self.config
    }
}

impl Default for EmptyScene {
    fn default() -> Self {
        Self::new(EmptySceneConfig::default())
    }
}

impl SceneKind for EmptyScene {
    const KIND: &'static str = "empty";

    fn load_kind(
        &mut self,
        state: &mut SceneState,
        backend: &mut dyn PhysicsBackend,
    ) -> SceneResult<Vec<BodyId>> {
        let mut floor = BodyDesc::new("floor_plane", CollisionShape::ground_plane())
            .with_transform(Transform::identity())
            .fixed();
        if self.config.render_floor_plane {
            floor = floor.with_rgba(self.config.floor_plane_rgba);
        }
        let floor_id = backend.create_body(&floor)?;
        state.record_floor_body(floor_id);

        let mut ids = vec![floor_id];
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
