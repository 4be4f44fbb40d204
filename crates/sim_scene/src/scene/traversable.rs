//! Map-backed indoor scene
//!
//! A building mesh with one or more floors. Each floor carries an occupancy
//! grid describing where an agent can stand; the scene erodes it, builds a
//! navigation graph over its largest connected region and answers spatial
//! queries from it.

use super::base::{check_floor, SceneKind, SceneState, ShortestPath};
use super::error::{SceneError, SceneResult};
use super::flat::scene_rng;
use super::registry::ObjectRegistry;
use crate::backend::{BodyDesc, CollisionShape, PhysicsBackend};
use crate::config::{Config, Deserialize, Serialize};
use crate::foundation::collections::BodyId;
use crate::foundation::math::{Point2, Point3, Transform};
use crate::navigation::{MapFrame, NavGraph, OccupancyGrid};
use crate::objects::SharedObject;
use rand::rngs::StdRng;
use rand::Rng;

/// Traversable-map scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversableMapConfig {
    /// Meters per map cell
    pub resolution: f32,
    /// Erosion kernel size in cells, keeps agents off walls
    pub erosion: usize,
    /// Build navigation graphs for shortest-path queries
    pub build_graph: bool,
    /// Mesh asset the backend resolves for the building
    pub building_mesh: String,
    /// RNG seed, entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TraversableMapConfig {
    fn default() -> Self {
        Self {
            resolution: 0.1,
            erosion: 2,
            build_graph: true,
            building_mesh: "mesh_z_up.obj".to_string(),
            seed: None,
        }
    }
}

impl Config for TraversableMapConfig {}

impl TraversableMapConfig {
    /// Set the map resolution
    #[must_use]
    pub fn with_resolution(mut self, resolution: f32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the erosion kernel size
    #[must_use]
    pub fn with_erosion(mut self, erosion: usize) -> Self {
        self.erosion = erosion;
        self
    }

    /// Enable or disable graph construction
    #[must_use]
    pub fn with_build_graph(mut self, build_graph: bool) -> Self {
        self.build_graph = build_graph;
        self
    }

    /// Set the RNG seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One storey: its elevation and where an agent can stand on it
#[derive(Debug, Clone)]
pub struct FloorMap {
    /// Floor elevation in meters
    pub height: f32,
    /// Traversability of the floor
    pub grid: OccupancyGrid,
}

impl FloorMap {
    /// Create a floor
    pub fn new(height: f32, grid: OccupancyGrid) -> Self {
        Self { height, grid }
    }
}

/// Indoor scene backed by per-floor traversability maps
///
/// Unreachable targets are reported as [`SceneError::NoPathFound`]; path
/// queries without a graph fail with [`SceneError::PathGraphUnavailable`].
/// Points are only sampled from the eroded maps, so [`SceneKind::random_point`]
/// fails with [`SceneError::NotLoaded`] until the scene is loaded.
/// Out-of-range floors fail with [`SceneError::InvalidFloor`], except
/// [`SceneKind::floor_height`] which falls back to `0.0`.
#[derive(Debug)]
pub struct TraversableMapScene {
    config: TraversableMapConfig,
    floors: Vec<FloorMap>,
    graphs: Vec<Option<NavGraph>>,
    frame: MapFrame,
    registry: ObjectRegistry,
    rng: StdRng,
    building_ids: Vec<BodyId>,
    maps_ready: bool,
}

impl TraversableMapScene {
    /// Create an unloaded scene
    ///
    /// All floors must share one grid size, and at least one floor is needed.
    pub fn new(config: TraversableMapConfig, floors: Vec<FloorMap>) -> SceneResult<Self> {
        let first = floors
            .first()
            .ok_or_else(|| SceneError::InvalidMap("scene needs at least one floor".to_string()))?;
        let size = first.grid.size();

        if let Some((i, floor)) = floors.iter().enumerate().find(|(_, f)| f.grid.size() != size) {
            let actual = floor.grid.size();
            return Err(SceneError::InvalidMap(format!(
                "floor {i} is {actual}x{actual} cells, expected {size}x{size}"
            )));
        }
        if let Some(i) = floors.iter().position(|f| !f.height.is_finite()) {
            return Err(SceneError::InvalidMap(format!("floor {i} has a non-finite height")));
        }
        if !(config.resolution.is_finite() && config.resolution > 0.0) {
            return Err(SceneError::InvalidMap(format!(
                "resolution must be positive, got {}",
                config.resolution
            )));
        }

        let frame = MapFrame::new(config.resolution, size);
        let rng = scene_rng(config.seed);
        Ok(Self {
            graphs: vec![None; floors.len()],
            config,
            floors,
            frame,
            registry: ObjectRegistry::new(),
            rng,
            building_ids: Vec::new(),
            maps_ready: false,
        })
    }

    /// Number of floors
    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Current traversability of a floor (eroded once loaded)
    pub fn floor_map(&self, floor: usize) -> Option<&OccupancyGrid> {
        self.floors.get(floor).map(|f| &f.grid)
    }

    /// Navigation graph of a floor, once built
    pub fn nav_graph(&self, floor: usize) -> Option<&NavGraph> {
        self.graphs.get(floor).and_then(Option::as_ref)
    }

    /// Placement of the maps in the world
    pub fn frame(&self) -> MapFrame {
        self.frame
    }

    /// Backend ids of the building geometry, empty before loading
    pub fn building_ids(&self) -> &[BodyId] {
        &self.building_ids
    }

    /// Erode every floor and, if configured, build its navigation graph
    fn prepare_maps(&mut self, state: &mut SceneState) {
        for (i, floor) in self.floors.iter_mut().enumerate() {
            floor.grid = floor.grid.eroded(self.config.erosion);
            if self.config.build_graph {
                let graph = NavGraph::build(&floor.grid);
                floor.grid = graph.restrict(&floor.grid);
                log::debug!("Floor {i}: {} traversable cells", graph.node_count());
                self.graphs[i] = Some(graph);
            }
        }
        if self.config.build_graph {
            state.mark_path_graph_built();
        }
        self.maps_ready = true;
    }
}

impl SceneKind for TraversableMapScene {
    const KIND: &'static str = "traversable map";

    fn load_kind(
        &mut self,
        state: &mut SceneState,
        backend: &mut dyn PhysicsBackend,
    ) -> SceneResult<Vec<BodyId>> {
        let building = BodyDesc::new("building", CollisionShape::Mesh(self.config.building_mesh.clone()))
            .fixed();
        self.building_ids.push(backend.create_body(&building)?);

        let mut ids = self.building_ids.clone();
        for (i, floor) in self.floors.iter().enumerate() {
            let plane = BodyDesc::new(format!("floor_{i}"), CollisionShape::ground_plane())
                .with_transform(Transform::at_height(floor.height))
                .fixed();
            let id = backend.create_body(&plane)?;
            state.record_floor_body(id);
            ids.push(id);
        }

        self.prepare_maps(state);
        ids.extend(self.registry.load_all(backend)?);
        Ok(ids)
    }

    fn objects(&self) -> Vec<SharedObject> {
        self.registry.handles()
    }

    fn register_object(&mut self, object: SharedObject) {
        self.registry.insert(object);
    }

    fn random_floor(&mut self) -> usize {
        self.rng.gen_range(0..self.floors.len())
    }

    fn random_point(&mut self, floor: Option<usize>) -> SceneResult<(usize, Point3)> {
        let floor = match floor {
            Some(floor) => floor,
            None => self.random_floor(),
        };
        check_floor(floor, self.floors.len())?;
        if !self.maps_ready {
            return Err(SceneError::NotLoaded("random_point"));
        }

        let map = &self.floors[floor];
        let cells = map.grid.free_cells();
        if cells.is_empty() {
            return Err(SceneError::InvalidMap(format!("floor {floor} has no traversable cells")));
        }
        let cell = cells[self.rng.gen_range(0..cells.len())];
        let xy = self.frame.map_to_world(cell);
        Ok((floor, Point3::new(xy.x, xy.y, map.height)))
    }

    fn shortest_path(
        &self,
        floor: usize,
        source: Point2,
        target: Point2,
        entire_path: bool,
    ) -> SceneResult<ShortestPath> {
        check_floor(floor, self.floors.len())?;
        let graph = self
            .nav_graph(floor)
            .ok_or(SceneError::PathGraphUnavailable { floor })?;

        let start = graph
            .nearest_node(self.frame.world_to_map_f(source))
            .ok_or(SceneError::NoPathFound { floor })?;
        let goal = graph
            .nearest_node(self.frame.world_to_map_f(target))
            .ok_or(SceneError::NoPathFound { floor })?;
        let cells = graph.astar(start, goal).ok_or(SceneError::NoPathFound { floor })?;

        let mut waypoints = Vec::with_capacity(cells.len() + 2);
        waypoints.push(source);
        waypoints.extend(cells.into_iter().map(|cell| self.frame.map_to_world(cell)));
        waypoints.push(target);
        waypoints.dedup();

        Ok(ShortestPath::from_waypoints(waypoints, entire_path))
    }

    fn floor_height(&self, floor: usize) -> f32 {
        self.floors.get(floor).map_or_else(
            || {
                log::warn!("Floor {floor} does not exist, using height 0.0");
                0.0
            },
            |f| f.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::foundation::math::polyline_length;
    use crate::objects::{share, PrimitiveObject};
    use crate::scene::Scene;
    use approx::assert_relative_eq;

    const WALLED: [&str; 10] = [
        "..........",
        "..........",
        "..........",
        "....#.....",
        "....#.....",
        "....#.....",
        "....#.....",
        "..........",
        "..........",
        "..........",
    ];

    fn config() -> TraversableMapConfig {
        TraversableMapConfig::default()
            .with_resolution(1.0)
            .with_erosion(1)
            .with_seed(3)
    }

    fn two_floor_scene(config: TraversableMapConfig) -> Scene<TraversableMapScene> {
        let floors = vec![
            FloorMap::new(0.0, OccupancyGrid::from_rows(&WALLED).unwrap()),
            FloorMap::new(3.0, OccupancyGrid::free(10).unwrap()),
        ];
        Scene::new(TraversableMapScene::new(config, floors).unwrap())
    }

    #[test]
    fn test_load_creates_building_floors_objects() {
        let mut backend = HeadlessBackend::new();
        let mut scene = two_floor_scene(config());
        scene.add_object(share(PrimitiveObject::cube("table", 0.4))).unwrap();

        let ids = scene.load(&mut backend).unwrap();

        assert_eq!(ids.len(), 4);
        assert_eq!(scene.kind().building_ids(), &ids[..1]);
        assert_eq!(scene.floor_body_ids(), &ids[1..3]);
        assert_relative_eq!(backend.body(ids[2]).unwrap().transform.position.z, 3.0);
        assert!(scene.has_path_graph());
    }

    #[test]
    fn test_path_detours_around_wall() {
        let mut backend = HeadlessBackend::new();
        let mut scene = two_floor_scene(config());
        scene.load(&mut backend).unwrap();

        let source = Point2::new(-3.0, 0.0);
        let target = Point2::new(3.0, 0.0);
        let path = scene.shortest_path(0, source, target, true).unwrap();
        let waypoints = path.waypoints.clone().unwrap();

        assert_eq!(waypoints.first(), Some(&source));
        assert_eq!(waypoints.last(), Some(&target));
        assert!(path.distance > 6.0);
        assert_relative_eq!(path.distance, polyline_length(&waypoints), epsilon = 1e-4);

        let open = scene.shortest_path(1, source, target, false).unwrap();
        assert_eq!(open.waypoints, None);
        assert_relative_eq!(open.distance, 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_erosion_applied_on_load() {
        let mut backend = HeadlessBackend::new();
        let mut scene = two_floor_scene(config().with_erosion(3));
        assert!(scene.kind().floor_map(0).unwrap().is_free((4, 3)));

        scene.load(&mut backend).unwrap();

        let map = scene.kind().floor_map(0).unwrap();
        assert!(!map.is_free((4, 3)));
        assert!(!map.is_free((0, 0)));
        assert!(map.is_free((1, 1)));
    }

    #[test]
    fn test_graph_keeps_largest_region() {
        let mut backend = HeadlessBackend::new();
        let grid = OccupancyGrid::from_rows(&[".##..", "##...", "#....", "#....", "#...."]).unwrap();
        let kind = TraversableMapScene::new(config(), vec![FloorMap::new(0.0, grid)]).unwrap();
        let mut scene = Scene::new(kind);

        scene.load(&mut backend).unwrap();

        assert!(!scene.kind().floor_map(0).unwrap().is_free((0, 0)));
        for _ in 0..50 {
            let (_, point) = scene.random_point(Some(0)).unwrap();
            assert!(!(point.x == -2.5 && point.y == -2.5));
        }
    }

    #[test]
    fn test_random_point_on_free_cell_at_floor_height() {
        let mut backend = HeadlessBackend::new();
        let mut scene = two_floor_scene(config());
        scene.load(&mut backend).unwrap();
        let frame = scene.kind().frame();

        for _ in 0..50 {
            let (floor, point) = scene.random_point(None).unwrap();
            assert!(floor < 2);
            assert_relative_eq!(point.z, scene.floor_height(floor));

            let (row, col) = frame.world_to_map(Point2::new(point.x, point.y));
            let map = scene.kind().floor_map(floor).unwrap();
            assert!(map.is_free((row as usize, col as usize)));
        }
    }

    #[test]
    fn test_floor_queries() {
        let mut scene = two_floor_scene(config());

        for _ in 0..20 {
            assert!(scene.random_floor() < 2);
        }
        assert_relative_eq!(scene.floor_height(1), 3.0);
        assert_relative_eq!(scene.floor_height(7), 0.0);
        assert!(matches!(
            scene.random_point(Some(2)),
            Err(SceneError::InvalidFloor { floor: 2, floor_count: 2 })
        ));
    }

    #[test]
    fn test_path_without_graph() {
        let mut backend = HeadlessBackend::new();
        let mut scene = two_floor_scene(config().with_build_graph(false));
        scene.load(&mut backend).unwrap();

        assert!(!scene.has_path_graph());
        let result = scene.shortest_path(0, Point2::origin(), Point2::new(1.0, 1.0), true);
        assert!(matches!(result, Err(SceneError::PathGraphUnavailable { floor: 0 })));
    }

    #[test]
    fn test_path_before_load_is_unavailable() {
        let scene = two_floor_scene(config());
        let result = scene.shortest_path(1, Point2::origin(), Point2::new(1.0, 1.0), true);
        assert!(matches!(result, Err(SceneError::PathGraphUnavailable { floor: 1 })));
    }

    #[test]
    fn test_random_point_only_from_eroded_maps() {
        let mut backend = HeadlessBackend::new();
        let floors = vec![FloorMap::new(0.0, OccupancyGrid::free(10).unwrap())];
        let kind = TraversableMapScene::new(config().with_erosion(3), floors).unwrap();
        let mut scene = Scene::new(kind);

        assert!(matches!(
            scene.random_point(Some(0)),
            Err(SceneError::NotLoaded("random_point"))
        ));

        scene.load(&mut backend).unwrap();
        let frame = scene.kind().frame();
        let map = scene.kind().floor_map(0).unwrap().clone();
        assert_eq!(map.free_count(), 64);
        for _ in 0..200 {
            let (_, point) = scene.random_point(Some(0)).unwrap();
            let (row, col) = frame.world_to_map(Point2::new(point.x, point.y));
            assert!(map.is_free((row as usize, col as usize)));
        }
    }

    #[test]
    fn test_invalid_floor_data() {
        assert!(matches!(
            TraversableMapScene::new(config(), Vec::new()),
            Err(SceneError::InvalidMap(_))
        ));

        let floors = vec![
            FloorMap::new(0.0, OccupancyGrid::free(4).unwrap()),
            FloorMap::new(3.0, OccupancyGrid::free(5).unwrap()),
        ];
        assert!(matches!(
            TraversableMapScene::new(config(), floors),
            Err(SceneError::InvalidMap(_))
        ));

        let floors = vec![FloorMap::new(0.0, OccupancyGrid::free(4).unwrap())];
        assert!(matches!(
            TraversableMapScene::new(config().with_resolution(0.0), floors),
            Err(SceneError::InvalidMap(_))
        ));
    }
}
