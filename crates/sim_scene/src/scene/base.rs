//! Scene lifecycle and shared contract
//!
//! [`Scene`] wraps a concrete [`SceneKind`] and provides, once for every
//! scene type, the load-exactly-once state machine and the object-add rules.
//! Concrete kinds supply the loading routine, the object container and any
//! spatial queries they support.
//!
//! ## Lifecycle
//!
//! ```text
//! new ──add_object*──▶ load ──add_object_as_driver*──▶ drop
//!       (deferred)      │        (realized immediately)
//!                       └─ second load ─▶ AlreadyLoaded
//! ```

use super::error::{SceneError, SceneResult};
use crate::backend::PhysicsBackend;
use crate::foundation::collections::BodyId;
use crate::foundation::math::{polyline_length, Point2, Point3};
use crate::objects::{ObjectStates, SharedObject};

/// Lifecycle state owned by every scene
///
/// Concrete kinds receive it mutably only while their loading routine runs.
#[derive(Debug, Default)]
pub struct SceneState {
    loaded: bool,
    has_path_graph: bool,
    floor_body_ids: Vec<BodyId>,
}

impl SceneState {
    /// Whether the scene has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether a shortest-path index has been built
    pub fn has_path_graph(&self) -> bool {
        self.has_path_graph
    }

    /// Backend ids of the floor geometry, in floor order
    pub fn floor_body_ids(&self) -> &[BodyId] {
        &self.floor_body_ids
    }

    /// Record a floor body created by the loading routine
    pub fn record_floor_body(&mut self, id: BodyId) {
        self.floor_body_ids.push(id);
    }

    /// Mark that the shortest-path index is available
    pub fn mark_path_graph_built(&mut self) {
        self.has_path_graph = true;
    }
}

/// Proof that the caller is the simulator driver
///
/// Only this crate can construct one, so post-load additions can only be
/// routed through [`crate::simulator::Simulator::import_object`].
#[derive(Debug)]
pub struct DriverToken {
    _private: (),
}

impl DriverToken {
    pub(crate) const fn new() -> Self {
        Self { _private: () }
    }
}

/// Result of a shortest-path query
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Ordered waypoints from source to target, when requested
    pub waypoints: Option<Vec<Point2>>,
    /// Geodesic distance, the length of the waypoint polyline
    pub distance: f32,
}

impl ShortestPath {
    /// Build the result from a full waypoint list
    ///
    /// The distance is always measured on the full list; the waypoints are
    /// dropped unless `entire_path` is set.
    pub fn from_waypoints(waypoints: Vec<Point2>, entire_path: bool) -> Self {
        let distance = polyline_length(&waypoints);
        Self {
            waypoints: entire_path.then_some(waypoints),
            distance,
        }
    }
}

/// Behaviour a concrete scene type must provide
///
/// The three required methods correspond to the loading routine, the object
/// listing and the registration hook. Spatial queries have defaults that a
/// kind overrides when it supports them.
pub trait SceneKind {
    /// Human-readable scene type, used in logs
    const KIND: &'static str;

    /// Build everything in the backend: floors, buildings, registered objects
    ///
    /// Called at most once. Returns the ids of every body created, which
    /// [`Scene::load`] hands back unchanged.
    fn load_kind(
        &mut self,
        state: &mut SceneState,
        backend: &mut dyn PhysicsBackend,
    ) -> SceneResult<Vec<BodyId>>;

    /// Every object tracked by the scene, stable order across calls
    fn objects(&self) -> Vec<SharedObject>;

    /// Track an object
    ///
    /// Objects registered before loading must be realized by `load_kind`;
    /// after this call the object must appear in [`SceneKind::objects`].
    fn register_object(&mut self, object: SharedObject);

    /// Sample a floor index
    fn random_floor(&mut self) -> usize {
        0
    }

    /// Sample a traversable point, on `floor` or on a random floor
    fn random_point(&mut self, _floor: Option<usize>) -> SceneResult<(usize, Point3)> {
        Err(SceneError::NotImplemented("random_point"))
    }

    /// Shortest path between two floor-plane points
    fn shortest_path(
        &self,
        _floor: usize,
        _source: Point2,
        _target: Point2,
        _entire_path: bool,
    ) -> SceneResult<ShortestPath> {
        Err(SceneError::NotImplemented("shortest_path"))
    }

    /// Elevation of the given floor
    fn floor_height(&self, _floor: usize) -> f32 {
        0.0
    }
}

/// A scene: lifecycle state plus a concrete kind
#[derive(Debug)]
pub struct Scene<K: SceneKind> {
    state: SceneState,
    kind: K,
}

impl<K: SceneKind> Scene<K> {
    /// Wrap an unloaded concrete scene
    pub fn new(kind: K) -> Self {
        Self {
            state: SceneState::default(),
            kind,
        }
    }

    /// Whether `load` has been called
    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// Whether a shortest-path index has been built
    pub fn has_path_graph(&self) -> bool {
        self.state.has_path_graph()
    }

    /// Backend ids of the floor geometry
    pub fn floor_body_ids(&self) -> &[BodyId] {
        self.state.floor_body_ids()
    }

    /// Read access to the concrete scene
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Load the scene into the backend
    ///
    /// Fails with [`SceneError::AlreadyLoaded`] on any call after the first.
    /// The scene counts as loaded even if the loading routine fails.
    pub fn load(&mut self, backend: &mut dyn PhysicsBackend) -> SceneResult<Vec<BodyId>> {
        if self.state.loaded {
            return Err(SceneError::AlreadyLoaded);
        }
        self.state.loaded = true;

        log::info!("Loading {} scene", K::KIND);
        let ids = self.kind.load_kind(&mut self.state, backend)?;
        log::info!(
            "{} scene loaded: {} bodies, {} floors, {} objects",
            K::KIND,
            ids.len(),
            self.state.floor_body_ids.len(),
            self.kind.objects().len()
        );
        Ok(ids)
    }

    /// Add an object before the scene is loaded
    ///
    /// The object is realized by the loading routine, so this always returns
    /// `Ok(None)`. Once the scene is loaded, objects can only be added through
    /// the simulator and this fails with [`SceneError::UnauthorizedMutation`].
    pub fn add_object(&mut self, object: SharedObject) -> SceneResult<Option<Vec<BodyId>>> {
        if self.state.loaded {
            log::warn!(
                "Rejected '{}': {} scene is already loaded",
                object.borrow().name(),
                K::KIND
            );
            return Err(SceneError::UnauthorizedMutation);
        }
        Self::check_category(&object)?;

        self.kind.register_object(object);
        Ok(None)
    }

    /// Add an object on behalf of the simulator
    ///
    /// On a loaded scene the object is instantiated immediately and its body
    /// ids are returned; otherwise it is deferred like [`Scene::add_object`].
    /// A backend failure leaves the object unregistered.
    pub fn add_object_as_driver(
        &mut self,
        object: SharedObject,
        backend: &mut dyn PhysicsBackend,
        _token: &DriverToken,
    ) -> SceneResult<Option<Vec<BodyId>>> {
        Self::check_category(&object)?;

        let ids = if self.state.loaded {
            let ids = object.borrow_mut().load(backend)?;
            log::debug!(
                "Late-loaded '{}' into {} scene",
                object.borrow().name(),
                K::KIND
            );
            Some(ids)
        } else {
            None
        };

        self.kind.register_object(object);
        Ok(ids)
    }

    /// Every object tracked by the scene
    pub fn objects(&self) -> Vec<SharedObject> {
        self.kind.objects()
    }

    /// Objects whose state capability contains `state`
    ///
    /// Objects without a state capability are skipped.
    pub fn objects_with_state(&self, state: ObjectStates) -> Vec<SharedObject> {
        self.kind
            .objects()
            .into_iter()
            .filter(|object| {
                object
                    .borrow()
                    .states()
                    .is_some_and(|states| states.contains(state))
            })
            .collect()
    }

    /// Sample a floor index
    pub fn random_floor(&mut self) -> usize {
        self.kind.random_floor()
    }

    /// Sample a traversable point on `floor`, or on a random floor
    pub fn random_point(&mut self, floor: Option<usize>) -> SceneResult<(usize, Point3)> {
        self.kind.random_point(floor)
    }

    /// Shortest path between two points on a floor
    pub fn shortest_path(
        &self,
        floor: usize,
        source: Point2,
        target: Point2,
        entire_path: bool,
    ) -> SceneResult<ShortestPath> {
        self.kind.shortest_path(floor, source, target, entire_path)
    }

    /// Elevation of the given floor
    pub fn floor_height(&self, floor: usize) -> f32 {
        self.kind.floor_height(floor)
    }

    fn check_category(object: &SharedObject) -> SceneResult<()> {
        let category = object.borrow().category();
        if category.is_scene_excluded() {
            return Err(SceneError::UnsupportedObjectType(category));
        }
        Ok(())
    }
}

/// Fail with [`SceneError::InvalidFloor`] unless `floor < floor_count`
pub(crate) fn check_floor(floor: usize, floor_count: usize) -> SceneResult<()> {
    if floor < floor_count {
        Ok(())
    } else {
        Err(SceneError::InvalidFloor { floor, floor_count })
    }
}
