//! Scene error types

use crate::backend::BackendError;
use crate::navigation::MapError;
use crate::objects::ObjectCategory;
use thiserror::Error;

/// Result type for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised by scene lifecycle, registry and spatial queries
#[derive(Debug, Error)]
pub enum SceneError {
    /// `load` was called on a scene that is already loaded
    #[error("This scene is already loaded")]
    AlreadyLoaded,

    /// A non-driver caller tried to add an object to a loaded scene
    #[error("To add an object to an already-loaded scene, import it through the simulator")]
    UnauthorizedMutation,

    /// Visual-only and ephemeral objects belong to the simulator, not the scene
    #[error("{0} objects must be added directly to the simulator")]
    UnsupportedObjectType(ObjectCategory),

    /// The concrete scene does not answer this query
    #[error("{0} is not implemented for this scene")]
    NotImplemented(&'static str),

    /// The query needs data that only exists once the scene is loaded
    #[error("{0} needs the scene to be loaded first")]
    NotLoaded(&'static str),

    /// Floor index outside of the scene's floors
    #[error("Floor {floor} does not exist (scene has {floor_count} floors)")]
    InvalidFloor {
        /// Requested floor
        floor: usize,
        /// Number of floors in the scene
        floor_count: usize,
    },

    /// Source and target are not connected on this floor
    #[error("No path between source and target on floor {floor}")]
    NoPathFound {
        /// Floor the query ran on
        floor: usize,
    },

    /// Shortest-path queries need the navigation graph, which was not built
    #[error("No navigation graph available for floor {floor}")]
    PathGraphUnavailable {
        /// Floor the query ran on
        floor: usize,
    },

    /// A configuration value cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Map or floor data cannot be used
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// Occupancy grid construction failed
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    /// Backend failure while loading
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}
