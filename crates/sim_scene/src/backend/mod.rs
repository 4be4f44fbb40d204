//! Backend abstraction for the physics engine
//!
//! Scenes and objects never talk to a physics engine directly. They describe
//! the bodies they need with a [`BodyDesc`] and get back an opaque [`BodyId`].

mod headless;

pub use headless::HeadlessBackend;

use crate::foundation::collections::BodyId;
use crate::foundation::math::{Transform, Vec3};
use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors reported by a physics backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The shape description cannot be turned into a body
    #[error("Invalid collision shape: {0}")]
    InvalidShape(String),

    /// The backend refused to create the body
    #[error("Body rejected by backend: {0}")]
    Rejected(String),
}

/// Collision geometry of a body, in model space
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// Infinite plane through the body origin with the given normal
    Plane {
        /// Plane normal (model space)
        normal: Vec3,
    },
    /// Axis-aligned box given by half extents
    Box {
        /// Half size along each axis
        half_extents: Vec3,
    },
    /// Sphere with the given radius
    Sphere(f32),
    /// Triangle mesh referenced by asset name; the backend resolves it
    Mesh(String),
}

impl CollisionShape {
    /// Upward-facing infinite ground plane
    pub fn ground_plane() -> Self {
        Self::Plane { normal: Vec3::z() }
    }

    /// Check that the shape is physically meaningful
    pub fn validate(&self) -> BackendResult<()> {
        match self {
            Self::Plane { normal } if normal.norm_squared() <= f32::EPSILON => {
                Err(BackendError::InvalidShape("plane normal is zero".to_string()))
            }
            Self::Box { half_extents } if half_extents.iter().any(|e| *e <= 0.0) => {
                Err(BackendError::InvalidShape(format!(
                    "box half extents must be positive, got {half_extents:?}"
                )))
            }
            Self::Sphere(radius) if *radius <= 0.0 => {
                Err(BackendError::InvalidShape(format!("sphere radius must be positive, got {radius}")))
            }
            Self::Mesh(name) if name.is_empty() => {
                Err(BackendError::InvalidShape("mesh name is empty".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Everything a backend needs to instantiate one body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Debug name of the body
    pub name: String,
    /// Collision geometry
    pub shape: CollisionShape,
    /// World transform of the body origin
    pub transform: Transform,
    /// Fixed bodies never move (floors, buildings)
    pub fixed: bool,
    /// Optional visual colour, RGBA in [0, 1]
    pub rgba: Option<[f32; 4]>,
}

impl BodyDesc {
    /// Create a dynamic body description at the origin
    pub fn new(name: impl Into<String>, shape: CollisionShape) -> Self {
        Self {
            name: name.into(),
            shape,
            transform: Transform::identity(),
            fixed: false,
            rgba: None,
        }
    }

    /// Set the world transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Mark the body as fixed
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Set the visual colour
    #[must_use]
    pub fn with_rgba(mut self, rgba: [f32; 4]) -> Self {
        self.rgba = Some(rgba);
        self
    }
}

/// Physics backend interface consumed by scenes and objects
///
/// Implementations are accessed from a single controlling thread.
pub trait PhysicsBackend {
    /// Instantiate a body and return its identifier
    fn create_body(&mut self, desc: &BodyDesc) -> BackendResult<BodyId>;

    /// Number of bodies currently alive in the backend
    fn body_count(&self) -> usize;

    /// Check whether the backend knows the given body
    fn contains_body(&self, id: BodyId) -> bool;
}
