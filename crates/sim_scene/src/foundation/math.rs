//! Math utilities and types
//!
//! Provides the fundamental math types used by scenes and navigation.

pub use nalgebra::{Vector2, Vector3, Quaternion, Unit};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 2D point type (floor-plane coordinates)
pub type Point2 = nalgebra::Point2<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform lifted to the given height above the origin
    pub fn at_height(z: f32) -> Self {
        Self::from_position(Vec3::new(0.0, 0.0, z))
    }

    /// Set the uniform scale of this transform
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }
}

/// Sum of segment lengths along a polyline
pub fn polyline_length(points: &[Point2]) -> f32 {
    points
        .windows(2)
        .map(|pair| nalgebra::distance(&pair[0], &pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polyline_length() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 4.0),
        ];
        assert_relative_eq!(polyline_length(&points), 7.0);
        assert_relative_eq!(polyline_length(&points[..1]), 0.0);
        assert_relative_eq!(polyline_length(&[]), 0.0);
    }

    #[test]
    fn test_transform_at_height() {
        let t = Transform::at_height(2.5).with_uniform_scale(2.0);
        assert_relative_eq!(t.position.z, 2.5);
        assert_eq!(t.scale, Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(t.rotation, Quat::identity());
    }
}
