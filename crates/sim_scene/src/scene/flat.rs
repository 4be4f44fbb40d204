//! Queries shared by single-floor scenes on an unbounded ground plane

use super::base::{check_floor, ShortestPath};
use super::error::{SceneError, SceneResult};
use crate::foundation::math::{Point2, Point3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG, or one seeded from entropy when no seed is configured
pub(crate) fn scene_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

/// Uniform point in `[-half_extent, half_extent]²` on the ground
///
/// A non-finite extent fails with [`SceneError::InvalidConfig`].
pub(crate) fn random_ground_point(
    rng: &mut StdRng,
    floor: Option<usize>,
    half_extent: f32,
) -> SceneResult<(usize, Point3)> {
    let floor = floor.unwrap_or(0);
    check_floor(floor, 1)?;
    if !half_extent.is_finite() {
        return Err(SceneError::InvalidConfig(format!(
            "sample_half_extent must be finite, got {half_extent}"
        )));
    }
    let half_extent = half_extent.abs();
    let x = rng.gen_range(-half_extent..=half_extent);
    let y = rng.gen_range(-half_extent..=half_extent);
    Ok((floor, Point3::new(x, y, 0.0)))
}

/// Straight segment from source to target; nothing blocks the ground plane
pub(crate) fn straight_path(
    floor: usize,
    source: Point2,
    target: Point2,
    entire_path: bool,
) -> SceneResult<ShortestPath> {
    check_floor(floor, 1)?;
    Ok(ShortestPath::from_waypoints(vec![source, target], entire_path))
}
