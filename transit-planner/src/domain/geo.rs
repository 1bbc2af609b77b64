//! Great-circle distance.
//!
//! All distances in the planner are straight-line distances over a spherical
//! Earth, computed with the spherical law of cosines.

use super::Coordinate;

/// Mean Earth radius used for all distances, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.01;

/// Great-circle distance between two points, in kilometres.
///
/// The cosine argument can overshoot 1.0 by an epsilon for identical or
/// nearly identical points; it is clamped so the result is always finite.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::{Coordinate, great_circle_km};
///
/// let a = Coordinate::new(40.40, -3.70).unwrap();
/// let b = Coordinate::new(40.41, -3.70).unwrap();
///
/// let d = great_circle_km(a, b);
/// assert!((d - 1.112).abs() < 0.001);
/// assert_eq!(great_circle_km(a, a), 0.0);
/// ```
pub fn great_circle_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    // abs() keeps the result bit-for-bit symmetric
    let dlon = (a.lon() - b.lon()).abs().to_radians();

    let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos();
    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Distances from one point to each of `points`, in order.
pub fn distances_from(origin: Coordinate, points: &[Coordinate]) -> Vec<f64> {
    points
        .iter()
        .map(|p| great_circle_km(origin, *p))
        .collect()
}

/// All-pairs distance matrix; `matrix[i][j]` is the distance from
/// `points[i]` to `points[j]`.
pub fn distance_matrix(points: &[Coordinate]) -> Vec<Vec<f64>> {
    points.iter().map(|p| distances_from(*p, points)).collect()
}
