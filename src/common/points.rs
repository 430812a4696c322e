//! Common operations on f64 points in D-dimensional space.

use crate::na::Point;
use itertools::Itertools;

/// Returns the distance between two points in D-dimensional space.
///
/// # Arguments
///
/// * `a`: the first point
/// * `b`: the second point
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use pointsparse::common::points::dist;
/// use pointsparse::Point2;
/// let a = Point2::new(1.0, 2.0);
/// let b = Point2::new(3.0, 2.0);
/// assert_eq!(dist(&a, &b), 2.0);
/// ```
pub fn dist<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    (a - b).norm()
}

/// Returns the squared distance between two points in D-dimensional space. All of the sparsity
/// thresholds in this crate are expressed in squared units so that no square root is needed.
///
/// # Examples
///
/// ```
/// use pointsparse::common::points::dist_squared;
/// use pointsparse::Point3;
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(1.0, 2.0, 2.0);
/// assert_eq!(dist_squared(&a, &b), 9.0);
/// ```
pub fn dist_squared<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    (a - b).norm_squared()
}

/// Copy the coordinates of a point into a plain array, the form the kd-tree works with.
pub fn to_coords<const D: usize>(p: &Point<f64, D>) -> [f64; D] {
    std::array::from_fn(|i| p[i])
}

/// Find the smallest squared distance between any two distinct entries of `points` by checking
/// every pair. Returns `None` when there are fewer than two points.
pub fn min_pairwise_dist_squared<const D: usize>(points: &[Point<f64, D>]) -> Option<f64> {
    points
        .iter()
        .tuple_combinations()
        .map(|(a, b)| dist_squared(a, b))
        .min_by(|a, b| a.total_cmp(b))
}

/// Check by brute force that no two entries of `points` are closer than `min_squared_dist`.
pub fn is_sparse<const D: usize>(points: &[Point<f64, D>], min_squared_dist: f64) -> bool {
    min_pairwise_dist_squared(points).is_none_or(|d| d >= min_squared_dist)
}
