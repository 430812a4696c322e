use super::{GenerateOptions, collect_points, uniform_between};
use crate::{Point3, Result};
use rand::Rng;

/// Side length of the square the plane points are drawn from.
const PLANE_EXTENT: f64 = 5.0;

/// Generate points uniformly distributed over the square `[0, 5) x [0, 5)` of the z = 0 plane in
/// three dimensional space.
///
/// # Arguments
///
/// * `num_points`: the number of points to generate
/// * `options`: sparsity and attempt limits
/// * `rng`: the random number generator to draw from
///
/// returns: Result<Vec<OPoint<f64, Const<3>>, Global>, Box<dyn Error, Global>>
///
/// # Examples
///
/// ```
/// use pointsparse::generate::{generate_points_on_plane, GenerateOptions};
/// let mut rng = rand::rng();
/// let points = generate_points_on_plane(10, &GenerateOptions::default(), &mut rng).unwrap();
/// assert_eq!(points.len(), 10);
/// assert!(points.iter().all(|p| p.z == 0.0));
/// ```
pub fn generate_points_on_plane<R: Rng + ?Sized>(
    num_points: usize,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<Point3>> {
    collect_points(num_points, options, |_| {
        let x = uniform_between(rng, 0.0, PLANE_EXTENT);
        let y = uniform_between(rng, 0.0, PLANE_EXTENT);
        Point3::new(x, y, 0.0)
    })
}
