use super::{GenerateOptions, collect_points, uniform_between};
use crate::Result;
use crate::na::Point;
use rand::Rng;

/// Generate points on the moment curve `t -> (t, t^2, ..., t^D)` in `D` dimensional space, with
/// the parameter `t` drawn uniformly from `[min_x, max_x)`.
///
/// # Arguments
///
/// * `num_points`: the number of points to generate
/// * `min_x`: the lower bound of the curve parameter
/// * `max_x`: the upper bound of the curve parameter
/// * `options`: sparsity and attempt limits
/// * `rng`: the random number generator to draw from
///
/// returns: Result<Vec<OPoint<f64, Const<{ D }>>, Global>, Box<dyn Error, Global>>
pub fn generate_points_on_moment_curve<const D: usize, R: Rng + ?Sized>(
    num_points: usize,
    min_x: f64,
    max_x: f64,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<Point<f64, D>>> {
    collect_points(num_points, options, |_| {
        let t = uniform_between(rng, min_x, max_x);
        let mut p = Point::<f64, D>::origin();
        let mut power = 1.0;
        for i in 0..D {
            power *= t;
            p[i] = power;
        }
        p
    })
}
