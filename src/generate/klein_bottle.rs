//! Klein bottle samplers. `a` is the large radius and `b` the small radius of the bottle in all of
//! them.
//!
//! The surface parameters `(u, v)` both range over `[0, 2π)`. They are either drawn at random,
//! or, when `uniform` is set, taken from a square grid with `⌊√n⌋` lines: the `i`-th accepted
//! point sits at `u = 2π (i / lines) / lines`, `v = 2π (i % lines) / lines`. With sparsity enabled a
//! rejected grid position is proposed again, so uniform sampling should be combined with
//! `max_attempts` in that case.

use super::{GenerateOptions, collect_points, uniform_between};
use crate::{Point3, Point4, Point5, Result};
use rand::Rng;
use std::f64::consts::TAU;

/// Picks the `(u, v)` surface parameters for the next point.
struct SurfaceParameters {
    uniform: bool,
    lines: usize,
}

impl SurfaceParameters {
    fn new(num_points: usize, uniform: bool) -> Self {
        Self {
            uniform,
            lines: ((num_points as f64).sqrt() as usize).max(1),
        }
    }

    fn at<R: Rng + ?Sized>(&self, accepted: usize, rng: &mut R) -> (f64, f64) {
        if self.uniform {
            let k1 = accepted / self.lines;
            let k2 = accepted % self.lines;
            let lines = self.lines as f64;
            (TAU * k1 as f64 / lines, TAU * k2 as f64 / lines)
        } else {
            (uniform_between(rng, 0.0, TAU), uniform_between(rng, 0.0, TAU))
        }
    }
}

/// The standard flat-torus-like immersion of the Klein bottle in four dimensions, which has no
/// self intersections.
fn klein_4d(a: f64, b: f64, u: f64, v: f64) -> [f64; 4] {
    [
        (a + b * v.cos()) * u.cos(),
        (a + b * v.cos()) * u.sin(),
        b * v.sin() * (u / 2.0).cos(),
        b * v.sin() * (u / 2.0).sin(),
    ]
}

/// Generate points on a "figure 8" immersion of the Klein bottle in three dimensional space.
///
/// # Arguments
///
/// * `num_points`: the number of points to generate
/// * `a`: the large radius
/// * `b`: the small radius
/// * `uniform`: take the surface parameters from a grid instead of drawing them at random
/// * `options`: sparsity and attempt limits
/// * `rng`: the random number generator to draw from
///
/// returns: Result<Vec<OPoint<f64, Const<3>>, Global>, Box<dyn Error, Global>>
pub fn generate_points_on_klein_bottle_3d<R: Rng + ?Sized>(
    num_points: usize,
    a: f64,
    b: f64,
    uniform: bool,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<Point3>> {
    let params = SurfaceParameters::new(num_points, uniform);
    collect_points(num_points, options, |i| {
        let (u, v) = params.at(i, rng);
        let tmp = (u / 2.0).cos() * v.sin() - (u / 2.0).sin() * (2.0 * v).sin();
        Point3::new(
            (a + b * tmp) * u.cos(),
            (a + b * tmp) * u.sin(),
            b * ((u / 2.0).sin() * v.sin() + (u / 2.0).cos() * (2.0 * v).sin()),
        )
    })
}

/// Generate points on the Klein bottle embedded in four dimensional space. If `noise` is not
/// zero, a value drawn uniformly from `[0, noise)` is added to every coordinate of every point.
///
/// # Arguments
///
/// * `num_points`: the number of points to generate
/// * `a`: the large radius
/// * `b`: the small radius
/// * `noise`: the upper bound of the additive noise on each coordinate
/// * `uniform`: take the surface parameters from a grid instead of drawing them at random
/// * `options`: sparsity and attempt limits
/// * `rng`: the random number generator to draw from
///
/// returns: Result<Vec<OPoint<f64, Const<4>>, Global>, Box<dyn Error, Global>>
pub fn generate_points_on_klein_bottle_4d<R: Rng + ?Sized>(
    num_points: usize,
    a: f64,
    b: f64,
    noise: f64,
    uniform: bool,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<Point4>> {
    let params = SurfaceParameters::new(num_points, uniform);
    collect_points(num_points, options, |i| {
        let (u, v) = params.at(i, rng);
        let mut c = klein_4d(a, b, u, v);
        if noise != 0.0 {
            for x in c.iter_mut() {
                *x += uniform_between(rng, 0.0, noise);
            }
        }
        Point4::from(c)
    })
}

/// Generate points on the four dimensional Klein bottle lifted into five dimensions, where the
/// fifth coordinate is the sum of the other four.
///
/// # Arguments
///
/// * `num_points`: the number of points to generate
/// * `a`: the large radius
/// * `b`: the small radius
/// * `uniform`: take the surface parameters from a grid instead of drawing them at random
/// * `options`: sparsity and attempt limits
/// * `rng`: the random number generator to draw from
///
/// returns: Result<Vec<OPoint<f64, Const<5>>, Global>, Box<dyn Error, Global>>
pub fn generate_points_on_klein_bottle_variant_5d<R: Rng + ?Sized>(
    num_points: usize,
    a: f64,
    b: f64,
    uniform: bool,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<Point5>> {
    let params = SurfaceParameters::new(num_points, uniform);
    collect_points(num_points, options, |i| {
        let (u, v) = params.at(i, rng);
        let [x1, x2, x3, x4] = klein_4d(a, b, u, v);
        Point5::new(x1, x2, x3, x4, x1 + x2 + x3 + x4)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SamplingError;
    use crate::common::points::is_sparse;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Distance from a 4D Klein bottle point to its core circle, which should equal `b`.
    fn tube_radius(p: &Point4, a: f64) -> f64 {
        let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
        ((r - a).powi(2) + p[2] * p[2] + p[3] * p[3]).sqrt()
    }

    #[test]
    fn klein_4d_points_lie_on_tube() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(31);
        let points = generate_points_on_klein_bottle_4d(
            400,
            4.0,
            1.0,
            0.0,
            false,
            &GenerateOptions::default(),
            &mut rng,
        )?;
        assert_eq!(points.len(), 400);
        for p in &points {
            assert_relative_eq!(tube_radius(p, 4.0), 1.0, epsilon = 1e-10);
        }
        Ok(())
    }

    #[test]
    fn klein_4d_noise_is_bounded_and_positive() -> Result<()> {
        let noise = 0.01;
        let clean = generate_points_on_klein_bottle_4d(
            50,
            4.0,
            1.0,
            0.0,
            true,
            &GenerateOptions::default(),
            &mut StdRng::seed_from_u64(32),
        )?;
        let noisy = generate_points_on_klein_bottle_4d(
            50,
            4.0,
            1.0,
            noise,
            true,
            &GenerateOptions::default(),
            &mut StdRng::seed_from_u64(32),
        )?;

        for (c, n) in clean.iter().zip(noisy.iter()) {
            for i in 0..4 {
                let d = n[i] - c[i];
                assert!((0.0..noise + 1e-12).contains(&d));
            }
        }
        Ok(())
    }

    #[test]
    fn uniform_grid_starts_at_origin_of_parameters() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(33);
        let points = generate_points_on_klein_bottle_4d(
            16,
            3.0,
            1.0,
            0.0,
            true,
            &GenerateOptions::default(),
            &mut rng,
        )?;
        assert_relative_eq!(points[0], Point4::new(4.0, 0.0, 0.0, 0.0), epsilon = 1e-12);

        // Four lines of four: the second point advances v by a quarter turn
        assert_relative_eq!(points[1], Point4::new(3.0, 0.0, 1.0, 0.0), epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn uniform_grid_ignores_rng() -> Result<()> {
        let a = generate_points_on_klein_bottle_3d(
            25,
            4.0,
            1.0,
            true,
            &GenerateOptions::default(),
            &mut StdRng::seed_from_u64(1),
        )?;
        let b = generate_points_on_klein_bottle_3d(
            25,
            4.0,
            1.0,
            true,
            &GenerateOptions::default(),
            &mut StdRng::seed_from_u64(2),
        )?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn klein_3d_points_are_bounded() -> Result<()> {
        let (a, b) = (4.0, 1.0);
        let mut rng = StdRng::seed_from_u64(34);
        let points = generate_points_on_klein_bottle_3d(
            300,
            a,
            b,
            false,
            &GenerateOptions::default(),
            &mut rng,
        )?;
        for p in &points {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(r >= a - 2.0 * b - 1e-12 && r <= a + 2.0 * b + 1e-12);
            assert!(p.z.abs() <= 2.0 * b + 1e-12);
        }
        Ok(())
    }

    #[test]
    fn klein_5d_last_coordinate_is_sum() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(35);
        let points = generate_points_on_klein_bottle_variant_5d(
            100,
            4.0,
            1.0,
            false,
            &GenerateOptions::default(),
            &mut rng,
        )?;
        for p in &points {
            assert_relative_eq!(p[4], p[0] + p[1] + p[2] + p[3], epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn sparse_random_sampling() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(36);
        let options = GenerateOptions::sparse(0.2 * 0.2).with_max_attempts(100_000);
        let points =
            generate_points_on_klein_bottle_variant_5d(200, 4.0, 1.0, false, &options, &mut rng)?;
        assert_eq!(points.len(), 200);
        assert!(is_sparse(&points, 0.2 * 0.2));
        Ok(())
    }

    #[test]
    fn sparse_uniform_sampling_can_stall() {
        // Grid positions closer than the spacing get proposed over and over
        let options = GenerateOptions::sparse(100.0).with_max_attempts(1000);
        let result = generate_points_on_klein_bottle_3d(
            16,
            4.0,
            1.0,
            true,
            &options,
            &mut StdRng::seed_from_u64(37),
        );
        let err = result.unwrap_err();
        assert!(err.downcast_ref::<SamplingError>().is_some());
    }
}
