use super::{GenerateOptions, collect_points, uniform_between};
use crate::Result;
use crate::na::{Point, SVector};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Generate points uniformly distributed on the sphere of the given radius centered at the origin
/// of `D` dimensional space (so the sphere itself has dimension `D - 1`).
///
/// When `radius_noise_percentage` is positive, each point is moved along its ray from the origin
/// by scaling it with a factor drawn uniformly from
/// `[(100 - percentage) / 100, (100 + percentage) / 100)`.
///
/// # Arguments
///
/// * `num_points`: the number of points to generate
/// * `radius`: the radius of the sphere
/// * `radius_noise_percentage`: the amount of radial noise as a percentage of the radius
/// * `options`: sparsity and attempt limits
/// * `rng`: the random number generator to draw from
///
/// returns: Result<Vec<OPoint<f64, Const<{ D }>>, Global>, Box<dyn Error, Global>>
pub fn generate_points_on_sphere<const D: usize, R: Rng + ?Sized>(
    num_points: usize,
    radius: f64,
    radius_noise_percentage: f64,
    options: &GenerateOptions,
    rng: &mut R,
) -> Result<Vec<Point<f64, D>>> {
    collect_points(num_points, options, |_| {
        let direction = random_direction::<D, R>(rng);
        let mut scale = radius;
        if radius_noise_percentage > 0.0 {
            scale *= uniform_between(
                rng,
                (100.0 - radius_noise_percentage) / 100.0,
                (100.0 + radius_noise_percentage) / 100.0,
            );
        }
        Point::from(direction * scale)
    })
}

/// A unit vector with a uniformly random direction, found by normalizing a vector of independent
/// standard normal samples.
fn random_direction<const D: usize, R: Rng + ?Sized>(rng: &mut R) -> SVector<f64, D> {
    loop {
        let v = SVector::<f64, D>::from_fn(|_, _| StandardNormal.sample(rng));
        let norm = v.norm();
        if norm > 0.0 {
            return v / norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point3, Point5};
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn points_lie_on_sphere() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(21);
        let points: Vec<Point5> =
            generate_points_on_sphere(200, 2.5, 0.0, &GenerateOptions::default(), &mut rng)?;
        assert_eq!(points.len(), 200);
        for p in &points {
            assert_relative_eq!(p.coords.norm(), 2.5, epsilon = 1e-10);
        }
        Ok(())
    }

    #[test]
    fn radius_noise_stays_in_band() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(22);
        let points: Vec<Point3> =
            generate_points_on_sphere(500, 1.0, 10.0, &GenerateOptions::default(), &mut rng)?;
        let radii = points.iter().map(|p| p.coords.norm()).collect::<Vec<_>>();
        assert!(radii.iter().all(|r| *r >= 0.9 - 1e-12 && *r < 1.1 + 1e-12));

        // With noise the radii should actually spread out
        let spread = radii.iter().cloned().fold(f64::MIN, f64::max)
            - radii.iter().cloned().fold(f64::MAX, f64::min);
        assert!(spread > 0.1);
        Ok(())
    }

    #[test]
    fn directions_cover_both_hemispheres() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(23);
        let points: Vec<Point3> =
            generate_points_on_sphere(1000, 1.0, 0.0, &GenerateOptions::default(), &mut rng)?;
        let upper = points.iter().filter(|p| p.z > 0.0).count();
        assert!(upper > 400 && upper < 600);
        Ok(())
    }
}
