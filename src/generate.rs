//! Synthetic point clouds sampled on parametric shapes, used to exercise the sparsifier and
//! anything downstream of it. Every generator takes the random number generator to draw from, so
//! that results can be reproduced by seeding it.
//!
//! Generators can optionally sparsify while they sample: each candidate goes through a
//! `PointSparsifier` and only accepted candidates count towards the requested total.

mod klein_bottle;
mod moment_curve;
mod plane;
mod sphere;

use crate::Result;
use crate::errors::SamplingError;
use crate::na::Point;
use crate::sparsify::KdPointSparsifier;
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use klein_bottle::{
    generate_points_on_klein_bottle_3d, generate_points_on_klein_bottle_4d,
    generate_points_on_klein_bottle_variant_5d,
};
pub use moment_curve::generate_points_on_moment_curve;
pub use plane::generate_points_on_plane;
pub use sphere::generate_points_on_sphere;

/// Options shared by all of the generators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// If set, candidates closer than this squared distance to an already accepted point are
    /// rejected and another candidate is drawn in their place.
    pub min_squared_dist: Option<f64>,

    /// If set, the maximum number of candidates which may be drawn. A generator that runs out of
    /// attempts before reaching the requested count fails with `SamplingError`. When not set, a
    /// generator keeps drawing until it has enough points, which may never happen if the
    /// sparsity is too strict for the shape.
    pub max_attempts: Option<usize>,
}

impl GenerateOptions {
    /// Options which sparsify as points are generated, with no limit on the number of attempts.
    pub fn sparse(min_squared_dist: f64) -> Self {
        Self {
            min_squared_dist: Some(min_squared_dist),
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Draw candidates from `draw` until `num_points` have been accepted. The closure receives the
/// number of points accepted so far, which the uniform grid parameterizations use to pick their
/// next grid position.
fn collect_points<const D: usize, F>(
    num_points: usize,
    options: &GenerateOptions,
    mut draw: F,
) -> Result<Vec<Point<f64, D>>>
where
    F: FnMut(usize) -> Point<f64, D>,
{
    let mut sparsifier = options.min_squared_dist.map(KdPointSparsifier::<D>::new);
    let mut points = Vec::with_capacity(num_points);
    let mut attempts = 0;

    loop {
        let accepted = sparsifier.as_ref().map_or(points.len(), |s| s.len());
        if accepted >= num_points {
            break;
        }

        if options.max_attempts.is_some_and(|max| attempts >= max) {
            warn!(
                "Gave up generating points after {} attempts, accepted {} of {}",
                attempts, accepted, num_points
            );
            return Err(SamplingError::AttemptsExhausted {
                requested: num_points,
                accepted,
            }
            .into());
        }
        attempts += 1;

        let candidate = draw(accepted);
        match sparsifier.as_mut() {
            Some(s) => {
                s.try_insert(candidate);
            }
            None => points.push(candidate),
        }
    }

    Ok(match sparsifier {
        Some(s) => s.into_points(),
        None => points,
    })
}

/// A value drawn uniformly from `[lo, hi)`. Unlike `random_range` this tolerates `lo == hi`.
fn uniform_between<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.random::<f64>()
}
