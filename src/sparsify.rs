//! Greedy sparsification of point sets. Points are considered in order and a point is kept only if
//! no point that was kept before it lies closer than a minimum distance, so between two points
//! that are too close to each other the one with the lower index always survives.
//!
//! There are two ways to run the pass, selected with `SparsifyPolicy`. Both produce the same
//! result when the neighbor index is exact; they differ in how the index is used.

use crate::Result;
use crate::common::IndexMask;
use crate::na::Point;
use crate::neighbors::{KdTreeIndex, NeighborIndex};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// The minimum squared distance used when no other is given, corresponding to a spacing of 0.05.
pub const DEFAULT_MIN_SQUARED_DIST: f64 = 0.05 * 0.05;

/// How the sparsifier uses its neighbor index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SparsifyPolicy {
    /// Build the index once over every input point, including those that will be dropped, then
    /// walk the input and drop the close neighbors of each point that is kept. This is the fast
    /// option.
    #[default]
    BuildOnce,

    /// Start with an empty index and insert each point that is kept, accepting a new point only
    /// if its nearest kept point is far enough away. Slower, but the index only ever contains
    /// points that are part of the result.
    Incremental,
}

/// Configuration for a sparsification pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparsifyOptions {
    /// Two kept points will never be closer than this squared distance. A threshold which is
    /// zero or negative keeps every point.
    pub min_squared_dist: f64,

    pub policy: SparsifyPolicy,
}

impl Default for SparsifyOptions {
    fn default() -> Self {
        Self {
            min_squared_dist: DEFAULT_MIN_SQUARED_DIST,
            policy: SparsifyPolicy::default(),
        }
    }
}

impl SparsifyOptions {
    pub fn new(min_squared_dist: f64, policy: SparsifyPolicy) -> Self {
        Self {
            min_squared_dist,
            policy,
        }
    }

    /// Parse options from a JSON document. Missing fields take their default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use pointsparse::{SparsifyOptions, SparsifyPolicy};
    /// let options = SparsifyOptions::from_json(r#"{"policy": "incremental"}"#).unwrap();
    /// assert_eq!(options.policy, SparsifyPolicy::Incremental);
    /// assert_eq!(options.min_squared_dist, 0.05 * 0.05);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Sparsify a point set with the build-once policy on a kd-tree index, returning the kept points
/// in their original order. The input is not modified.
///
/// # Arguments
///
/// * `points`: the points to sparsify, in priority order
/// * `min_squared_dist`: no two returned points will be closer than this squared distance
///
/// returns: Vec<OPoint<f64, Const<{ D }>>, Global>
///
/// # Examples
///
/// ```
/// use pointsparse::{sparsify_point_set, Point2};
/// let points = (0..4).map(|i| Point2::new(i as f64, 0.0)).collect::<Vec<_>>();
/// let kept = sparsify_point_set(&points, 1.5);
/// assert_eq!(kept, vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)]);
/// ```
pub fn sparsify_point_set<const D: usize>(
    points: &[Point<f64, D>],
    min_squared_dist: f64,
) -> Vec<Point<f64, D>> {
    let options = SparsifyOptions::new(min_squared_dist, SparsifyPolicy::BuildOnce);
    sparsify_with_options(points, &options)
}

/// Sparsify a point set according to `options`, returning the kept points in their original
/// order.
pub fn sparsify_with_options<const D: usize>(
    points: &[Point<f64, D>],
    options: &SparsifyOptions,
) -> Vec<Point<f64, D>> {
    sparsify_indices(points, options)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Sparsify a point set according to `options` using a kd-tree index, returning the indices of
/// the kept points in ascending order.
pub fn sparsify_indices<const D: usize>(
    points: &[Point<f64, D>],
    options: &SparsifyOptions,
) -> Vec<usize> {
    let start = Instant::now();
    let kept = match options.policy {
        SparsifyPolicy::BuildOnce => {
            sparsify_mask_with::<KdTreeIndex<D>, D>(points, options.min_squared_dist)
        }
        SparsifyPolicy::Incremental => {
            sparsify_incremental_mask_with::<KdTreeIndex<D>, D>(points, options.min_squared_dist)
        }
    };

    debug!(
        "Point set sparsified from {} to {} points ({:?}, min squared distance {}) in {:?}",
        points.len(),
        kept.count_true(),
        options.policy,
        options.min_squared_dist,
        start.elapsed()
    );

    kept.to_indices()
}

/// Run the build-once pass with any neighbor index, returning a mask which is `true` for each
/// point that is kept.
///
/// The index is built a single time over all of the input points. Walking the input in order,
/// every point that has not been dropped is kept, and its neighbors are visited in order of
/// increasing distance and dropped until the first one at or beyond the threshold. A decision
/// about a point is never revisited once it has been made.
pub fn sparsify_mask_with<I, const D: usize>(
    points: &[Point<f64, D>],
    min_squared_dist: f64,
) -> IndexMask
where
    I: NeighborIndex<D>,
{
    let index = I::from_points(points);
    let mut dropped = IndexMask::new(points.len(), false);
    let mut kept = IndexMask::new(points.len(), false);

    for (i, p) in points.iter().enumerate() {
        if dropped.get(i) {
            continue;
        }

        kept.set(i, true);

        // The point itself comes back first at a distance of zero and is marked here too, which
        // has no effect because it has already been passed over.
        for (neighbor, d) in index.incremental(p) {
            if d < min_squared_dist {
                dropped.set(neighbor, true);
            } else {
                break;
            }
        }
    }

    kept
}

/// Run the incremental pass with any neighbor index, returning a mask which is `true` for each
/// point that is kept.
pub fn sparsify_incremental_mask_with<I, const D: usize>(
    points: &[Point<f64, D>],
    min_squared_dist: f64,
) -> IndexMask
where
    I: NeighborIndex<D>,
{
    let mut sparsifier = PointSparsifier::<I, D>::new(min_squared_dist);
    let mut kept = IndexMask::new(points.len(), false);
    for (i, p) in points.iter().enumerate() {
        if sparsifier.try_insert(*p) {
            kept.set(i, true);
        }
    }

    kept
}

/// Accumulates a sparse point set one candidate at a time. A candidate is accepted if the set is
/// empty or if the closest point already in the set is at least `min_squared_dist` away.
pub struct PointSparsifier<I, const D: usize> {
    points: Vec<Point<f64, D>>,
    index: I,
    min_squared_dist: f64,
}

/// A `PointSparsifier` running on a kd-tree.
pub type KdPointSparsifier<const D: usize> = PointSparsifier<KdTreeIndex<D>, D>;

impl<I, const D: usize> PointSparsifier<I, D>
where
    I: NeighborIndex<D>,
{
    pub fn new(min_squared_dist: f64) -> Self {
        Self {
            points: Vec::new(),
            index: I::from_points(&[]),
            min_squared_dist,
        }
    }

    /// Add `point` to the set if it is not too close to any point already in it. Returns whether
    /// the point was accepted.
    pub fn try_insert(&mut self, point: Point<f64, D>) -> bool {
        if let Some((_, d)) = self.index.nearest_one(&point) {
            if d < self.min_squared_dist {
                return false;
            }
        }

        self.index.insert(&point);
        self.points.push(point);
        true
    }

    pub fn min_squared_dist(&self) -> f64 {
        self.min_squared_dist
    }

    /// The accepted points, in the order they were accepted.
    pub fn points(&self) -> &[Point<f64, D>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<Point<f64, D>> {
        self.points
    }
}
