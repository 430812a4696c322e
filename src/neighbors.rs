//! Nearest neighbor indices over a collection of points. The sparsifier only needs a small
//! interface from an index: it is built once over a point collection, may grow by one point at a
//! time, and can answer an incremental query which yields indexed points one by one in order of
//! increasing squared distance from a query point.

mod kd_tree;
mod linear;

use crate::na::Point;

pub use kd_tree::KdTreeIndex;
pub use linear::LinearIndex;

/// A nearest neighbor index over points in `D` dimensional space. Points are referred to by the
/// position at which they were added to the index, starting from zero.
pub trait NeighborIndex<const D: usize> {
    /// Build the index over an entire collection of points, in which the point at `points[i]`
    /// receives the index `i`. The collection may be empty.
    fn from_points(points: &[Point<f64, D>]) -> Self;

    /// The number of points which have been indexed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a single point to the index, returning the index it was assigned.
    fn insert(&mut self, point: &Point<f64, D>) -> usize;

    /// Find the single closest indexed point to `query`, returning its index and squared
    /// distance, or `None` if the index is empty.
    fn nearest_one(&self, query: &Point<f64, D>) -> Option<(usize, f64)>;

    /// Lazily yield `(index, squared_distance)` for every indexed point exactly once, in
    /// non-decreasing order of squared distance from `query`. Consumers can stop as soon as they
    /// reach a distance they are not interested in.
    fn incremental(&self, query: &Point<f64, D>) -> impl Iterator<Item = (usize, f64)>;
}
