use super::NeighborIndex;
use crate::common::points::dist_squared;
use crate::na::Point;
use itertools::Itertools;

/// A brute force neighbor index which measures the distance to every point on each query. It is
/// exact and has no construction cost, which makes it a reference to check other indices
/// against and a reasonable choice for very small point sets.
#[derive(Debug, Clone, Default)]
pub struct LinearIndex<const D: usize> {
    points: Vec<Point<f64, D>>,
}

impl<const D: usize> NeighborIndex<D> for LinearIndex<D> {
    fn from_points(points: &[Point<f64, D>]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn insert(&mut self, point: &Point<f64, D>) -> usize {
        self.points.push(*point);
        self.points.len() - 1
    }

    fn nearest_one(&self, query: &Point<f64, D>) -> Option<(usize, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, dist_squared(p, query)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn incremental(&self, query: &Point<f64, D>) -> impl Iterator<Item = (usize, f64)> {
        // The sort is stable, so equally distant points come out in index order
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, dist_squared(p, query)))
            .sorted_by(|a, b| a.1.total_cmp(&b.1))
    }
}
