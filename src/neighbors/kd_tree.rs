use super::NeighborIndex;
use crate::common::points::to_coords;
use crate::na::Point;
use itertools::Itertools;
use kiddo::{ImmutableKdTree, SquaredEuclidean};
use std::collections::HashSet;
use std::num::NonZero;

/// The size of the first batch requested from the tree by an incremental query. Each following
/// batch doubles in size.
const FIRST_BATCH: usize = 8;

/// The smallest number of inserted points that are kept outside of the tree before it is rebuilt.
const MIN_PENDING: usize = 32;

/// A neighbor index backed by a `kiddo` immutable kd-tree. Queries are exact.
///
/// The immutable tree copes with large numbers of points sharing a coordinate (planar or
/// collinear sets), but can't grow. Points added with `insert` are held in a short pending list
/// which is searched linearly, and the tree is rebuilt over everything once that list grows past
/// roughly the square root of the total point count.
pub struct KdTreeIndex<const D: usize> {
    coords: Vec<[f64; D]>,
    tree: Option<ImmutableKdTree<f64, D>>,
    built: usize,
}

impl<const D: usize> KdTreeIndex<D> {
    fn rebuild(&mut self) {
        self.tree = if self.coords.is_empty() {
            None
        } else {
            Some(ImmutableKdTree::new_from_slice(&self.coords))
        };
        self.built = self.coords.len();
    }

    fn pending(&self) -> impl Iterator<Item = (usize, &[f64; D])> {
        self.coords.iter().enumerate().skip(self.built)
    }

    fn pending_limit(&self) -> usize {
        ((self.coords.len() as f64).sqrt() as usize).max(MIN_PENDING)
    }
}

fn coords_dist_squared<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl<const D: usize> NeighborIndex<D> for KdTreeIndex<D> {
    fn from_points(points: &[Point<f64, D>]) -> Self {
        let mut index = Self {
            coords: points.iter().map(to_coords).collect(),
            tree: None,
            built: 0,
        };
        index.rebuild();
        index
    }

    fn len(&self) -> usize {
        self.coords.len()
    }

    fn insert(&mut self, point: &Point<f64, D>) -> usize {
        let index = self.coords.len();
        self.coords.push(to_coords(point));
        if self.coords.len() - self.built > self.pending_limit() {
            self.rebuild();
        }
        index
    }

    fn nearest_one(&self, query: &Point<f64, D>) -> Option<(usize, f64)> {
        let q = to_coords(query);
        let from_tree = self.tree.as_ref().map(|tree| {
            let nn = tree.nearest_one::<SquaredEuclidean>(&q);
            (nn.item as usize, nn.distance)
        });

        self.pending()
            .map(|(i, c)| (i, coords_dist_squared(c, &q)))
            .chain(from_tree)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn incremental(&self, query: &Point<f64, D>) -> impl Iterator<Item = (usize, f64)> {
        let q = to_coords(query);
        let pending = self
            .pending()
            .map(|(i, c)| (i, coords_dist_squared(c, &q)))
            .sorted_by(|a, b| a.1.total_cmp(&b.1));

        let from_tree = IncrementalNeighbors {
            tree: self.tree.as_ref(),
            total: self.built,
            query: q,
            batch: Vec::new().into_iter(),
            requested: 0,
            yielded: HashSet::new(),
        };

        from_tree.merge_by(pending, |a, b| a.1 <= b.1)
    }
}

/// Incremental nearest neighbor traversal on top of the tree's k-nearest query. Each time the
/// current batch runs out, a batch twice as large is requested and the entries that were already
/// yielded are skipped. Every batch is a valid k-nearest set, so nothing outside of the yielded
/// entries can be closer than what has been yielded so far.
struct IncrementalNeighbors<'a, const D: usize> {
    tree: Option<&'a ImmutableKdTree<f64, D>>,
    total: usize,
    query: [f64; D],
    batch: std::vec::IntoIter<(usize, f64)>,
    requested: usize,
    yielded: HashSet<usize>,
}

impl<const D: usize> IncrementalNeighbors<'_, D> {
    /// Request the next, larger batch from the tree. Returns false once the previous batch
    /// already covered every point in the tree.
    fn fetch(&mut self) -> bool {
        let Some(tree) = self.tree else {
            return false;
        };
        if self.requested >= self.total {
            return false;
        }

        let qty = (self.requested * 2).max(FIRST_BATCH).min(self.total);
        let Some(qty_nz) = NonZero::new(qty) else {
            return false;
        };

        let found = tree.nearest_n::<SquaredEuclidean>(&self.query, qty_nz);
        self.requested = qty;
        self.batch = found
            .into_iter()
            .map(|nn| (nn.item as usize, nn.distance))
            .collect::<Vec<_>>()
            .into_iter();
        true
    }
}

impl<const D: usize> Iterator for IncrementalNeighbors<'_, D> {
    type Item = (usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for (i, d) in self.batch.by_ref() {
                if self.yielded.insert(i) {
                    return Some((i, d));
                }
            }

            if !self.fetch() {
                return None;
            }
        }
    }
}
