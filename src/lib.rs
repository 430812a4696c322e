//! Point set sparsification in arbitrary fixed dimension, along with the neighbor indices it runs
//! on, synthetic point cloud generators, and a plain text point file format.

use std::error::Error;

pub mod common;
pub mod errors;
pub mod generate;
pub mod io;
pub mod neighbors;
pub mod sparsify;

pub use parry3d_f64::na;

pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub type PointD<const D: usize> = na::Point<f64, D>;
pub type Point2 = PointD<2>;
pub type Point3 = PointD<3>;
pub type Point4 = PointD<4>;
pub type Point5 = PointD<5>;

pub use common::IndexMask;
pub use errors::SamplingError;
pub use neighbors::{KdTreeIndex, LinearIndex, NeighborIndex};
pub use sparsify::{
    KdPointSparsifier, PointSparsifier, SparsifyOptions, SparsifyPolicy,
    sparsify_incremental_mask_with, sparsify_indices, sparsify_mask_with, sparsify_point_set,
    sparsify_with_options,
};
