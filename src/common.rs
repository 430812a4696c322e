mod index_mask;
pub mod points;

pub use index_mask::IndexMask;
