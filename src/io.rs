//! This module has I/O functionality for point sets

mod text_points;

pub use text_points::{load_points_from_file, read_points, write_points, write_points_to_file};
