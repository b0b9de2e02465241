// src/io/mod.rs
pub mod point_file;

pub use point_file::{PointSet, read_point_file, read_point_set, write_point_file, write_point_set};
