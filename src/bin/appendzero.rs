// src/bin/appendzero.rs

//! Liest eine Punktdatei von stdin, hängt den Ursprung an und schreibt sie nach stdout.

use std::io::{self, BufWriter};
use voronoi_regions::io::{read_point_set, write_point_set};
use voronoi_regions::math::PointFileError;

fn main() -> Result<(), PointFileError> {
    let mut points = read_point_set(io::stdin().lock())?;
    points.append_origin();
    write_point_set(BufWriter::new(io::stdout().lock()), &points)
}
