// src/lib.rs

//! Polygone für Voronoi-Regionen aus einem Diagramm im qhull-Layout, plus Hilfsmittel für
//! Punktdateien und sphärische Ridges.

pub mod io;
pub mod math;

pub use io::PointSet;
pub use math::prelude;
