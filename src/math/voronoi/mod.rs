// src/math/voronoi/mod.rs

//! Zusammensetzen von Voronoi-Regionen zu Polygonen.
//!
//! Eingabe ist ein fertig berechnetes Diagramm im qhull-Layout (siehe [`DiagramProvider`]),
//! Ausgabe ist pro Site ein geschlossenes Polygon. Unbeschränkte Regionen werden über
//! Fernpunkte auf den unendlichen Ridges geschlossen.

pub mod assembler;
pub mod builder;
pub mod config;
pub mod diagram;
pub mod far_point;
pub mod ridge_lookup;
pub mod segments;

pub use assembler::{RegionPolygon, VoronoiRegionAssembler, voronoi_region_polygons};
pub use builder::{SpadeDiagramBuilder, convex_hull_segments, delaunay_segments};
pub use config::{RidgeLookup, VoronoiConfig};
pub use diagram::{DiagramProvider, VoronoiDiagram};
pub use far_point::FarPointResolver;
pub use ridge_lookup::{RidgeIndex, RidgeMatcher, pair_key};
pub use segments::{RidgeSegments, diagram_display_bounds, display_bounds, ridge_segments};
