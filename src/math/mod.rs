// src/math/mod.rs
pub mod error;
pub mod sphere;
pub mod types;
pub mod utils;
pub mod voronoi;

// Re-exports für einfache Verwendung
pub use error::{PointFileError, PointFileResult, VertexRef, VoronoiError, VoronoiResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        error::{VertexRef, VoronoiError, VoronoiResult},
        sphere::SphericalArcs,
        types::*,
        voronoi::{
            DiagramProvider, RegionPolygon, RidgeLookup, SpadeDiagramBuilder, VoronoiConfig,
            VoronoiDiagram, VoronoiRegionAssembler, ridge_segments, voronoi_region_polygons,
        },
    };
}
