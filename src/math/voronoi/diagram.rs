// src/math/voronoi/diagram.rs

use crate::math::{
    error::{VertexRef, VoronoiError, VoronoiResult},
    types::Point2D,
};

/// Schnittstelle zu einer externen Voronoi-Engine im qhull-Layout.
///
/// Ridges und Regionen referenzieren Eckpunkte über [`VertexRef`]; `None` markiert ein
/// unbeschränktes Ende. `point_region` bildet den Site-Index auf den Index in `regions` ab
/// und ist im Allgemeinen keine Identität.
pub trait DiagramProvider {
    fn sites(&self) -> &[Point2D];
    fn vertices(&self) -> &[Point2D];
    /// Paare benachbarter Sites, parallel zu [`DiagramProvider::ridge_vertices`].
    fn ridge_points(&self) -> &[[usize; 2]];
    fn ridge_vertices(&self) -> &[[VertexRef; 2]];
    fn point_region(&self) -> &[usize];
    fn regions(&self) -> &[Vec<VertexRef>];
    fn furthest_site(&self) -> bool;

    fn site(&self, index: usize) -> VoronoiResult<Point2D> {
        self.sites()
            .get(index)
            .copied()
            .ok_or(VoronoiError::InvalidIndex {
                kind: "site",
                index,
                len: self.sites().len(),
            })
    }

    fn vertex(&self, index: usize) -> VoronoiResult<Point2D> {
        self.vertices()
            .get(index)
            .copied()
            .ok_or(VoronoiError::InvalidIndex {
                kind: "vertex",
                index,
                len: self.vertices().len(),
            })
    }

    /// Region der Site `site`, aufgelöst über `point_region`.
    fn region_of(&self, site: usize) -> VoronoiResult<&[VertexRef]> {
        let region_index =
            *self
                .point_region()
                .get(site)
                .ok_or(VoronoiError::InvalidIndex {
                    kind: "site",
                    index: site,
                    len: self.point_region().len(),
                })?;
        self.regions()
            .get(region_index)
            .map(Vec::as_slice)
            .ok_or(VoronoiError::InvalidIndex {
                kind: "region",
                index: region_index,
                len: self.regions().len(),
            })
    }
}

/// Ein 2D-Voronoi-Diagramm als reine Daten, wie es eine externe Engine liefert.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiDiagram {
    sites: Vec<Point2D>,
    vertices: Vec<Point2D>,
    ridge_points: Vec<[usize; 2]>,
    ridge_vertices: Vec<[VertexRef; 2]>,
    point_region: Vec<usize>,
    regions: Vec<Vec<VertexRef>>,
    furthest_site: bool,
}

impl VoronoiDiagram {
    /// Erstellt ein Diagramm und prüft Längen und Indexbereiche aller Arrays.
    pub fn new(
        sites: Vec<Point2D>,
        vertices: Vec<Point2D>,
        ridge_points: Vec<[usize; 2]>,
        ridge_vertices: Vec<[VertexRef; 2]>,
        point_region: Vec<usize>,
        regions: Vec<Vec<VertexRef>>,
        furthest_site: bool,
    ) -> VoronoiResult<Self> {
        let diagram = Self {
            sites,
            vertices,
            ridge_points,
            ridge_vertices,
            point_region,
            regions,
            furthest_site,
        };
        diagram.validate()?;
        Ok(diagram)
    }

    /// Wie [`VoronoiDiagram::new`], aber mit qhull-Indizes: jeder negative Eckpunktindex
    /// ist der Sentinel für "unendlich".
    pub fn from_qhull_indices(
        sites: Vec<Point2D>,
        vertices: Vec<Point2D>,
        ridge_points: Vec<[usize; 2]>,
        ridge_vertices: Vec<[i64; 2]>,
        point_region: Vec<usize>,
        regions: Vec<Vec<i64>>,
        furthest_site: bool,
    ) -> VoronoiResult<Self> {
        let ridge_vertices = ridge_vertices
            .into_iter()
            .map(|[a, b]| [qhull_vertex(a), qhull_vertex(b)])
            .collect();
        let regions = regions
            .into_iter()
            .map(|region| region.into_iter().map(qhull_vertex).collect())
            .collect();
        Self::new(
            sites,
            vertices,
            ridge_points,
            ridge_vertices,
            point_region,
            regions,
            furthest_site,
        )
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn num_ridges(&self) -> usize {
        self.ridge_points.len()
    }

    fn validate(&self) -> VoronoiResult<()> {
        if self.ridge_points.len() != self.ridge_vertices.len() {
            return Err(VoronoiError::InconsistentDiagram {
                message: format!(
                    "{} ridge site pairs but {} ridge vertex pairs",
                    self.ridge_points.len(),
                    self.ridge_vertices.len()
                ),
            });
        }
        if self.point_region.len() != self.sites.len() {
            return Err(VoronoiError::InconsistentDiagram {
                message: format!(
                    "point_region has {} entries for {} sites",
                    self.point_region.len(),
                    self.sites.len()
                ),
            });
        }

        let num_sites = self.sites.len();
        for &site in self.ridge_points.iter().flatten() {
            check_index("site", site, num_sites)?;
        }

        let num_vertices = self.vertices.len();
        let referenced_vertices = self
            .ridge_vertices
            .iter()
            .flatten()
            .chain(self.regions.iter().flatten());
        for vertex in referenced_vertices.flatten() {
            check_index("vertex", *vertex, num_vertices)?;
        }

        for &region in &self.point_region {
            check_index("region", region, self.regions.len())?;
        }
        Ok(())
    }
}

impl DiagramProvider for VoronoiDiagram {
    fn sites(&self) -> &[Point2D] {
        &self.sites
    }

    fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    fn ridge_points(&self) -> &[[usize; 2]] {
        &self.ridge_points
    }

    fn ridge_vertices(&self) -> &[[VertexRef; 2]] {
        &self.ridge_vertices
    }

    fn point_region(&self) -> &[usize] {
        &self.point_region
    }

    fn regions(&self) -> &[Vec<VertexRef>] {
        &self.regions
    }

    fn furthest_site(&self) -> bool {
        self.furthest_site
    }
}

fn qhull_vertex(index: i64) -> VertexRef {
    usize::try_from(index).ok()
}

fn check_index(kind: &'static str, index: usize, len: usize) -> VoronoiResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(VoronoiError::InvalidIndex { kind, index, len })
    }
}
