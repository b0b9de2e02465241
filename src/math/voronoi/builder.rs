// src/math/voronoi/builder.rs

use super::{config::VoronoiConfig, diagram::VoronoiDiagram};
use crate::io::point_file::PointSet;
use crate::math::{
    error::{VertexRef, VoronoiError, VoronoiResult},
    types::{Point2D, SpadePoint, bevy_to_spade_points, spade_to_bevy},
};
use bevy::log::{debug, info};
use spade::{
    DelaunayTriangulation, Triangulation,
    handles::{FixedFaceHandle, FixedVertexHandle, InnerTag},
};
use std::collections::HashMap;

/// Erzeugt ein [`VoronoiDiagram`] im qhull-Layout aus der Delaunay-Triangulation von Spade.
///
/// Eckpunkte sind die Umkreismittelpunkte der inneren Dreiecke, Ridges die dualen
/// Delaunay-Kanten. Das äußere Face wird zum Sentinel. Das Ergebnis ist immer ein
/// Nearest-Site-Diagramm.
pub struct SpadeDiagramBuilder {
    config: VoronoiConfig,
}

impl SpadeDiagramBuilder {
    pub fn new(config: VoronoiConfig) -> VoronoiResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Baut das Diagramm aus einer Punktmenge; sie muss zweidimensional sein.
    pub fn build_from_point_set(&self, points: &PointSet) -> VoronoiResult<VoronoiDiagram> {
        self.build(&points.to_points_2d()?)
    }

    pub fn build(&self, sites: &[Point2D]) -> VoronoiResult<VoronoiDiagram> {
        let triangulation = triangulate(sites)?;

        // Site-Index pro Triangulations-Vertex.
        let mut site_of_vertex: HashMap<FixedVertexHandle, usize> =
            HashMap::with_capacity(sites.len());
        for (site, point) in sites.iter().enumerate() {
            let handle = triangulation
                .locate_vertex(SpadePoint::new(point.x, point.y))
                .ok_or_else(|| VoronoiError::DegenerateInput {
                    reason: format!("site {} was not found in the triangulation", site),
                })?;
            site_of_vertex.insert(handle.fix(), site);
        }

        let (vertices, vertex_of_face) = self.merge_circumcenters(&triangulation);
        let face_vertex = |face: Option<FixedFaceHandle<InnerTag>>| -> VertexRef {
            face.and_then(|inner| vertex_of_face.get(&inner).copied())
        };

        let mut ridge_points = Vec::with_capacity(triangulation.num_undirected_edges());
        let mut ridge_vertices = Vec::with_capacity(triangulation.num_undirected_edges());
        let mut dropped_ridges = 0;
        for edge in triangulation.undirected_edges() {
            let [from, to] = edge.vertices();
            let directed = edge.as_directed();
            let left = face_vertex(directed.face().as_inner().map(|f| f.fix()));
            let right = face_vertex(directed.rev().face().as_inner().map(|f| f.fix()));
            if left.is_some() && left == right {
                dropped_ridges += 1;
                continue;
            }
            ridge_points.push([site_of_vertex[&from.fix()], site_of_vertex[&to.fix()]]);
            ridge_vertices.push([left, right]);
        }

        let mut regions = Vec::with_capacity(triangulation.num_vertices());
        let mut point_region = vec![0; sites.len()];
        for vertex in triangulation.vertices() {
            let region: Vec<VertexRef> = vertex
                .out_edges()
                .map(|edge| face_vertex(edge.face().as_inner().map(|f| f.fix())))
                .collect();
            point_region[site_of_vertex[&vertex.fix()]] = regions.len();
            regions.push(collapse_cyclic_repeats(region));
        }

        info!(
            "SpadeDiagramBuilder: {} sites, {} Voronoi vertices, {} ridges ({} zero-length ridges dropped).",
            sites.len(),
            vertices.len(),
            ridge_points.len(),
            dropped_ridges
        );

        VoronoiDiagram::new(
            sites.to_vec(),
            vertices,
            ridge_points,
            ridge_vertices,
            point_region,
            regions,
            false,
        )
    }

    /// Umkreismittelpunkte der inneren Faces; Mittelpunkte innerhalb der Toleranz werden zu
    /// einem Eckpunkt zusammengefasst (kozirkuläre Sites ergeben so einen einzigen Eckpunkt).
    fn merge_circumcenters(
        &self,
        triangulation: &DelaunayTriangulation<SpadePoint>,
    ) -> (Vec<Point2D>, HashMap<FixedFaceHandle<InnerTag>, usize>) {
        let tolerance = self.config.vertex_merge_tolerance;
        let mut vertices: Vec<Point2D> = Vec::with_capacity(triangulation.num_inner_faces());
        let mut vertex_of_face = HashMap::with_capacity(triangulation.num_inner_faces());

        // Raster mit Zellgröße `tolerance`; Kandidaten liegen in den Nachbarzellen.
        // Sehr ferne Mittelpunkte (flache Dreiecke) landen in den gesättigten Randzellen.
        let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        let cell_of = |p: Point2D| -> (i64, i64) {
            if tolerance > 0.0 {
                ((p.x / tolerance).floor() as i64, (p.y / tolerance).floor() as i64)
            } else {
                (0, 0)
            }
        };

        for face in triangulation.inner_faces() {
            let center = spade_to_bevy(face.circumcenter());
            let (cx, cy) = cell_of(center);
            let existing = (cx.saturating_sub(1)..=cx.saturating_add(1))
                .flat_map(|x| (cy.saturating_sub(1)..=cy.saturating_add(1)).map(move |y| (x, y)))
                .filter_map(|cell| grid.get(&cell))
                .flatten()
                .copied()
                .find(|&idx| vertices[idx].distance(center) <= tolerance);

            let index = match existing {
                Some(idx) => idx,
                None => {
                    vertices.push(center);
                    grid.entry((cx, cy)).or_default().push(vertices.len() - 1);
                    vertices.len() - 1
                }
            };
            vertex_of_face.insert(face.fix(), index);
        }

        if vertices.len() < triangulation.num_inner_faces() {
            debug!(
                "SpadeDiagramBuilder: merged {} circumcenters into {} vertices.",
                triangulation.num_inner_faces(),
                vertices.len()
            );
        }
        (vertices, vertex_of_face)
    }
}

/// Delaunay-Kanten der Sites als Segmente, in Spade-Reihenfolge.
pub fn delaunay_segments(sites: &[Point2D]) -> VoronoiResult<Vec<[Point2D; 2]>> {
    let triangulation = triangulate(sites)?;
    Ok(triangulation
        .undirected_edges()
        .map(|edge| edge.positions().map(spade_to_bevy))
        .collect())
}

/// Kanten der konvexen Hülle, als geschlossener Kantenzug.
pub fn convex_hull_segments(sites: &[Point2D]) -> VoronoiResult<Vec<[Point2D; 2]>> {
    let triangulation = triangulate(sites)?;
    Ok(triangulation
        .convex_hull()
        .map(|edge| edge.positions().map(spade_to_bevy))
        .collect())
}

/// Delaunay-Triangulation mit mindestens einem inneren Dreieck und einem Vertex pro Site.
fn triangulate(sites: &[Point2D]) -> VoronoiResult<DelaunayTriangulation<SpadePoint>> {
    if sites.len() < 3 {
        return Err(VoronoiError::DegenerateInput {
            reason: format!("need at least 3 sites, got {}", sites.len()),
        });
    }

    let triangulation =
        DelaunayTriangulation::<SpadePoint>::bulk_load_stable(bevy_to_spade_points(sites))
            .map_err(|e| VoronoiError::DegenerateInput {
                reason: format!("spade rejected the sites: {:?}", e),
            })?;

    if triangulation.num_vertices() != sites.len() {
        return Err(VoronoiError::DegenerateInput {
            reason: format!(
                "{} sites collapsed to {} distinct triangulation vertices",
                sites.len(),
                triangulation.num_vertices()
            ),
        });
    }
    if triangulation.num_inner_faces() == 0 {
        return Err(VoronoiError::DegenerateInput {
            reason: format!("all {} sites are collinear", sites.len()),
        });
    }
    Ok(triangulation)
}

/// Entfernt zyklisch aufeinanderfolgende Wiederholungen, z.B. `[0, 0, None, 0]` -> `[0, None]`.
fn collapse_cyclic_repeats(region: Vec<VertexRef>) -> Vec<VertexRef> {
    let mut collapsed: Vec<VertexRef> = Vec::with_capacity(region.len());
    for vertex in region {
        if collapsed.last() != Some(&vertex) {
            collapsed.push(vertex);
        }
    }
    while collapsed.len() > 1 && collapsed.first() == collapsed.last() {
        collapsed.pop();
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::voronoi::{
        assembler::voronoi_region_polygons, config::RidgeLookup, diagram::DiagramProvider,
    };
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn random_sites(seed: u64, count: usize) -> Vec<Point2D> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| Point2D::new(rng.random_range(-5.0..5.0), rng.random_range(-2.0..2.0)))
            .collect()
    }

    fn builder() -> SpadeDiagramBuilder {
        SpadeDiagramBuilder::new(VoronoiConfig::default()).unwrap()
    }

    #[test]
    fn test_collapse_cyclic_repeats() {
        assert_eq!(
            collapse_cyclic_repeats(vec![Some(0), Some(0), None, Some(0)]),
            vec![Some(0), None]
        );
        assert_eq!(
            collapse_cyclic_repeats(vec![Some(1), Some(2), Some(3)]),
            vec![Some(1), Some(2), Some(3)]
        );
        assert_eq!(collapse_cyclic_repeats(vec![Some(4), Some(4)]), vec![Some(4)]);
        assert!(collapse_cyclic_repeats(vec![]).is_empty());
    }

    #[test]
    fn test_unit_square_merges_cocircular_vertices() {
        let sites = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ];
        let diagram = builder().build(&sites).unwrap();
        assert_eq!(diagram.vertices().len(), 1);
        assert_relative_eq!(diagram.vertices()[0].x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(diagram.vertices()[0].y, 0.5, epsilon = 1e-12);
        assert_eq!(diagram.num_ridges(), 4);
        for site in 0..sites.len() {
            assert!(diagram.region_of(site).unwrap().contains(&None));
        }

        let polygons = voronoi_region_polygons(&diagram, &VoronoiConfig::default()).unwrap();
        assert_eq!(polygons.len(), 4);
        for (site, polygon) in polygons.iter().enumerate() {
            assert_eq!(polygon.len(), 3);
            assert_eq!(polygon.far_points, 2);
            assert!(polygon.contains_point(sites[site]));
            // Fernpunkte liegen auf den Mittelsenkrechten, 2 Einheiten vom Eckpunkt entfernt.
            for p in polygon.points.iter().filter(|p| p.distance(Point2D::splat(0.5)) > 1e-9) {
                assert_relative_eq!(p.distance(Point2D::splat(0.5)), 2.0, epsilon = 1e-9);
                assert!((p.x - 0.5).abs() < 1e-9 || (p.y - 0.5).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_collinear_sites_fail() {
        let sites = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(2.0, 2.0),
        ];
        assert!(matches!(
            builder().build(&sites),
            Err(VoronoiError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_too_few_or_duplicate_sites_fail() {
        assert!(matches!(
            builder().build(&[Point2D::ZERO, Point2D::ONE]),
            Err(VoronoiError::DegenerateInput { .. })
        ));
        let duplicated = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(1.0, 0.0),
        ];
        assert!(matches!(
            builder().build(&duplicated),
            Err(VoronoiError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_dimension() {
        let points = PointSet::new(3, vec![vec![0.0, 0.0, 1.0]; 4]).unwrap();
        assert_eq!(
            builder().build_from_point_set(&points),
            Err(VoronoiError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_random_cloud_regions() {
        let sites = random_sites(7, 60);
        let diagram = builder().build(&sites).unwrap();
        let polygons = voronoi_region_polygons(&diagram, &VoronoiConfig::default()).unwrap();
        assert_eq!(polygons.len(), sites.len());

        for polygon in &polygons {
            let region = diagram.region_of(polygon.site).unwrap();
            let sentinels = region.iter().filter(|v| v.is_none()).count();
            if sentinels == 0 {
                // Beschränkte Region: exakt die Eckpunkte in Regionsreihenfolge.
                let expected: Vec<_> = region
                    .iter()
                    .map(|v| diagram.vertices()[v.unwrap()])
                    .collect();
                assert_eq!(polygon.points, expected);
                assert!(!polygon.is_unbounded());
                assert!(
                    polygon.contains_point(sites[polygon.site]),
                    "site {} not inside its region {:?}",
                    polygon.site,
                    polygon.points
                );
            } else {
                // Hüllen-Site: ein Sentinel zwischen zwei unbeschränkten Ridges.
                assert_eq!(sentinels, 1);
                assert_eq!(polygon.far_points, 2);
                assert_eq!(polygon.len(), region.len() + 1);
                assert!(
                    polygon.contains_point(sites[polygon.site]),
                    "hull site {} not inside its region {:?}",
                    polygon.site,
                    polygon.points
                );
            }
        }
    }

    #[test]
    fn test_regions_tile_bounded_area() {
        // Die beschränkten Zellen eines gescherten Gitters haben alle dieselbe Fläche.
        let mut sites = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                sites.push(Point2D::new(i as f64 + 0.25 * j as f64, j as f64));
            }
        }
        let diagram = builder().build(&sites).unwrap();
        let polygons = voronoi_region_polygons(&diagram, &VoronoiConfig::default()).unwrap();
        let bounded: Vec<_> = polygons.iter().filter(|p| !p.is_unbounded()).collect();
        assert_eq!(bounded.len(), 9);
        for polygon in bounded {
            assert_relative_eq!(polygon.area(), 1.0, epsilon = 0.05);
        }
    }

    #[test]
    fn test_far_circumcenters_do_not_overflow_the_grid() {
        // Große Koordinaten: der einzige Eckpunkt liegt bei (1e10, 1e10).
        let large = builder()
            .build(&[
                Point2D::new(0.0, 0.0),
                Point2D::new(2e10, 0.0),
                Point2D::new(0.0, 2e10),
            ])
            .unwrap();
        assert_eq!(large.vertices().len(), 1);
        assert_relative_eq!(large.vertices()[0].x, 1e10, max_relative = 1e-12);
        assert_relative_eq!(large.vertices()[0].y, 1e10, max_relative = 1e-12);

        // Fast flaches Dreieck: Umkreismittelpunkt weit unterhalb der Sites.
        let flat = builder()
            .build(&[
                Point2D::new(0.0, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(0.5, 1e-11),
            ])
            .unwrap();
        assert_eq!(flat.vertices().len(), 1);
        assert!(flat.vertices()[0].y < -1e9);
        assert_eq!(flat.num_ridges(), 3);

        for diagram in [&large, &flat] {
            let polygons = voronoi_region_polygons(diagram, &VoronoiConfig::default()).unwrap();
            assert_eq!(polygons.len(), 3);
            assert!(polygons.iter().all(|p| p.far_points == 2));
        }
    }

    #[test]
    fn test_far_circumcenter_next_to_near_ones() {
        // Innerer Punkt knapp über der Grundkante: das flache Dreieck hat seinen
        // Umkreismittelpunkt bei (1, -5e10), die beiden anderen liegen nahe.
        let sites = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(1.0, 1e-11),
            Point2D::new(1.0, 1.0),
        ];
        let diagram = builder().build(&sites).unwrap();
        let vertices = diagram.vertices();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices.iter().filter(|v| v.y < -1e9).count(), 1);
        for (i, a) in vertices.iter().enumerate() {
            for b in &vertices[i + 1..] {
                assert!(a.distance(*b) > 1e-9);
            }
        }

        // Der innere Punkt hat eine beschränkte Region.
        let polygons = voronoi_region_polygons(&diagram, &VoronoiConfig::default()).unwrap();
        assert!(!polygons[2].is_unbounded());
        assert_eq!(polygons[2].len(), 3);
    }

    #[test]
    fn test_delaunay_and_hull_segments() {
        let sites = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(2.0, 0.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
            Point2D::new(1.0, 1.2),
        ];
        let edges = delaunay_segments(&sites).unwrap();
        // 4 Hüllenkanten plus 4 Speichen zum inneren Punkt.
        assert_eq!(edges.len(), 8);
        let to_center = edges
            .iter()
            .filter(|[a, b]| *a == sites[4] || *b == sites[4])
            .count();
        assert_eq!(to_center, 4);

        let hull = convex_hull_segments(&sites).unwrap();
        assert_eq!(hull.len(), 4);
        for [a, b] in &hull {
            assert!(*a != sites[4] && *b != sites[4]);
            assert_relative_eq!(a.distance(*b), 2.0);
        }
        // Geschlossener Kantenzug: jedes Ende ist Anfang der nächsten Kante.
        for (idx, [_, end]) in hull.iter().enumerate() {
            assert_eq!(*end, hull[(idx + 1) % hull.len()][0]);
        }

        assert!(matches!(
            convex_hull_segments(&sites[..2]),
            Err(VoronoiError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_variants_agree_on_random_cloud() {
        let sites = random_sites(42, 200);
        let diagram = builder().build(&sites).unwrap();
        let reference = voronoi_region_polygons(&diagram, &VoronoiConfig::default()).unwrap();

        let scanned = voronoi_region_polygons(
            &diagram,
            &VoronoiConfig::new().with_ridge_lookup(RidgeLookup::Scan),
        )
        .unwrap();
        let parallel =
            voronoi_region_polygons(&diagram, &VoronoiConfig::new().with_parallel(true)).unwrap();
        assert_eq!(reference, scanned);
        assert_eq!(reference, parallel);
    }

    #[test]
    fn test_scaling_sites_scales_far_points() {
        let sites = random_sites(3, 30);
        let doubled: Vec<_> = sites.iter().map(|p| *p * 2.0).collect();
        let config = VoronoiConfig::default();

        let a = voronoi_region_polygons(&builder().build(&sites).unwrap(), &config).unwrap();
        let b = voronoi_region_polygons(&builder().build(&doubled).unwrap(), &config).unwrap();
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.len(), pb.len());
            for (qa, qb) in pa.points.iter().zip(&pb.points) {
                assert_relative_eq!(qa.x * 2.0, qb.x, epsilon = 1e-6);
                assert_relative_eq!(qa.y * 2.0, qb.y, epsilon = 1e-6);
            }
        }
    }
}
