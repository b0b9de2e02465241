// src/math/voronoi/assembler.rs

use super::{
    config::VoronoiConfig, diagram::DiagramProvider, far_point::FarPointResolver,
    ridge_lookup::RidgeMatcher,
};
use crate::math::{
    error::{VoronoiError, VoronoiResult},
    types::Point2D,
};
use bevy::log::{debug, warn};
use geo::{Area, Contains, Coord, LineString, Polygon};
use rayon::prelude::*;

/// Polygon der Voronoi-Region einer Site. Implizit geschlossen (letzter Punkt verbindet
/// zum ersten), unbeschränkte Regionen sind über Fernpunkte geschlossen.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    /// Index der Site in der Eingabereihenfolge.
    pub site: usize,
    pub points: Vec<Point2D>,
    /// Anzahl der eingefügten Fernpunkte.
    pub far_points: usize,
}

impl RegionPolygon {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true`, wenn die Region ins Unendliche reicht und über Fernpunkte geschlossen wurde.
    pub fn is_unbounded(&self) -> bool {
        self.far_points > 0
    }

    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let exterior: LineString<f64> = self
            .points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        Polygon::new(exterior, vec![])
    }

    pub fn area(&self) -> f64 {
        self.to_geo_polygon().unsigned_area()
    }

    pub fn contains_point(&self, point: Point2D) -> bool {
        self.to_geo_polygon()
            .contains(&geo::Point::new(point.x, point.y))
    }
}

/// Setzt für jede Site eines 2D-Voronoi-Diagramms das Polygon ihrer Region zusammen.
///
/// Reale Eckpunkte werden direkt übernommen. Für jeden Sentinel werden die unbeschränkten
/// Ridges zu beiden zyklischen Nachbarn gesucht und deren Fernpunkte an der Stelle des
/// Sentinels eingefügt. Die zyklische Reihenfolge der Region bleibt erhalten.
pub struct VoronoiRegionAssembler<'a, D: ?Sized> {
    diagram: &'a D,
    config: VoronoiConfig,
    resolver: FarPointResolver,
    matcher: RidgeMatcher,
}

impl<'a, D> VoronoiRegionAssembler<'a, D>
where
    D: DiagramProvider + Sync + ?Sized,
{
    pub fn new(diagram: &'a D, config: VoronoiConfig) -> VoronoiResult<Self> {
        config.validate()?;
        let resolver = FarPointResolver::for_diagram(diagram, config.far_point_factor)?;
        let matcher = RidgeMatcher::new(diagram, config.ridge_lookup);
        Ok(Self {
            diagram,
            config,
            resolver,
            matcher,
        })
    }

    pub fn resolver(&self) -> &FarPointResolver {
        &self.resolver
    }

    /// Alle Polygone in Site-Reihenfolge. Bricht beim ersten Fehler (in Site-Reihenfolge)
    /// ab; es wird kein Teilergebnis geliefert.
    pub fn assemble(&self) -> VoronoiResult<Vec<RegionPolygon>> {
        let polygons = self
            .assemble_each()
            .into_iter()
            .collect::<VoronoiResult<Vec<_>>>()?;
        debug!(
            "VoronoiRegionAssembler: assembled {} polygons ({} unbounded).",
            polygons.len(),
            polygons.iter().filter(|p| p.is_unbounded()).count()
        );
        Ok(polygons)
    }

    /// Ein Ergebnis pro Site, damit Aufrufer die erfolgreichen Sites behalten können.
    pub fn assemble_each(&self) -> Vec<VoronoiResult<RegionPolygon>> {
        let num_sites = self.diagram.sites().len();
        let results: Vec<_> = if self.config.parallel {
            (0..num_sites)
                .into_par_iter()
                .map(|site| self.assemble_site(site))
                .collect()
        } else {
            (0..num_sites).map(|site| self.assemble_site(site)).collect()
        };

        for (site, result) in results.iter().enumerate() {
            if let Err(e) = result {
                warn!("VoronoiRegionAssembler: site {} failed: {}", site, e);
            }
        }
        results
    }

    /// Polygon der Site `site` (Index in der Eingabereihenfolge, nicht in `regions`).
    pub fn assemble_site(&self, site: usize) -> VoronoiResult<RegionPolygon> {
        let region = self.diagram.region_of(site)?;
        let len = region.len();
        let mut points = Vec::with_capacity(len + 2);
        let mut far_points = 0;

        for (idx, vertex) in region.iter().enumerate() {
            if let Some(vertex) = vertex {
                points.push(self.diagram.vertex(*vertex)?);
                continue;
            }

            let last = region[(idx + len - 1) % len];
            let next = region[(idx + 1) % len];
            let mut ridges = self.matcher.find(self.diagram, site, None, last);
            for ridge in self.matcher.find(self.diagram, site, None, next) {
                if !ridges.contains(&ridge) {
                    ridges.push(ridge);
                }
            }

            if ridges.is_empty() {
                return Err(VoronoiError::RidgeNotFound {
                    site,
                    searched: [(None, last), (None, next)],
                });
            }
            if ridges.len() > 2 {
                debug!(
                    "VoronoiRegionAssembler: sentinel of site {} matches {} ridges {:?}.",
                    site,
                    ridges.len(),
                    ridges
                );
            }

            for ridge in ridges {
                let [_, far] = self.resolver.resolve(self.diagram, ridge)?;
                if self.config.dedup_far_points && points.last() == Some(&far) {
                    continue;
                }
                points.push(far);
                far_points += 1;
            }
        }

        Ok(RegionPolygon {
            site,
            points,
            far_points,
        })
    }
}

/// Polygone aller Regionen eines 2D-Diagramms, ein Polygon pro Site in Eingabereihenfolge.
pub fn voronoi_region_polygons<D>(
    diagram: &D,
    config: &VoronoiConfig,
) -> VoronoiResult<Vec<RegionPolygon>>
where
    D: DiagramProvider + Sync + ?Sized,
{
    VoronoiRegionAssembler::new(diagram, config.clone())?.assemble()
}
