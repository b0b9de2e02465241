// src/math/voronoi/far_point.rs

use super::diagram::DiagramProvider;
use crate::math::{
    error::{VoronoiError, VoronoiResult},
    types::{Bounds2D, Point2D},
    utils::{constants, stats},
};

/// Berechnet für unbeschränkte Ridges einen synthetischen Fernpunkt auf dem nach außen
/// zeigenden Strahl.
///
/// Die Richtung ist die Normale der Verbindung der beiden Sites, orientiert weg vom
/// Schwerpunkt aller Sites (bei Furthest-Site-Diagrammen umgekehrt). Der Fernpunkt liegt
/// `factor * max(ptp)` vom endlichen Eckpunkt entfernt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FarPointResolver {
    center: Point2D,
    far_distance: f64,
    furthest_site: bool,
}

impl FarPointResolver {
    pub fn new(center: Point2D, ptp: Point2D, factor: f64, furthest_site: bool) -> Self {
        Self {
            center,
            far_distance: factor * ptp.max_element(),
            furthest_site,
        }
    }

    /// Leitet Zentrum und ptp aus den Sites des Diagramms ab.
    pub fn for_diagram<D>(diagram: &D, factor: f64) -> VoronoiResult<Self>
    where
        D: DiagramProvider + ?Sized,
    {
        let sites = diagram.sites();
        let bounds = Bounds2D::from_points_iter(sites.iter().copied());
        let (Some(center), Some(bounds)) = (stats::mean(sites), bounds) else {
            return Err(VoronoiError::DegenerateInput {
                reason: "diagram has no sites".to_string(),
            });
        };
        Ok(Self::new(center, bounds.size(), factor, diagram.furthest_site()))
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn far_distance(&self) -> f64 {
        self.far_distance
    }

    /// Liefert `(endlicher Eckpunkt, Fernpunkt)` für den Ridge `ridge` des Diagramms.
    pub fn resolve<D>(&self, diagram: &D, ridge: usize) -> VoronoiResult<[Point2D; 2]>
    where
        D: DiagramProvider + ?Sized,
    {
        let [site_a, site_b] =
            *diagram
                .ridge_points()
                .get(ridge)
                .ok_or(VoronoiError::InvalidIndex {
                    kind: "ridge",
                    index: ridge,
                    len: diagram.ridge_points().len(),
                })?;
        let degenerate = |reason: &str| VoronoiError::DegenerateRidge {
            ridge,
            site_a,
            site_b,
            reason: reason.to_string(),
        };

        let vertex_pair =
            diagram
                .ridge_vertices()
                .get(ridge)
                .ok_or(VoronoiError::InvalidIndex {
                    kind: "ridge",
                    index: ridge,
                    len: diagram.ridge_vertices().len(),
                })?;
        let finite_index = vertex_pair
            .iter()
            .find_map(|vertex| *vertex)
            .ok_or_else(|| degenerate("ridge has no finite vertex"))?;
        let finite = diagram.vertex(finite_index)?;

        let a = diagram.site(site_a)?;
        let b = diagram.site(site_b)?;
        let direction = self
            .outward_direction(a, b)
            .ok_or_else(|| degenerate("cannot orient the unbounded ray"))?;

        Ok([finite, finite + direction * self.far_distance])
    }

    /// Normierte Richtung des unendlichen Strahls zwischen den Sites `a` und `b`.
    ///
    /// `None`, wenn die Sites zusammenfallen oder ihr Mittelpunkt exakt auf der Geraden
    /// durch das Zentrum liegt, sodass keine Seite als "außen" bestimmt werden kann.
    pub fn outward_direction(&self, a: Point2D, b: Point2D) -> Option<Point2D> {
        let tangent = b - a;
        if tangent.length_squared() <= constants::EPSILON_SQUARED_F64 {
            return None;
        }
        let normal = tangent.normalize().perp();
        let midpoint = (a + b) * 0.5;

        let side = (midpoint - self.center).dot(normal);
        if side == 0.0 {
            return None;
        }
        let direction = normal * side.signum();

        if self.furthest_site {
            Some(-direction)
        } else {
            Some(direction)
        }
    }
}
