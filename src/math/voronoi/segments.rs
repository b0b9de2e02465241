// src/math/voronoi/segments.rs

use super::{config::VoronoiConfig, diagram::DiagramProvider, far_point::FarPointResolver};
use crate::math::{
    error::VoronoiResult,
    types::{Bounds2D, Point2D},
};
use bevy::log::debug;

/// Ridges als Liniensegmente, getrennt nach endlich und unendlich.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RidgeSegments {
    pub finite: Vec<[Point2D; 2]>,
    /// `[endlicher Eckpunkt, Fernpunkt]`
    pub infinite: Vec<[Point2D; 2]>,
}

impl RidgeSegments {
    pub fn len(&self) -> usize {
        self.finite.len() + self.infinite.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finite.is_empty() && self.infinite.is_empty()
    }
}

/// Zerlegt alle Ridges des Diagramms in Segmente, in Ridge-Reihenfolge.
pub fn ridge_segments<D>(diagram: &D, config: &VoronoiConfig) -> VoronoiResult<RidgeSegments>
where
    D: DiagramProvider + ?Sized,
{
    config.validate()?;
    let resolver = FarPointResolver::for_diagram(diagram, config.far_point_factor)?;

    let mut segments = RidgeSegments::default();
    for (ridge, pair) in diagram.ridge_vertices().iter().enumerate() {
        match *pair {
            [Some(a), Some(b)] => segments
                .finite
                .push([diagram.vertex(a)?, diagram.vertex(b)?]),
            _ => segments.infinite.push(resolver.resolve(diagram, ridge)?),
        }
    }
    debug!(
        "ridge_segments: {} finite, {} infinite.",
        segments.finite.len(),
        segments.infinite.len()
    );
    Ok(segments)
}

/// Bounding Box der Punkte, pro Achse um `margin * ptp` erweitert. `None` ohne Punkte.
pub fn display_bounds<I>(points: I, margin: f64) -> Option<Bounds2D>
where
    I: IntoIterator<Item = Point2D>,
{
    let bounds = Bounds2D::from_points_iter(points)?;
    Some(bounds.expand_xy(bounds.size() * margin))
}

/// Anzeigebereich für Sites und Eckpunkte zusammen, mit `display_margin` aus der Konfiguration.
pub fn diagram_display_bounds<D>(diagram: &D, config: &VoronoiConfig) -> Option<Bounds2D>
where
    D: DiagramProvider + ?Sized,
{
    display_bounds(
        diagram
            .sites()
            .iter()
            .chain(diagram.vertices())
            .copied(),
        config.display_margin,
    )
}
