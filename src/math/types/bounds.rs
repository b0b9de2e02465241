// src/math/types/bounds.rs

use crate::math::{
    error::{VoronoiError, VoronoiResult},
    types::Point2D,
};

/// 2D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2D {
    pub min: Point2D,
    pub max: Point2D,
}

impl Bounds2D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point2D, max: Point2D) -> VoronoiResult<Self> {
        if min.x > max.x || min.y > max.y {
            return Err(VoronoiError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Erstellt eine Bounding Box die alle Punkte umschließt
    pub fn from_points_iter<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D>,
    {
        let mut points_iter = points.into_iter();
        let first_point = points_iter.next()?;

        let mut bounds = Self {
            min: first_point,
            max: first_point,
        };
        for point in points_iter {
            bounds.expand_to_include_point(point);
        }

        Some(bounds)
    }

    /// Breite der Bounding Box
    pub fn width(&self) -> f64 {
        (self.max.x - self.min.x).max(0.0)
    }

    /// Höhe der Bounding Box
    pub fn height(&self) -> f64 {
        (self.max.y - self.min.y).max(0.0)
    }

    /// Größe der Bounding Box (entspricht `ptp` der umschlossenen Punkte)
    pub fn size(&self) -> Point2D {
        Point2D::new(self.width(), self.height())
    }

    pub fn center(&self) -> Point2D {
        (self.min + self.max) * 0.5
    }

    /// Prüft ob ein Punkt in der Bounding Box liegt
    pub fn contains_point(&self, point: Point2D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn expand_to_include_point(&mut self, point: Point2D) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Erweitert die Bounding Box pro Achse um `margin` (x und y getrennt)
    pub fn expand_xy(&self, margin: Point2D) -> Self {
        Self {
            min: self.min - margin,
            max: self.max + margin,
        }
    }
}
