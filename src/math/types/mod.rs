// src/math/types/mod.rs
pub mod bounds;

pub use bounds::*;

// Re-export häufig verwendete externe Typen
pub use bevy::math::{DVec2, DVec3};
pub use spade::Point2;

// Einheitliche Typen für das gesamte Modul
pub type Point2D = DVec2;
pub type Point3D = DVec3;
pub type SpadePoint = Point2<f64>;

/// Konvertiert einen Slice von Bevy DVec2 in einen Vec von Spade Points.
pub fn bevy_to_spade_points(points: &[Point2D]) -> Vec<SpadePoint> {
    points.iter().map(|p| SpadePoint::new(p.x, p.y)).collect()
}

pub fn spade_to_bevy(point: SpadePoint) -> Point2D {
    Point2D::new(point.x, point.y)
}
