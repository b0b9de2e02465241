// src/math/sphere/arcs.rs

use crate::io::point_file::PointSet;
use crate::math::{
    error::{VoronoiError, VoronoiResult},
    types::Point3D,
    utils::constants,
    voronoi::VoronoiConfig,
};
use bevy::log::debug;
use nalgebra::{Rotation3, Unit, Vector3 as NVec3};

/// Tastet die Ridges eines sphärischen Voronoi-Diagramms als Großkreisbögen ab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalArcs {
    center: Point3D,
    radius: f64,
    samples: usize,
}

impl SphericalArcs {
    pub fn new(center: Point3D, radius: f64, samples: usize) -> VoronoiResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(VoronoiError::InvalidConfiguration {
                message: format!("Sphere radius must be positive and finite, got {}", radius),
            });
        }
        if samples < 2 {
            return Err(VoronoiError::InvalidConfiguration {
                message: format!("An arc needs at least 2 samples, got {}", samples),
            });
        }
        Ok(Self {
            center,
            radius,
            samples,
        })
    }

    /// Übernimmt `arc_samples` aus der Konfiguration.
    pub fn from_config(center: Point3D, radius: f64, config: &VoronoiConfig) -> VoronoiResult<Self> {
        Self::new(center, radius, config.arc_samples)
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// `samples` Punkte auf dem kürzeren Großkreisbogen von `start` nach `end`, beide
    /// Endpunkte eingeschlossen. Die Eingaben werden vorher auf die Kugel projiziert.
    ///
    /// `None`, wenn ein Punkt im Zentrum liegt oder die Punkte zusammenfallen bzw.
    /// antipodal sind (dann ist der Großkreis nicht eindeutig).
    pub fn arc(&self, start: Point3D, end: Point3D) -> Option<Vec<Point3D>> {
        let from = to_nalgebra(start - self.center).try_normalize(constants::EPSILON_F64)?;
        let to = to_nalgebra(end - self.center).try_normalize(constants::EPSILON_F64)?;

        let axis = from.cross(&to);
        let sin_angle = axis.norm();
        if sin_angle <= constants::EPSILON_F64 {
            return None;
        }
        let angle = sin_angle.atan2(from.dot(&to));
        let unit_axis = Unit::new_normalize(axis);

        let step = angle / (self.samples - 1) as f64;
        let points = (0..self.samples)
            .map(|i| {
                let rotation = Rotation3::from_axis_angle(&unit_axis, step * i as f64);
                self.center + from_nalgebra(rotation * from) * self.radius
            })
            .collect();
        Some(points)
    }

    /// Ein Bogen pro Ridge, in Ridge-Reihenfolge.
    pub fn ridge_arcs(
        &self,
        vertices: &[Point3D],
        ridges: &[[usize; 2]],
    ) -> VoronoiResult<Vec<Vec<Point3D>>> {
        let vertex = |index: usize| {
            vertices
                .get(index)
                .copied()
                .ok_or(VoronoiError::InvalidIndex {
                    kind: "vertex",
                    index,
                    len: vertices.len(),
                })
        };

        let arcs = ridges
            .iter()
            .enumerate()
            .map(|(ridge, &[a, b])| {
                self.arc(vertex(a)?, vertex(b)?)
                    .ok_or_else(|| VoronoiError::DegenerateArc {
                        ridge,
                        vertices: [a, b],
                        reason: "vertices are coincident, antipodal or at the center".to_string(),
                    })
            })
            .collect::<VoronoiResult<Vec<_>>>()?;
        debug!(
            "SphericalArcs: sampled {} arcs with {} points each.",
            arcs.len(),
            self.samples
        );
        Ok(arcs)
    }

    pub fn ridge_arcs_from_point_set(
        &self,
        vertices: &PointSet,
        ridges: &[[usize; 2]],
    ) -> VoronoiResult<Vec<Vec<Point3D>>> {
        self.ridge_arcs(&vertices.to_points_3d()?, ridges)
    }
}

fn to_nalgebra(v: Point3D) -> NVec3<f64> {
    NVec3::new(v.x, v.y, v.z)
}

fn from_nalgebra(v: NVec3<f64>) -> Point3D {
    Point3D::new(v.x, v.y, v.z)
}
