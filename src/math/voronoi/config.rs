// src/math/voronoi/config.rs

use crate::math::error::{VoronoiError, VoronoiResult};
use serde::{Deserialize, Serialize};

/// Strategie, mit der zu einem Eckpunktpaar die zugehörigen Ridges gesucht werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RidgeLookup {
    /// Hash-Map von normalisiertem Eckpunktpaar auf Ridge-Indizes, einmal pro Diagramm aufgebaut.
    #[default]
    Indexed,
    /// Lineare Suche über alle Ridges.
    Scan,
}

/// Konfiguration für die Rekonstruktion der Voronoi-Regionen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoronoiConfig {
    /// Abstand des Fernpunkts vom endlichen Eckpunkt, in Vielfachen des größten ptp-Werts der Sites.
    pub far_point_factor: f64,
    pub ridge_lookup: RidgeLookup,
    /// Entfernt einen Fernpunkt, wenn er identisch mit dem unmittelbar davor emittierten Punkt ist.
    pub dedup_far_points: bool,
    /// Regionen parallel (rayon) zusammensetzen.
    pub parallel: bool,
    /// Umkreismittelpunkte, die näher als diese Toleranz liegen, werden zu einem Eckpunkt verschmolzen.
    pub vertex_merge_tolerance: f64,
    /// Rand für die Anzeige-Bounds, relativ zum ptp pro Achse.
    pub display_margin: f64,
    /// Anzahl der Stützpunkte pro Großkreisbogen (sphärische Diagramme).
    pub arc_samples: usize,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            far_point_factor: 2.0,
            ridge_lookup: RidgeLookup::Indexed,
            dedup_far_points: false,
            parallel: false,
            vertex_merge_tolerance: 1e-9,
            display_margin: 0.1,
            arc_samples: 100,
        }
    }
}

impl VoronoiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_far_point_factor(mut self, factor: f64) -> Self {
        self.far_point_factor = factor;
        self
    }

    pub fn with_ridge_lookup(mut self, lookup: RidgeLookup) -> Self {
        self.ridge_lookup = lookup;
        self
    }

    pub fn with_dedup_far_points(mut self, dedup: bool) -> Self {
        self.dedup_far_points = dedup;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_vertex_merge_tolerance(mut self, tolerance: f64) -> Self {
        self.vertex_merge_tolerance = tolerance;
        self
    }

    pub fn with_display_margin(mut self, margin: f64) -> Self {
        self.display_margin = margin;
        self
    }

    pub fn with_arc_samples(mut self, samples: usize) -> Self {
        self.arc_samples = samples;
        self
    }

    pub fn validate(&self) -> VoronoiResult<()> {
        if !(self.far_point_factor.is_finite() && self.far_point_factor > 0.0) {
            return Err(VoronoiError::InvalidConfiguration {
                message: format!(
                    "Far point factor must be a positive finite number, got {}",
                    self.far_point_factor
                ),
            });
        }
        if !(self.vertex_merge_tolerance >= 0.0) {
            return Err(VoronoiError::InvalidConfiguration {
                message: "Vertex merge tolerance must not be negative".to_string(),
            });
        }
        if !(self.display_margin >= 0.0) {
            return Err(VoronoiError::InvalidConfiguration {
                message: "Display margin must not be negative".to_string(),
            });
        }
        if self.arc_samples < 2 {
            return Err(VoronoiError::InvalidConfiguration {
                message: format!(
                    "A great-circle arc needs at least 2 samples, got {}",
                    self.arc_samples
                ),
            });
        }
        Ok(())
    }
}
