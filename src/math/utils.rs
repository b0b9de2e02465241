// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON_F64: f64 = 1e-12;
    pub const EPSILON_SQUARED_F64: f64 = EPSILON_F64 * EPSILON_F64;
}

/// Statistik-Helfer über Punktmengen
pub mod stats {
    use bevy::math::DVec2;

    /// Mittelwert aller Punkte (`None` bei leerer Eingabe).
    pub fn mean(points: &[DVec2]) -> Option<DVec2> {
        if points.is_empty() {
            return None;
        }
        let sum = points.iter().fold(DVec2::ZERO, |acc, p| acc + *p);
        Some(sum / points.len() as f64)
    }
}
