// src/math/sphere/mod.rs

pub mod arcs;

pub use arcs::SphericalArcs;
