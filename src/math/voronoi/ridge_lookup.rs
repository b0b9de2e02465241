// src/math/voronoi/ridge_lookup.rs

use super::{config::RidgeLookup, diagram::DiagramProvider};
use crate::math::error::VertexRef;
use std::collections::HashMap;

/// Ungeordnetes Eckpunktpaar als Schlüssel: `(a, b)` und `(b, a)` sind derselbe Ridge.
pub fn pair_key(a: VertexRef, b: VertexRef) -> (VertexRef, VertexRef) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Index von Eckpunktpaar auf Ridge-Indizes. Wird einmal pro Diagramm aufgebaut und danach
/// nur noch gelesen.
#[derive(Debug, Clone, Default)]
pub struct RidgeIndex {
    by_pair: HashMap<(VertexRef, VertexRef), Vec<usize>>,
}

impl RidgeIndex {
    pub fn build<D>(diagram: &D) -> Self
    where
        D: DiagramProvider + ?Sized,
    {
        let mut by_pair: HashMap<_, Vec<usize>> = HashMap::new();
        for (ridge, [a, b]) in diagram.ridge_vertices().iter().enumerate() {
            by_pair.entry(pair_key(*a, *b)).or_default().push(ridge);
        }
        Self { by_pair }
    }

    /// Alle Ridges mit diesem Eckpunktpaar, in Aufzählungsreihenfolge.
    pub fn candidates(&self, a: VertexRef, b: VertexRef) -> &[usize] {
        self.by_pair
            .get(&pair_key(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

/// Sucht die Ridges, deren Eckpunktpaar `(a, b)` ist und die an `site` grenzen.
#[derive(Debug, Clone)]
pub enum RidgeMatcher {
    Indexed(RidgeIndex),
    Scan,
}

impl RidgeMatcher {
    pub fn new<D>(diagram: &D, lookup: RidgeLookup) -> Self
    where
        D: DiagramProvider + ?Sized,
    {
        match lookup {
            RidgeLookup::Indexed => Self::Indexed(RidgeIndex::build(diagram)),
            RidgeLookup::Scan => Self::Scan,
        }
    }

    /// Liefert null, einen oder (bei doppelten Ridges) mehrere Treffer. Nichts wird
    /// dedupliziert, die Reihenfolge ist die der Ridge-Aufzählung.
    pub fn find<D>(&self, diagram: &D, site: usize, a: VertexRef, b: VertexRef) -> Vec<usize>
    where
        D: DiagramProvider + ?Sized,
    {
        let borders_site = |ridge: &usize| {
            diagram
                .ridge_points()
                .get(*ridge)
                .is_some_and(|pair| pair.contains(&site))
        };

        match self {
            Self::Indexed(index) => index
                .candidates(a, b)
                .iter()
                .copied()
                .filter(borders_site)
                .collect(),
            Self::Scan => {
                let key = pair_key(a, b);
                diagram
                    .ridge_vertices()
                    .iter()
                    .enumerate()
                    .filter(|(_, [x, y])| pair_key(*x, *y) == key)
                    .map(|(ridge, _)| ridge)
                    .filter(borders_site)
                    .collect()
            }
        }
    }
}
