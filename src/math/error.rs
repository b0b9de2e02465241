// src/math/error.rs
use thiserror::Error;

/// Eckpunkt-Referenz eines Ridges oder einer Region. `None` ist der Sentinel für "unendlich".
pub type VertexRef = Option<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoronoiError {
    #[error("Voronoi diagram is not {expected}-D: got {actual} dimensions")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Degenerate ridge {ridge} between sites {site_a} and {site_b}: {reason}")]
    DegenerateRidge {
        ridge: usize,
        site_a: usize,
        site_b: usize,
        reason: String,
    },

    #[error("Degenerate arc for ridge {ridge} between vertices {vertices:?}: {reason}")]
    DegenerateArc {
        ridge: usize,
        vertices: [usize; 2],
        reason: String,
    },

    #[error("No ridge with vertex pair {:?} or {:?} borders site {site}", .searched[0], .searched[1])]
    RidgeNotFound {
        site: usize,
        searched: [(VertexRef, VertexRef); 2],
    },

    #[error("Invalid {kind} index {index} (length {len})")]
    InvalidIndex {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Inconsistent diagram: {message}")]
    InconsistentDiagram { message: String },

    #[error("Degenerate input for diagram construction: {reason}")]
    DegenerateInput { reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type VoronoiResult<T> = Result<T, VoronoiError>;

/// Fehler beim Lesen oder Schreiben einer qhull-Punktdatei.
#[derive(Error, Debug)]
pub enum PointFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Point file ended before the {field} header line")]
    MissingHeader { field: &'static str },

    #[error("Invalid {field} header on line {line}: {value:?}")]
    InvalidHeader {
        field: &'static str,
        line: usize,
        value: String,
    },

    #[error("Point file declares {expected} points but only {found} rows were found")]
    MissingRow { expected: usize, found: usize },

    #[error("Line {line}: expected {expected} coordinates, got {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: cannot parse {token:?} as a number")]
    InvalidNumber { line: usize, token: String },

    #[error("Row {row} has {found} coordinates, point set dimension is {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type PointFileResult<T> = Result<T, PointFileError>;
