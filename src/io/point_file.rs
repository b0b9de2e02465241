// src/io/point_file.rs

//! Lesen und Schreiben von Punktdateien im qhull-Format:
//!
//! ```text
//! 2          <- Dimension d
//! 3          <- Anzahl n der Punkte
//! 0.5 1.25   <- n Zeilen mit je d Koordinaten
//! ...
//! ```

use crate::math::{
    error::{PointFileError, PointFileResult, VoronoiError, VoronoiResult},
    types::{Point2D, Point3D},
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Punktmenge fester Dimension, zeilenweise gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    dimension: usize,
    points: Vec<Vec<f64>>,
}

impl PointSet {
    pub fn new(dimension: usize, points: Vec<Vec<f64>>) -> PointFileResult<Self> {
        if let Some((row, point)) = points
            .iter()
            .enumerate()
            .find(|(_, point)| point.len() != dimension)
        {
            return Err(PointFileError::WidthMismatch {
                row,
                expected: dimension,
                found: point.len(),
            });
        }
        Ok(Self { dimension, points })
    }

    pub fn from_points_2d(points: &[Point2D]) -> Self {
        Self {
            dimension: 2,
            points: points.iter().map(|p| vec![p.x, p.y]).collect(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Hängt den Ursprung als zusätzlichen Punkt an (z.B. als Referenzpunkt für sichtbare Facetten).
    pub fn append_origin(&mut self) {
        self.points.push(vec![0.0; self.dimension]);
    }

    pub fn to_points_2d(&self) -> VoronoiResult<Vec<Point2D>> {
        self.expect_dimension(2)?;
        Ok(self
            .points
            .iter()
            .map(|p| Point2D::new(p[0], p[1]))
            .collect())
    }

    pub fn to_points_3d(&self) -> VoronoiResult<Vec<Point3D>> {
        self.expect_dimension(3)?;
        Ok(self
            .points
            .iter()
            .map(|p| Point3D::new(p[0], p[1], p[2]))
            .collect())
    }

    fn expect_dimension(&self, expected: usize) -> VoronoiResult<()> {
        if self.dimension == expected {
            Ok(())
        } else {
            Err(VoronoiError::DimensionMismatch {
                expected,
                actual: self.dimension,
            })
        }
    }
}

/// Liest eine Punktmenge. Leerzeilen nach dem letzten Punkt werden ignoriert.
pub fn read_point_set<R: BufRead>(reader: R) -> PointFileResult<PointSet> {
    let mut lines = reader.lines().enumerate();

    let mut header = |field: &'static str| -> PointFileResult<usize> {
        let (idx, line) = lines
            .next()
            .ok_or(PointFileError::MissingHeader { field })?;
        let line = line?;
        line.trim()
            .parse::<usize>()
            .map_err(|_| PointFileError::InvalidHeader {
                field,
                line: idx + 1,
                value: line.clone(),
            })
    };
    let dimension = header("dimension")?;
    let count = header("point count")?;

    // `count` stammt aus der Datei und wird erst nach dem Lesen geprüft.
    let mut points = Vec::new();
    for (idx, line) in lines.by_ref() {
        if points.len() == count {
            break;
        }
        let line = line?;
        let line_number = idx + 1;
        let row = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|_| PointFileError::InvalidNumber {
                        line: line_number,
                        token: token.to_string(),
                    })
            })
            .collect::<PointFileResult<Vec<f64>>>()?;
        if row.len() != dimension {
            return Err(PointFileError::RowWidth {
                line: line_number,
                expected: dimension,
                found: row.len(),
            });
        }
        points.push(row);
    }

    if points.len() < count {
        return Err(PointFileError::MissingRow {
            expected: count,
            found: points.len(),
        });
    }
    PointSet::new(dimension, points)
}

/// Schreibt eine Punktmenge. Zahlen werden verlustfrei formatiert, sodass Lesen nach
/// Schreiben exakt dieselben Werte ergibt.
pub fn write_point_set<W: Write>(mut writer: W, points: &PointSet) -> PointFileResult<()> {
    writeln!(writer, "{}", points.dimension)?;
    writeln!(writer, "{}", points.len())?;
    for row in &points.points {
        let line = row
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_point_file<P: AsRef<Path>>(path: P) -> PointFileResult<PointSet> {
    read_point_set(BufReader::new(File::open(path)?))
}

pub fn write_point_file<P: AsRef<Path>>(path: P, points: &PointSet) -> PointFileResult<()> {
    write_point_set(BufWriter::new(File::create(path)?), points)
}
