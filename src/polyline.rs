//! Polyline representation for route geometries.
//!
//! Directions providers ship route geometry in the compact encoded polyline
//! format. Decoding happens here, at the boundary; everything downstream
//! works with the decoded coordinate sequence.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::GeometryError;

/// Decimal places carried by provider polylines.
const PRECISION: u32 = 5;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Decodes an encoded polyline string.
///
/// Malformed input is rejected as a whole; a partially decoded geometry is
/// never returned.
pub fn decode(encoded: &str) -> Result<Polyline, GeometryError> {
    let line = polyline::decode_polyline(encoded, PRECISION)
        .map_err(|err| GeometryError::Invalid(err.to_string()))?;

    // x is longitude, y is latitude.
    let points = line
        .into_iter()
        .map(|coord| Coordinate::new(coord.y, coord.x))
        .collect();

    Ok(Polyline::new(points))
}
