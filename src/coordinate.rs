//! Geographic coordinate shared by every pipeline stage.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Point halfway between two coordinates in degree space.
    ///
    /// Used as the map centre when both endpoints are displayed.
    pub fn midpoint(a: Coordinate, b: Coordinate) -> Self {
        Self {
            lat: (a.lat + b.lat) / 2.0,
            lng: (a.lng + b.lng) / 2.0,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}
