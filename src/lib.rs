//! route-eta core pipeline
//!
//! Resolves two place names into ranked driving routes and an independent
//! model-based travel time estimate.

pub mod config;
pub mod coordinate;
pub mod directions;
pub mod error;
pub mod estimator;
pub mod geocode;
pub mod http;
pub mod planner;
pub mod polyline;
pub mod synthesize;
pub mod traits;

pub use coordinate::Coordinate;
pub use error::{Error, FailureReason};
pub use planner::{Query, RoutePlanner, TripPlan};
