//! End-to-end query pipeline.
//!
//! ```text
//! resolve(start) ─┐
//!                 ├─ join ─┬─ estimate ──────┐
//! resolve(end) ───┘        └─ fetch_routes ──┴─ synthesize
//! ```
//!
//! Both endpoints are resolved before directions are requested, so a bad
//! place name never costs a directions call.

use jiff::Zoned;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::coordinate::Coordinate;
use crate::directions::{self, FetchedRoutes};
use crate::error::{Error, FailureReason};
use crate::estimator::Estimator;
use crate::geocode;
use crate::synthesize::{self, SynthesizedResult};
use crate::traits::HttpTransport;

/// Two place names entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub start_place: String,
    pub end_place: String,
}

impl Query {
    pub fn new(start_place: impl Into<String>, end_place: impl Into<String>) -> Self {
        Self {
            start_place: start_place.into(),
            end_place: end_place.into(),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.start_place.trim().is_empty() {
            return Err(Error::InvalidInput("start location must not be empty".to_string()));
        }
        if self.end_place.trim().is_empty() {
            return Err(Error::InvalidInput("destination must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Everything a presentation layer needs for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub start: Coordinate,
    pub end: Coordinate,
    pub map_center: Coordinate,
    #[serde(flatten)]
    pub result: SynthesizedResult,
    /// Why the route list is empty when directions failed outright.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes_unavailable: Option<FailureReason>,
    /// Routes dropped because their geometry did not decode.
    pub skipped_routes: usize,
}

pub struct RoutePlanner<'a, T: HttpTransport + ?Sized> {
    transport: &'a T,
    provider: &'a ProviderConfig,
    estimator: Option<&'a Estimator>,
}

impl<'a, T: HttpTransport + ?Sized> RoutePlanner<'a, T> {
    /// `estimator` is `None` when the model failed to load; every query is
    /// then refused.
    pub fn new(transport: &'a T, provider: &'a ProviderConfig, estimator: Option<&'a Estimator>) -> Self {
        Self {
            transport,
            provider,
            estimator,
        }
    }

    pub fn plan(&self, query: &Query, query_time: &Zoned) -> Result<TripPlan, Error> {
        query.validate()?;
        let estimator = self
            .estimator
            .ok_or_else(|| Error::EstimatorUnavailable("no model loaded".to_string()))?;

        let (start, end) = rayon::join(
            || geocode::resolve(self.transport, self.provider, &query.start_place),
            || geocode::resolve(self.transport, self.provider, &query.end_place),
        );
        let (start, end) = (start?, end?);

        let (estimate, fetched) = rayon::join(
            || estimator.estimate(start, end),
            || directions::fetch_routes(self.transport, self.provider, &query.start_place, &query.end_place),
        );
        let estimate = estimate?;

        let (fetched, routes_unavailable) = match fetched {
            Ok(fetched) => (fetched, None),
            Err(Error::FetchFailure { reason }) => {
                warn!(%reason, "no live routes, keeping model estimate");
                (FetchedRoutes::default(), Some(reason))
            }
            Err(err) => return Err(err),
        };

        let result = synthesize::synthesize(&estimate, &fetched.candidates, query_time)?;
        info!(
            start = %query.start_place,
            end = %query.end_place,
            estimate = %result.estimate.duration,
            routes = result.routes.len(),
            "planned trip"
        );

        Ok(TripPlan {
            start,
            end,
            map_center: Coordinate::midpoint(start, end),
            result,
            routes_unavailable,
            skipped_routes: fetched.skipped.len(),
        })
    }
}
