//! Alternative driving routes from the directions provider.

use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::{Error, FailureReason, GeometryError};
use crate::polyline::{self, Polyline};
use crate::traits::HttpTransport;

const STATUS_OK: &str = "OK";

/// One alternative route as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    pub geometry: Polyline,
    /// Traffic-aware duration when the provider supplied one, static otherwise.
    pub duration_seconds: u64,
    pub distance_meters: u64,
    /// Number of turn-by-turn instructions on the first leg.
    pub step_count: usize,
    pub summary: String,
}

/// Routes in provider order, plus the ones dropped for undecodable geometry.
#[derive(Debug, Clone, Default)]
pub struct FetchedRoutes {
    pub candidates: Vec<RouteCandidate>,
    /// Provider index and decode error of every skipped route.
    pub skipped: Vec<(usize, GeometryError)>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RouteJson>,
}

#[derive(Debug, Deserialize)]
struct RouteJson {
    #[serde(default)]
    summary: String,
    overview_polyline: OverviewPolyline,
    legs: Vec<LegJson>,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct LegJson {
    duration: TextValue,
    duration_in_traffic: Option<TextValue>,
    distance: TextValue,
    #[serde(default)]
    steps: Vec<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: u64,
}

/// Fetches driving alternatives between two place names, departing now.
///
/// The provider's order is the ranking and is preserved. A route whose
/// geometry does not decode is skipped rather than failing the batch.
pub fn fetch_routes<T: HttpTransport + ?Sized>(
    transport: &T,
    provider: &ProviderConfig,
    start: &str,
    end: &str,
) -> Result<FetchedRoutes, Error> {
    let failure = |reason| Error::FetchFailure { reason };

    let body = transport
        .get(
            &provider.directions_url,
            &[
                ("origin", start),
                ("destination", end),
                ("mode", "driving"),
                ("alternatives", "true"),
                ("departure_time", "now"),
                ("key", provider.api_key.as_str()),
            ],
            provider.directions_timeout,
        )
        .map_err(|err| failure(FailureReason::Network(err.to_string())))?;

    let response: DirectionsResponse = serde_json::from_str(&body)
        .map_err(|err| failure(FailureReason::MalformedResponse(err.to_string())))?;

    if response.status != STATUS_OK {
        debug!(start, end, status = %response.status, "directions miss");
        return Err(failure(FailureReason::ProviderStatus(response.status)));
    }

    let mut fetched = FetchedRoutes::default();
    for (index, route) in response.routes.into_iter().enumerate() {
        let Some(leg) = route.legs.into_iter().next() else {
            return Err(failure(FailureReason::MalformedResponse(format!("route {} has no legs", index))));
        };

        let geometry = match polyline::decode(&route.overview_polyline.points) {
            Ok(geometry) => geometry,
            Err(err) => {
                warn!(index, summary = %route.summary, error = %err, "skipping route with malformed geometry");
                fetched.skipped.push((index, err));
                continue;
            }
        };

        let duration_seconds = leg
            .duration_in_traffic
            .as_ref()
            .map_or(leg.duration.value, |traffic| traffic.value);

        fetched.candidates.push(RouteCandidate {
            geometry,
            duration_seconds,
            distance_meters: leg.distance.value,
            step_count: leg.steps.len(),
            summary: route.summary,
        });
    }

    info!(
        routes = fetched.candidates.len(),
        skipped = fetched.skipped.len(),
        "fetched directions"
    );
    Ok(fetched)
}
