//! Place name to coordinate resolution against the geocoding provider.

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::coordinate::Coordinate;
use crate::error::{Error, FailureReason};
use crate::traits::HttpTransport;

const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: Coordinate,
}

/// Resolves `place` to the provider's first match.
///
/// Empty input is rejected before any request. Every call hits the provider.
pub fn resolve<T: HttpTransport + ?Sized>(
    transport: &T,
    provider: &ProviderConfig,
    place: &str,
) -> Result<Coordinate, Error> {
    let place = place.trim();
    if place.is_empty() {
        return Err(Error::InvalidInput("place name must not be empty".to_string()));
    }

    let failure = |reason| Error::ResolutionFailure {
        place: place.to_string(),
        reason,
    };

    let body = transport
        .get(
            &provider.geocode_url,
            &[("address", place), ("key", provider.api_key.as_str())],
            provider.geocode_timeout,
        )
        .map_err(|err| failure(FailureReason::Network(err.to_string())))?;

    let response: GeocodeResponse = serde_json::from_str(&body)
        .map_err(|err| failure(FailureReason::MalformedResponse(err.to_string())))?;

    if response.status != STATUS_OK {
        debug!(place, status = %response.status, "geocoding miss");
        return Err(failure(FailureReason::ProviderStatus(response.status)));
    }

    let coordinate = response
        .results
        .into_iter()
        .next()
        .map(|result| result.geometry.location)
        .ok_or_else(|| failure(FailureReason::MalformedResponse("OK status without results".to_string())))?;

    info!(place, lat = coordinate.lat, lng = coordinate.lng, "resolved place");
    Ok(coordinate)
}
