//! Merges the model estimate and fetched routes into display-ready values.

use jiff::{SignedDuration, Zoned};
use serde::Serialize;

use crate::directions::RouteCandidate;
use crate::error::{Error, FailureReason};
use crate::estimator::PredictedEstimate;
use crate::polyline::Polyline;

/// Route colours, cycled by rank.
pub const ROUTE_COLORS: [&str; 5] = ["#2196F3", "#00BCD4", "#4CAF50", "#FFC107", "#FF5722"];

const ETA_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateView {
    /// Predicted minutes, truncated.
    pub minutes: u64,
    pub duration: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteView {
    /// 1-based position in provider order.
    pub rank: usize,
    pub summary: String,
    pub duration_seconds: u64,
    pub duration: String,
    pub eta: String,
    pub distance_km: String,
    pub step_count: usize,
    pub color: &'static str,
    pub geometry: Polyline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedResult {
    pub estimate: EstimateView,
    /// Empty means "no routes found", which is not an error.
    pub routes: Vec<RouteView>,
}

/// `"H hr M min"` when there is at least one hour, `"M min"` otherwise.
///
/// Seconds are floored to whole minutes.
pub fn format_duration(seconds: u64) -> String {
    let total_minutes = seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{} hr {} min", hours, minutes)
    } else {
        format!("{} min", minutes)
    }
}

/// Metres as kilometres with one decimal.
pub fn format_distance_km(meters: u64) -> String {
    format!("{:.1}", meters as f64 / 1000.0)
}

/// Arrival time on a 12-hour clock, e.g. `"01:05 PM"`.
pub fn format_eta(query_time: &Zoned, duration_seconds: u64) -> Result<String, Error> {
    let seconds = i64::try_from(duration_seconds).map_err(|_| Error::FetchFailure {
        reason: FailureReason::MalformedResponse(format!("duration of {} seconds is out of range", duration_seconds)),
    })?;
    let eta = query_time.checked_add(SignedDuration::from_secs(seconds))?;
    Ok(eta.strftime(ETA_FORMAT).to_string())
}

pub fn synthesize(
    estimate: &PredictedEstimate,
    candidates: &[RouteCandidate],
    query_time: &Zoned,
) -> Result<SynthesizedResult, Error> {
    let minutes = estimate.minutes.trunc() as u64;
    let estimate = EstimateView {
        minutes,
        duration: format_duration(minutes.saturating_mul(60)),
        distance_km: estimate.distance_km,
    };

    let routes = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| -> Result<RouteView, Error> {
            Ok(RouteView {
                rank: index + 1,
                summary: candidate.summary.clone(),
                duration_seconds: candidate.duration_seconds,
                duration: format_duration(candidate.duration_seconds),
                eta: format_eta(query_time, candidate.duration_seconds)?,
                distance_km: format_distance_km(candidate.distance_meters),
                step_count: candidate.step_count,
                color: ROUTE_COLORS[index % ROUTE_COLORS.len()],
                geometry: candidate.geometry.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SynthesizedResult { estimate, routes })
}
