use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Why a provider call did not yield a usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    /// The provider answered with a non-`OK` status such as `ZERO_RESULTS`.
    ProviderStatus(String),
    /// The request never produced a response body (connection, timeout, HTTP status).
    Network(String),
    /// The body was not the JSON shape we require.
    MalformedResponse(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ProviderStatus(status) => write!(f, "provider status {}", status),
            FailureReason::Network(message) => write!(f, "network error: {}", message),
            FailureReason::MalformedResponse(message) => {
                write!(f, "malformed response: {}", message)
            }
        }
    }
}

/// Decoding failure for an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("invalid polyline: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("could not resolve {place:?}: {reason}")]
    ResolutionFailure { place: String, reason: FailureReason },

    #[error("directions request failed: {reason}")]
    FetchFailure { reason: FailureReason },

    #[error("malformed route geometry: {0}")]
    MalformedGeometry(#[from] GeometryError),

    #[error("duration estimator unavailable: {0}")]
    EstimatorUnavailable(String),

    #[error("missing or invalid configuration: {0}")]
    Configuration(String),

    #[error("time arithmetic failed: {0}")]
    Time(#[from] jiff::Error),
}

impl Error {
    /// Provider failure reason, if this error came from a provider call.
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            Error::ResolutionFailure { reason, .. } | Error::FetchFailure { reason } => Some(reason),
            _ => None,
        }
    }
}
