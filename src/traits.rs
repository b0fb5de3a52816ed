//! Seams between the pipeline and the outside world.
//!
//! Production code plugs in reqwest and a model artifact; tests plug in
//! canned responses and recording models.

use std::time::Duration;

use thiserror::Error;

/// Transport-level failure. Carries no provider semantics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Connection(String),
}

/// Issues a GET request and returns the response body.
///
/// Implementations must honor `timeout` and must not retry.
pub trait HttpTransport: Sync {
    fn get(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<String, TransportError>;
}

/// A pre-trained regression model mapping `[distance_km, step_proxy]` to minutes.
pub trait RegressionModel: Send + Sync {
    fn predict(&self, features: [f64; 2]) -> f64;
}
