//! Blocking HTTP adapter for the geocoding and directions providers.

use std::time::Duration;

use tracing::debug;

use crate::traits::{HttpTransport, TransportError};

/// Upper bound applied at the client level; per-request timeouts are tighter.
const CLIENT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<String, TransportError> {
        debug!(url, ?timeout, "GET");

        self.client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|err| classify(err, timeout))
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if let Some(status) = err.status() {
        TransportError::Status(status.as_u16())
    } else {
        // The URL carries the API key.
        TransportError::Connection(err.without_url().to_string())
    }
}
