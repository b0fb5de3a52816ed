//! Test fixtures for route-eta.
//!
//! Provides a mock transport that serves canned provider JSON and records
//! every request, plus builders for geocoding and directions bodies.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Value, json};

use route_eta::config::ProviderConfig;
use route_eta::traits::{HttpTransport, TransportError};

pub const GEOCODE_URL: &str = "http://geocode.test/json";
pub const DIRECTIONS_URL: &str = "http://directions.test/json";
pub const API_KEY: &str = "test-key";

/// Encodes (38.5, -120.2), (40.7, -120.95), (43.252, -126.453).
pub const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
/// A latitude with no longitude.
pub const BROKEN_POLYLINE: &str = "_p~iF";

pub const INDIA_GATE: (f64, f64) = (28.6129, 77.2295);
pub const TAJ_MAHAL: (f64, f64) = (27.1751, 78.0421);

pub fn provider() -> ProviderConfig {
    let mut provider = ProviderConfig::new(API_KEY);
    provider.geocode_url = GEOCODE_URL.to_string();
    provider.directions_url = DIRECTIONS_URL.to_string();
    provider
}

#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub params: HashMap<String, String>,
    pub timeout: Duration,
}

/// Serves geocoding bodies keyed by address and a single directions body.
#[derive(Default)]
pub struct MockTransport {
    geocode: HashMap<String, Result<String, TransportError>>,
    directions: Option<Result<String, TransportError>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(mut self, address: &str, body: Value) -> Self {
        self.geocode.insert(address.to_string(), Ok(body.to_string()));
        self
    }

    pub fn place_error(mut self, address: &str, err: TransportError) -> Self {
        self.geocode.insert(address.to_string(), Err(err));
        self
    }

    pub fn place_raw(mut self, address: &str, body: &str) -> Self {
        self.geocode.insert(address.to_string(), Ok(body.to_string()));
        self
    }

    pub fn directions(mut self, body: Value) -> Self {
        self.directions = Some(Ok(body.to_string()));
        self
    }

    pub fn directions_error(mut self, err: TransportError) -> Self {
        self.directions = Some(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| call.url == url).count()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<String, TransportError> {
        let params: HashMap<String, String> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            params: params.clone(),
            timeout,
        });

        match url {
            GEOCODE_URL => {
                let address = params.get("address").cloned().unwrap_or_default();
                self.geocode
                    .get(&address)
                    .cloned()
                    .unwrap_or_else(|| Err(TransportError::Connection(format!("no stub for {}", address))))
            }
            DIRECTIONS_URL => self
                .directions
                .clone()
                .unwrap_or_else(|| Err(TransportError::Connection("no directions stub".to_string()))),
            other => Err(TransportError::Connection(format!("unexpected url {}", other))),
        }
    }
}

pub fn geocode_ok((lat, lng): (f64, f64)) -> Value {
    json!({
        "status": "OK",
        "results": [
            { "geometry": { "location": { "lat": lat, "lng": lng } } }
        ]
    })
}

pub fn geocode_status(status: &str) -> Value {
    json!({ "status": status, "results": [] })
}

/// Builder for one route in a directions body.
#[derive(Clone, Debug)]
pub struct RouteStub {
    summary: String,
    polyline: String,
    duration: u64,
    duration_in_traffic: Option<u64>,
    distance: u64,
    steps: usize,
}

impl RouteStub {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            polyline: REFERENCE_POLYLINE.to_string(),
            duration: 3600,
            duration_in_traffic: None,
            distance: 100_000,
            steps: 10,
        }
    }

    pub fn duration(mut self, seconds: u64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn traffic(mut self, seconds: u64) -> Self {
        self.duration_in_traffic = Some(seconds);
        self
    }

    pub fn distance(mut self, meters: u64) -> Self {
        self.distance = meters;
        self
    }

    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn polyline(mut self, encoded: &str) -> Self {
        self.polyline = encoded.to_string();
        self
    }

    fn to_json(&self) -> Value {
        let steps: Vec<Value> = (0..self.steps)
            .map(|i| json!({ "html_instructions": format!("step {}", i) }))
            .collect();
        let mut leg = json!({
            "duration": { "text": "", "value": self.duration },
            "distance": { "text": "", "value": self.distance },
            "steps": steps,
        });
        if let Some(traffic) = self.duration_in_traffic {
            leg["duration_in_traffic"] = json!({ "text": "", "value": traffic });
        }
        json!({
            "summary": self.summary,
            "overview_polyline": { "points": self.polyline },
            "legs": [leg],
        })
    }
}

pub fn directions_ok(routes: &[RouteStub]) -> Value {
    json!({
        "status": "OK",
        "routes": routes.iter().map(RouteStub::to_json).collect::<Vec<_>>(),
    })
}

pub fn directions_status(status: &str) -> Value {
    json!({ "status": status, "routes": [] })
}
