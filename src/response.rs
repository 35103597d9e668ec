use serde::Deserialize;

use crate::error::{GeocodeError, Result};

/// Top-level status reported by the geocoding API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    /// A status this crate does not know about yet.
    Other(String),
}

impl From<String> for ApiStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "OK" => ApiStatus::Ok,
            "ZERO_RESULTS" => ApiStatus::ZeroResults,
            "OVER_DAILY_LIMIT" => ApiStatus::OverDailyLimit,
            "OVER_QUERY_LIMIT" => ApiStatus::OverQueryLimit,
            "REQUEST_DENIED" => ApiStatus::RequestDenied,
            "INVALID_REQUEST" => ApiStatus::InvalidRequest,
            "UNKNOWN_ERROR" => ApiStatus::UnknownError,
            _ => ApiStatus::Other(status),
        }
    }
}

impl ApiStatus {
    /// Returns the wire representation, e.g. `"ZERO_RESULTS"`.
    pub fn as_str(&self) -> &str {
        match self {
            ApiStatus::Ok => "OK",
            ApiStatus::ZeroResults => "ZERO_RESULTS",
            ApiStatus::OverDailyLimit => "OVER_DAILY_LIMIT",
            ApiStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ApiStatus::RequestDenied => "REQUEST_DENIED",
            ApiStatus::InvalidRequest => "INVALID_REQUEST",
            ApiStatus::UnknownError => "UNKNOWN_ERROR",
            ApiStatus::Other(s) => s,
        }
    }

    /// `OK` and `ZERO_RESULTS` are successful lookups.
    pub fn is_success(&self) -> bool {
        matches!(self, ApiStatus::Ok | ApiStatus::ZeroResults)
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response from the geocoding API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// Converts a non-success API status into [`GeocodeError::Api`].
    ///
    /// `ZERO_RESULTS` is not an error; the result list is simply empty.
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(GeocodeError::Api {
                status: self.status.as_str().to_string(),
                message: self.error_message,
            })
        }
    }

    /// Location of the first result, if any.
    pub fn first_location(&self) -> Option<LatLng> {
        self.results.first().map(|r| r.geometry.location)
    }
}

/// A single geocoded match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub geometry: Geometry,
    pub place_id: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Set when the geocoder could only match part of the address.
    #[serde(default)]
    pub partial_match: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    /// `ROOFTOP`, `RANGE_INTERPOLATED`, `GEOMETRIC_CENTER` or `APPROXIMATE`.
    pub location_type: Option<String>,
    pub viewport: Option<Bounds>,
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

/// Deserializes a raw response body.
pub fn parse_geocode_response(body: &[u8]) -> Result<GeocodeResponse> {
    serde_json::from_slice(body).map_err(GeocodeError::from)
}
