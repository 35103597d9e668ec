//! Synchronous (blocking) client for the geocoding API.
//!
//! This module is only available when the `blocking` feature is enabled.
//! It mirrors the async [`crate::client::Client`] API using `reqwest::blocking`.
//!
//! # Example
//!
//! ```no_run
//! use rs_geocode::ClientCredentials;
//! use rs_geocode::blocking::Client;
//!
//! fn main() -> rs_geocode::Result<()> {
//!     let client = Client::new(ClientCredentials::api_key("your-api-key"))?;
//!
//!     let resp = client.geocode_address("1600 Amphitheatre Parkway, Mountain View, CA")?;
//!     if let Some(location) = resp.first_location() {
//!         println!("{}, {}", location.lat, location.lng);
//!     }
//!     Ok(())
//! }
//! ```

use crate::config::ClientConfig;
use crate::credential::{ClientCredentials, CredentialProvider, EnvProvider};
use crate::error::{GeocodeError, Result};
use crate::exec::{check_status, prepare_url, signer_for};
use crate::request::GeocodeRequest;
use crate::response::{GeocodeResponse, parse_geocode_response};
use crate::sign::UrlSigner;

/// Synchronous client for the geocoding API.
pub struct Client {
    http: reqwest::blocking::Client,
    config: ClientConfig,
    credentials: ClientCredentials,
    signer: Option<UrlSigner>,
}

impl Client {
    /// Creates a new blocking client with explicit credentials.
    pub fn new(credentials: ClientCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Creates a new blocking client with custom configuration.
    pub fn with_config(credentials: ClientCredentials, config: ClientConfig) -> Result<Self> {
        let signer = signer_for(&credentials)?;

        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodeError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            credentials,
            signer,
        })
    }

    /// Creates a new blocking client from `GOOGLE_MAPS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let credentials = EnvProvider.resolve()?;
        Self::new(credentials)
    }

    /// Geocodes a single address.
    pub fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResponse> {
        let url = prepare_url(
            &self.config.endpoint,
            &self.credentials,
            self.signer.as_ref(),
            request,
        )?;

        tracing::debug!(
            region = request.region.as_deref().unwrap_or(""),
            signed = self.signer.is_some(),
            "dispatching blocking geocode request"
        );

        let response = self.http.get(&url).send()?;
        let status = response.status();
        let body = check_status(status, response.bytes()?.to_vec())?;

        parse_geocode_response(&body)
    }

    /// Geocodes `address` without a region bias.
    pub fn geocode_address(&self, address: &str) -> Result<GeocodeResponse> {
        self.geocode(&GeocodeRequest::new(address))
    }

    /// Geocodes `address`, biasing results towards `region`.
    pub fn geocode_in_region(&self, address: &str, region: &str) -> Result<GeocodeResponse> {
        self.geocode(&GeocodeRequest::new(address).with_region(region))
    }
}
