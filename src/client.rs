use crate::config::ClientConfig;
use crate::credential::{ClientCredentials, CredentialProvider, EnvProvider};
use crate::error::Result;
use crate::exec::{prepare_url, signer_for};
use crate::request::GeocodeRequest;
use crate::response::{GeocodeResponse, parse_geocode_response};
use crate::sign::UrlSigner;
use crate::transport::{HttpTransport, Transport};

/// Async client for the geocoding API.
///
/// The client only holds immutable state, so a single instance can serve
/// any number of concurrent lookups.
pub struct Client<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
    credentials: ClientCredentials,
    signer: Option<UrlSigner>,
}

impl Client<HttpTransport> {
    /// Creates a new client with explicit credentials.
    pub fn new(credentials: ClientCredentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Creates a new client with explicit credentials and custom configuration.
    pub fn with_config(credentials: ClientCredentials, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(credentials, config, transport)
    }

    /// Creates a new client from `GOOGLE_MAPS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let credentials = EnvProvider.resolve()?;
        Self::new(credentials)
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over a custom [`Transport`].
    ///
    /// Fails with [`InvalidCredentials`](crate::GeocodeError::InvalidCredentials)
    /// if the signing secret is not valid URL-safe base64.
    pub fn with_transport(
        credentials: ClientCredentials,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self> {
        let signer = signer_for(&credentials)?;
        Ok(Self {
            transport,
            config,
            credentials,
            signer,
        })
    }

    /// Returns the configured credentials.
    pub fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Geocodes a single address.
    pub async fn geocode(&self, request: &GeocodeRequest) -> Result<GeocodeResponse> {
        let url = prepare_url(
            &self.config.endpoint,
            &self.credentials,
            self.signer.as_ref(),
            request,
        )?;

        tracing::debug!(
            region = request.region.as_deref().unwrap_or(""),
            signed = self.signer.is_some(),
            "dispatching geocode request"
        );

        let body = self.transport.send_get(&url).await?;
        parse_geocode_response(&body)
    }

    /// Geocodes `address` without a region bias.
    pub async fn geocode_address(&self, address: &str) -> Result<GeocodeResponse> {
        self.geocode(&GeocodeRequest::new(address)).await
    }

    /// Geocodes `address`, biasing results towards `region`.
    pub async fn geocode_in_region(&self, address: &str, region: &str) -> Result<GeocodeResponse> {
        self.geocode(&GeocodeRequest::new(address).with_region(region))
            .await
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
