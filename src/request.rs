//! Request URL construction for the geocoding API.

use crate::credential::ClientCredentials;
use crate::error::{GeocodeError, Result};
use crate::sign::percent_encode;

/// A single geocoding lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    /// Postal address to geocode.
    pub address: String,
    /// Region bias as a ccTLD code (e.g. `"us"`, `"es"`).
    pub region: Option<String>,
}

impl GeocodeRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            region: None,
        }
    }

    /// Biases results towards a region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Checks that the address is present.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(GeocodeError::InvalidArgument(
                "address must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Region code, if one is set and not blank.
    fn effective_region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// Ordered query parameters.
///
/// Serialization order equals insertion order. Signed URLs depend on it:
/// the signature covers the literal query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes as `k1=v1&k2=v2`, percent-encoding every value.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the serialized parameters to `endpoint`.
    ///
    /// The first parameter is joined with `?`, or with `&` when the endpoint
    /// already carries a query.
    pub fn append_to(&self, endpoint: &str) -> String {
        if self.is_empty() {
            return endpoint.to_string();
        }
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", endpoint, separator, self.to_query_string())
    }
}

/// Collects the query parameters in the order the provider expects.
///
/// 1. `key` (API key mode) or `client` (client/secret mode)
/// 2. `address`
/// 3. `region`, only when non-blank
pub(crate) fn query_params(
    credentials: &ClientCredentials,
    request: &GeocodeRequest,
) -> Result<QueryParams> {
    request.validate()?;

    let mut params = QueryParams::new();
    match credentials {
        ClientCredentials::ApiKey(key) => params.push("key", key.as_str()),
        ClientCredentials::ClientSecret { client_id, .. } => {
            params.push("client", client_id.as_str())
        }
        ClientCredentials::Anonymous => {}
    }
    params.push("address", request.address.as_str());
    if let Some(region) = request.effective_region() {
        params.push("region", region);
    }
    Ok(params)
}

/// Builds the unsigned request URL.
///
/// # Errors
///
/// Returns [`GeocodeError::InvalidArgument`] if the address is empty.
pub fn build_url(
    endpoint: &str,
    credentials: &ClientCredentials,
    request: &GeocodeRequest,
) -> Result<String> {
    Ok(query_params(credentials, request)?.append_to(endpoint))
}
