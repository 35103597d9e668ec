//! Google Maps Geocoding API client for Rust.
//!
//! Supports all three authentication modes of the API:
//!
//! - anonymous requests (heavily throttled by the provider)
//! - a standard API key (`key=` parameter)
//! - a premium client id with a URL signing secret (`client=` + `signature=`)
//!
//! Signing follows the provider's URL signing scheme: HMAC-SHA1 over the
//! request path and query, keyed with the URL-safe base64 secret, and
//! encoded back to URL-safe base64. See [`UrlSigner`].
//!
//! # Quick Start (async)
//!
//! ```no_run
//! use rs_geocode::{Client, ClientCredentials, GeocodeRequest};
//!
//! # async fn example() -> rs_geocode::Result<()> {
//! let client = Client::new(ClientCredentials::client_secret(
//!     "gme-your-client-id",
//!     "your-url-safe-base64-secret=",
//! ))?;
//!
//! let resp = client
//!     .geocode(&GeocodeRequest::new("1600 Amphitheatre Parkway, Mountain View, CA").with_region("us"))
//!     .await?
//!     .error_for_status()?;
//!
//! for result in &resp.results {
//!     println!("{} -> {:?}", result.formatted_address, result.geometry.location);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod request;
pub mod response;
pub mod sign;
pub mod transport;

#[cfg(feature = "blocking")]
pub mod blocking;

mod exec;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use credential::{ClientCredentials, CredentialProvider, EnvProvider, SigningSecret};
pub use error::{GeocodeError, Result};
pub use request::{GeocodeRequest, QueryParams, build_url};
pub use response::{
    AddressComponent, ApiStatus, Bounds, GeocodeResponse, GeocodeResult, Geometry, LatLng,
    parse_geocode_response,
};
pub use sign::{UrlSigner, percent_encode, sign_url};
pub use transport::{HttpTransport, Transport};

// Compile-time assertions: key types must be Send + Sync for use across threads.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Client>;
    let _ = assert_send_sync::<GeocodeError>;
    let _ = assert_send_sync::<ClientCredentials>;
    let _ = assert_send_sync::<UrlSigner>;
};
