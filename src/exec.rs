//! Common execution utilities for async and blocking clients.

use crate::credential::ClientCredentials;
use crate::error::{GeocodeError, MAX_ERROR_BODY_CHARS, Result, truncate_str};
use crate::request::{GeocodeRequest, build_url};
use crate::sign::UrlSigner;

/// Decodes the signing secret once, if the credentials carry one.
pub(crate) fn signer_for(credentials: &ClientCredentials) -> Result<Option<UrlSigner>> {
    credentials
        .signing_secret()
        .map(|secret| UrlSigner::new(secret.expose()))
        .transpose()
}

/// Builds the final URL for `request`, appending `&signature=` when a
/// signer is configured.
pub(crate) fn prepare_url(
    endpoint: &str,
    credentials: &ClientCredentials,
    signer: Option<&UrlSigner>,
    request: &GeocodeRequest,
) -> Result<String> {
    let url = build_url(endpoint, credentials, request)?;
    match signer {
        Some(signer) => signer.append_signature(&url),
        None => Ok(url),
    }
}

/// Passes successful bodies through; turns any other status into [`GeocodeError::Http`].
pub(crate) fn check_status(status: reqwest::StatusCode, body: Vec<u8>) -> Result<Vec<u8>> {
    if status.is_success() {
        tracing::debug!(%status, bytes = body.len(), "geocode response received");
        return Ok(body);
    }

    let text = String::from_utf8_lossy(&body);
    tracing::warn!(%status, "geocode request returned unsuccessful status");
    Err(GeocodeError::Http(format!(
        "HTTP {} with body: {}",
        status,
        truncate_str(&text, MAX_ERROR_BODY_CHARS)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;

    #[test]
    fn prepare_url_unsigned_for_api_key() {
        let creds = ClientCredentials::api_key("AIzaTest");
        let signer = signer_for(&creds).unwrap();
        assert!(signer.is_none());

        let url = prepare_url(
            DEFAULT_ENDPOINT,
            &creds,
            signer.as_ref(),
            &GeocodeRequest::new("Paris"),
        )
        .unwrap();
        assert!(!url.contains("signature="));
    }

    #[test]
    fn prepare_url_signed_for_client_secret() {
        let creds = ClientCredentials::client_secret("gme-test", "vNIXE0xscrmjlyV-12Nj_BvUPaw=");
        let signer = signer_for(&creds).unwrap();

        let url = prepare_url(
            DEFAULT_ENDPOINT,
            &creds,
            signer.as_ref(),
            &GeocodeRequest::new("1600 Amphitheatre Parkway, Mountain View, CA").with_region("us"),
        )
        .unwrap();
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/geocode/json?client=gme-test&address=1600%20Amphitheatre%20Parkway%2C%20Mountain%20View%2C%20CA&region=us&signature=ZIkh3aXo7kzR_8nEJ2AIfmAIBE0="
        );
    }

    #[test]
    fn signer_for_malformed_secret() {
        let creds = ClientCredentials::client_secret("gme-test", "%%%");
        assert!(matches!(
            signer_for(&creds),
            Err(GeocodeError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn check_status_passes_success() {
        let body = check_status(reqwest::StatusCode::OK, b"{}".to_vec()).unwrap();
        assert_eq!(body, b"{}");
    }

    #[test]
    fn check_status_rejects_server_error() {
        let err = check_status(reqwest::StatusCode::BAD_GATEWAY, b"Bad Gateway".to_vec())
            .unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn check_status_truncates_long_body() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS * 2);
        let err = check_status(reqwest::StatusCode::FORBIDDEN, body.into_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.len() < MAX_ERROR_BODY_CHARS + 50);
    }
}
