use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::{Position, Url};

use crate::error::{GeocodeError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Percent-encodes a query component (RFC 3986 data-string escaping).
///
/// Unreserved characters (A-Z, a-z, 0-9, '-', '.', '_', '~') are NOT encoded.
/// All other bytes of the UTF-8 encoding become `%XX` (uppercase hex).
/// Spaces become `%20` (NOT `+`).
pub fn percent_encode(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    encoded
}

/// Signs request URLs with a decoded URL-safe base64 signing secret.
///
/// The secret is decoded once in [`UrlSigner::new`]; every call to
/// [`UrlSigner::sign`] reuses the raw key bytes. The key material is never
/// printed by `Debug`.
#[derive(Clone)]
pub struct UrlSigner {
    key: Vec<u8>,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner").field("key", &"****").finish()
    }
}

impl UrlSigner {
    /// Decodes a URL-safe base64 secret (`-`/`_` alphabet) into key bytes.
    pub fn new(secret: &str) -> Result<Self> {
        Ok(Self {
            key: decode_secret(secret)?,
        })
    }

    /// Computes the URL-safe signature over the path and query of `url`.
    ///
    /// Steps:
    /// 1. Extract path + query exactly as sent on the wire.
    /// 2. HMAC-SHA1 over the ASCII bytes with the decoded key.
    /// 3. Standard base64 encode (padding kept).
    /// 4. Translate to the URL-safe alphabet (`+` -> `-`, `/` -> `_`).
    pub fn sign(&self, url: &str) -> Result<String> {
        let resource = path_and_query(url)?;

        let mut mac = HmacSha1::new_from_slice(&self.key)
            .map_err(|e| GeocodeError::InvalidCredentials(format!("HMAC key error: {}", e)))?;
        mac.update(resource.as_bytes());
        let digest = mac.finalize().into_bytes();

        Ok(to_url_safe(&BASE64.encode(digest)))
    }

    /// Returns `url` with `&signature=<value>` appended.
    pub fn append_signature(&self, url: &str) -> Result<String> {
        let signature = self.sign(url)?;
        Ok(format!("{}&signature={}", url, signature))
    }
}

/// Signs `url` with a URL-safe base64 `secret` in one step.
///
/// Equivalent to `UrlSigner::new(secret)?.sign(url)`.
pub fn sign_url(secret: &str, url: &str) -> Result<String> {
    UrlSigner::new(secret)?.sign(url)
}

fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    let standard = secret.replace('-', "+").replace('_', "/");
    let key = BASE64.decode(standard.as_bytes()).map_err(|e| {
        GeocodeError::InvalidCredentials(format!("signing secret is not valid base64: {}", e))
    })?;
    if key.is_empty() {
        return Err(GeocodeError::InvalidCredentials(
            "signing secret is empty".into(),
        ));
    }
    Ok(key)
}

fn to_url_safe(encoded: &str) -> String {
    encoded.replace('+', "-").replace('/', "_")
}

/// Extracts everything from the first `/` after the host through the end of the query.
fn path_and_query(url: &str) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| GeocodeError::InvalidArgument(format!("cannot sign URL '{}': {}", url, e)))?;
    Ok(parsed[Position::BeforePath..Position::AfterQuery].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_SECRET: &str = "vNIXE0xscrmjlyV-12Nj_BvUPaw=";

    #[test]
    fn percent_encode_unreserved_chars() {
        assert_eq!(percent_encode("abcXYZ019"), "abcXYZ019");
        assert_eq!(percent_encode("-._~"), "-._~");
    }

    #[test]
    fn percent_encode_spaces() {
        assert_eq!(percent_encode("1600 Amphitheatre"), "1600%20Amphitheatre");
    }

    #[test]
    fn percent_encode_reserved_chars() {
        assert_eq!(percent_encode("/"), "%2F");
        assert_eq!(percent_encode("="), "%3D");
        assert_eq!(percent_encode("&"), "%26");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode(","), "%2C");
        assert_eq!(percent_encode("#"), "%23");
    }

    #[test]
    fn percent_encode_non_ascii() {
        assert_eq!(percent_encode("Zürich"), "Z%C3%BCrich");
    }

    #[test]
    fn sign_known_vector() {
        let url = "https://maps.googleapis.com/maps/api/geocode/json?address=New+York&client=clientID";
        let sig = sign_url(EXAMPLE_SECRET, url).unwrap();
        assert_eq!(sig, "chaRF2hTJKOScPr-RQCEhZbSzIE=");
    }

    #[test]
    fn sign_covers_only_path_and_query() {
        let signer = UrlSigner::new(EXAMPLE_SECRET).unwrap();
        let a = signer
            .sign("https://maps.googleapis.com/maps/api/geocode/json?address=New+York&client=clientID")
            .unwrap();
        let b = signer
            .sign("http://localhost:1234/maps/api/geocode/json?address=New+York&client=clientID")
            .unwrap();
        assert_eq!(a, b, "host and scheme are not part of the signed message");
    }

    #[test]
    fn sign_is_deterministic() {
        let url = "https://maps.googleapis.com/maps/api/geocode/json?client=gme-test&address=Paris";
        let sig1 = sign_url(EXAMPLE_SECRET, url).unwrap();
        let sig2 = sign_url(EXAMPLE_SECRET, url).unwrap();
        assert_eq!(sig1, sig2, "signature must be deterministic");
    }

    #[test]
    fn sign_uses_url_safe_alphabet() {
        let signer = UrlSigner::new(EXAMPLE_SECRET).unwrap();
        for address in ["Paris", "Berlin", "New%20York", "Tokyo", "S%C3%A3o%20Paulo", "Lagos"] {
            let url = format!(
                "https://maps.googleapis.com/maps/api/geocode/json?client=gme-test&address={}",
                address
            );
            let sig = signer.sign(&url).unwrap();
            assert!(!sig.is_empty());
            assert!(
                sig.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='),
                "unexpected character in {}",
                sig
            );
        }
    }

    #[test]
    fn sign_different_urls_differ() {
        let signer = UrlSigner::new(EXAMPLE_SECRET).unwrap();
        let a = signer
            .sign("https://maps.googleapis.com/maps/api/geocode/json?client=c&address=Paris")
            .unwrap();
        let b = signer
            .sign("https://maps.googleapis.com/maps/api/geocode/json?client=c&address=Berlin")
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn append_signature_appends_signature() {
        let signer = UrlSigner::new(EXAMPLE_SECRET).unwrap();
        let url = "https://maps.googleapis.com/maps/api/geocode/json?address=New+York&client=clientID";
        let signed = signer.append_signature(url).unwrap();
        assert_eq!(
            signed,
            format!("{}&signature=chaRF2hTJKOScPr-RQCEhZbSzIE=", url)
        );
    }

    #[test]
    fn malformed_secret_is_invalid_credentials() {
        for secret in ["not base64!!", "abc", "****"] {
            match UrlSigner::new(secret) {
                Err(GeocodeError::InvalidCredentials(_)) => {}
                other => panic!("expected InvalidCredentials for {:?}, got {:?}", secret, other),
            }
        }
    }

    #[test]
    fn empty_secret_is_invalid_credentials() {
        let result = sign_url("", "https://example.com/geocode/json?address=x");
        assert!(matches!(result, Err(GeocodeError::InvalidCredentials(_))));
    }

    #[test]
    fn standard_alphabet_secret_is_accepted() {
        // "+" and "/" survive the translation unchanged.
        let url_safe = UrlSigner::new(EXAMPLE_SECRET).unwrap();
        let standard = UrlSigner::new("vNIXE0xscrmjlyV+12Nj/BvUPaw=").unwrap();
        let url = "https://maps.googleapis.com/maps/api/geocode/json?address=New+York&client=clientID";
        assert_eq!(url_safe.sign(url).unwrap(), standard.sign(url).unwrap());
    }

    #[test]
    fn unparseable_url_is_invalid_argument() {
        let signer = UrlSigner::new(EXAMPLE_SECRET).unwrap();
        let result = signer.sign("/maps/api/geocode/json?address=x");
        assert!(matches!(result, Err(GeocodeError::InvalidArgument(_))));
    }

    #[test]
    fn debug_redacts_key() {
        let signer = UrlSigner::new(EXAMPLE_SECRET).unwrap();
        let debug = format!("{:?}", signer);
        assert!(debug.contains("****"));
    }
}
