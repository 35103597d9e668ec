use std::env;

use crate::error::{GeocodeError, Result};

/// Environment variable holding a standard API key.
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
/// Environment variable holding a premium client id.
pub const CLIENT_ID_ENV: &str = "GOOGLE_MAPS_CLIENT_ID";
/// Environment variable holding the URL-safe base64 signing secret.
pub const SIGNING_SECRET_ENV: &str = "GOOGLE_MAPS_SIGNING_SECRET";

/// URL-safe base64 signing secret paired with a client id.
///
/// The `Debug` implementation redacts the value to prevent accidental
/// leakage in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret(String);

impl SigningSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the secret exactly as configured (URL-safe alphabet).
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(****)")
    }
}

/// How requests authenticate against the geocoding API.
///
/// Exactly one mode is active; an API key can never be combined with a
/// client id and signing secret.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum ClientCredentials {
    /// No credentials; the provider throttles these requests aggressively.
    #[default]
    Anonymous,
    /// Standard API key sent as the `key` parameter.
    ApiKey(String),
    /// Premium client id sent as `client`, with every URL signed by `secret`.
    ClientSecret {
        client_id: String,
        secret: SigningSecret,
    },
}

impl ClientCredentials {
    /// Creates API key credentials.
    pub fn api_key(key: impl Into<String>) -> Self {
        ClientCredentials::ApiKey(key.into())
    }

    /// Creates client id + signing secret credentials.
    pub fn client_secret(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        ClientCredentials::ClientSecret {
            client_id: client_id.into(),
            secret: SigningSecret::new(secret),
        }
    }

    /// Combines loosely configured values into a single credential mode.
    ///
    /// Empty strings are treated as absent. Fails with
    /// [`GeocodeError::Configuration`] when an API key is combined with a
    /// client id or secret, or when a client id and secret are not given
    /// together.
    pub fn from_parts(
        api_key: Option<String>,
        client_id: Option<String>,
        secret: Option<String>,
    ) -> Result<Self> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        match (non_empty(api_key), non_empty(client_id), non_empty(secret)) {
            (None, None, None) => Ok(ClientCredentials::Anonymous),
            (Some(key), None, None) => Ok(ClientCredentials::ApiKey(key)),
            (None, Some(client_id), Some(secret)) => {
                Ok(ClientCredentials::client_secret(client_id, secret))
            }
            (Some(_), _, _) => Err(GeocodeError::Configuration(
                "an API key cannot be combined with a client id or signing secret".into(),
            )),
            (None, Some(_), None) => Err(GeocodeError::Configuration(
                "a client id requires a signing secret".into(),
            )),
            (None, None, Some(_)) => Err(GeocodeError::Configuration(
                "a signing secret requires a client id".into(),
            )),
        }
    }

    /// Returns the signing secret, present only in client/secret mode.
    pub fn signing_secret(&self) -> Option<&SigningSecret> {
        match self {
            ClientCredentials::ClientSecret { secret, .. } => Some(secret),
            _ => None,
        }
    }

    /// Returns `true` when no credentials are configured.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, ClientCredentials::Anonymous)
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientCredentials::Anonymous => f.write_str("Anonymous"),
            ClientCredentials::ApiKey(_) => f.debug_tuple("ApiKey").field(&"****").finish(),
            ClientCredentials::ClientSecret { client_id, secret } => f
                .debug_struct("ClientSecret")
                .field("client_id", client_id)
                .field("secret", secret)
                .finish(),
        }
    }
}

/// Resolves [`ClientCredentials`] from a specific source.
pub trait CredentialProvider {
    /// Attempt to resolve credentials from this provider.
    fn resolve(&self) -> Result<ClientCredentials>;
}

/// Provides credentials from explicitly specified values.
pub struct StaticProvider {
    credentials: ClientCredentials,
}

impl StaticProvider {
    pub fn new(credentials: ClientCredentials) -> Self {
        Self { credentials }
    }
}

impl CredentialProvider for StaticProvider {
    fn resolve(&self) -> Result<ClientCredentials> {
        Ok(self.credentials.clone())
    }
}

/// Provides credentials from environment variables.
///
/// Reads `GOOGLE_MAPS_API_KEY`, `GOOGLE_MAPS_CLIENT_ID` and
/// `GOOGLE_MAPS_SIGNING_SECRET`. When none are set the result is
/// [`ClientCredentials::Anonymous`].
pub struct EnvProvider;

impl EnvProvider {
    fn resolve_with<F>(lookup: F) -> Result<ClientCredentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        ClientCredentials::from_parts(
            lookup(API_KEY_ENV),
            lookup(CLIENT_ID_ENV),
            lookup(SIGNING_SECRET_ENV),
        )
        .map_err(|e| match e {
            GeocodeError::Configuration(msg) => GeocodeError::Configuration(format!(
                "{} (check {}, {} and {})",
                msg, API_KEY_ENV, CLIENT_ID_ENV, SIGNING_SECRET_ENV
            )),
            other => other,
        })
    }
}

impl CredentialProvider for EnvProvider {
    fn resolve(&self) -> Result<ClientCredentials> {
        Self::resolve_with(|name| env::var(name).ok())
    }
}
