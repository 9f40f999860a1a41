//! Identity provider trait abstracting the Keycloak token endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Username/password credentials for the password-grant login flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Token endpoint response.
///
/// Only `access_token` is consumed by the session store; the remaining
/// fields are carried through for completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The bearer token to attach to API requests.
    pub access_token: String,
    /// Access token lifetime in seconds, when the provider reports one.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Refresh token, when the provider issues one.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token type, normally `"Bearer"`.
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Trait for the external identity provider.
///
/// Defined here so the session store does not depend on the HTTP client
/// crate; implemented by the Keycloak client in `autoguide-client`.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange credentials for a token. Any rejection is a login failure.
    async fn login(&self, credentials: &Credentials) -> AppResult<TokenResponse>;
}
