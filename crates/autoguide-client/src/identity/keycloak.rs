//! Keycloak password-grant client.
//!
//! Talks directly to the realm's OIDC token endpoint; the backend never
//! proxies logins. Registration is handed off to Keycloak's hosted page.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use autoguide_core::config::keycloak::KeycloakConfig;
use autoguide_core::error::AppError;
use autoguide_core::result::AppResult;
use autoguide_core::traits::identity::{Credentials, IdentityProvider, TokenResponse};

/// Options for building the hosted registration URL.
#[derive(Debug, Clone, Default)]
pub struct RegistrationOptions {
    /// Destination to return to after login, defaults to `/`.
    pub next: Option<String>,
    /// Pre-filled username/email hint.
    pub login_hint: Option<String>,
}

/// Client for the Keycloak realm configured for AutoGuide.
#[derive(Debug, Clone)]
pub struct KeycloakClient {
    client: reqwest::Client,
    config: KeycloakConfig,
}

impl KeycloakClient {
    /// Creates a client from Keycloak configuration.
    pub fn new(config: KeycloakConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client, config })
    }

    fn realm_endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.realm,
            suffix
        )
    }

    /// Builds the hosted registration URL, carrying a `redirect_uri` back to
    /// the login view with the intended destination preserved.
    pub fn registration_url(&self, origin: &str, options: &RegistrationOptions) -> String {
        let next = options
            .next
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("/");
        let redirect_uri = format!(
            "{}/login?next={}",
            origin.trim_end_matches('/'),
            urlencoding::encode(next)
        );

        let mut params = vec![
            ("client_id", self.config.client_id.clone()),
            ("response_type", "code".to_string()),
            ("scope", "openid".to_string()),
            ("redirect_uri", redirect_uri),
        ];
        if let Some(hint) = options.login_hint.as_deref().map(str::trim) {
            if !hint.is_empty() {
                params.push(("login_hint", hint.to_string()));
            }
        }

        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{query}", self.realm_endpoint("registrations"))
    }
}

#[async_trait]
impl IdentityProvider for KeycloakClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<TokenResponse> {
        let endpoint = self.realm_endpoint("token");
        debug!(user = %credentials.username, "Requesting token from Keycloak");

        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = self.client.post(&endpoint).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_description(&body)
                .unwrap_or_else(|| "Login rejected by the identity provider".to_string());
            return Err(AppError::authentication(detail).with_status(status.as_u16()));
        }

        let tokens: TokenResponse = response.json().await?;
        info!(user = %credentials.username, "Keycloak login succeeded");
        Ok(tokens)
    }
}

/// Keycloak reports failures as `{"error": ..., "error_description": ...}`.
fn error_description(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error_description")
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> KeycloakClient {
        KeycloakClient::new(KeycloakConfig {
            base_url: "http://localhost:8081/keycloak".to_string(),
            realm: "autoguide".to_string(),
            client_id: "autoguide-api".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn registration_url_defaults_next_to_root() {
        let url =
            client().registration_url("http://localhost:5173", &RegistrationOptions::default());
        // The `next` inside redirect_uri is encoded once when the redirect
        // URI is built and again as a query parameter value.
        assert_eq!(
            url,
            "http://localhost:8081/keycloak/realms/autoguide/protocol/openid-connect/registrations\
             ?client_id=autoguide-api&response_type=code&scope=openid\
             &redirect_uri=http%3A%2F%2Flocalhost%3A5173%2Flogin%3Fnext%3D%252F"
        );
    }

    #[test]
    fn registration_url_carries_next_and_login_hint() {
        let url = client().registration_url(
            "http://localhost:5173",
            &RegistrationOptions {
                next: Some("/bookings".to_string()),
                login_hint: Some("  alice@example.com  ".to_string()),
            },
        );
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A5173%2Flogin%3Fnext%3D%252Fbookings"
        ));
        assert!(url.ends_with("&login_hint=alice%40example.com"));
    }

    #[test]
    fn blank_next_falls_back_to_root() {
        let url = client().registration_url(
            "http://localhost:5173",
            &RegistrationOptions {
                next: Some("   ".to_string()),
                login_hint: None,
            },
        );
        assert!(url.ends_with("next%3D%252F"));
    }

    #[test]
    fn error_description_prefers_the_description_field() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid user credentials"}"#;
        assert_eq!(
            error_description(body).as_deref(),
            Some("Invalid user credentials")
        );
        assert_eq!(
            error_description(r#"{"error":"invalid_client"}"#).as_deref(),
            Some("invalid_client")
        );
        assert_eq!(error_description("not json"), None);
    }
}
