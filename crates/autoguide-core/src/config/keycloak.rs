//! Keycloak identity provider configuration.

use serde::{Deserialize, Serialize};

/// Keycloak connection configuration for the password-grant login flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    /// Base URL of the Keycloak deployment (e.g., `http://localhost:8081/keycloak`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Realm name.
    #[serde(default = "default_realm")]
    pub realm: String,
    /// OIDC client ID used for the token endpoint.
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            realm: default_realm(),
            client_id: default_client_id(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8081/keycloak".to_string()
}

fn default_realm() -> String {
    "autoguide".to_string()
}

fn default_client_id() -> String {
    "autoguide-api".to_string()
}
