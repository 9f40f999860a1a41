//! Identity provider clients.

pub mod keycloak;

pub use keycloak::KeycloakClient;
