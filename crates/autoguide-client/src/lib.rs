//! # autoguide-client
//!
//! Networking and navigation for the AutoGuide back office.
//!
//! ## Modules
//!
//! - `http`: the request pipeline: bearer injection outbound, 401 handling
//!   and single-flight login redirect inbound
//! - `identity`: Keycloak password-grant client and registration URL builder
//! - `router`: route table metadata, the navigator, and the navigation guard
//! - `api`: typed pass-through calls to the AutoGuide REST backend

pub mod api;
pub mod http;
pub mod identity;
pub mod router;

pub use http::RequestPipeline;
pub use identity::KeycloakClient;
pub use router::{GuardDecision, NavigationGuard, Navigator, RouteName};
