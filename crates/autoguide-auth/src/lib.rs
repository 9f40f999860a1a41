//! # autoguide-auth
//!
//! Client-side authentication state for the AutoGuide back office.
//!
//! ## Modules
//!
//! - `jwt`: signature-blind bearer token claims inspection (roles, expiry)
//! - `session`: session state persisted through durable storage
//! - `access`: role predicates and back-office permission aggregates

pub mod access;
pub mod jwt;
pub mod session;

pub use access::Permissions;
pub use jwt::codec;
pub use session::SessionStore;
