//! Collaborator traits defined in `autoguide-core` and implemented by other crates.

pub mod identity;
pub mod storage;

pub use identity::{Credentials, IdentityProvider, TokenResponse};
pub use storage::{SessionStorage, TOKEN_KEY, USERNAME_KEY};
