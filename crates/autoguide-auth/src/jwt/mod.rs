//! Bearer token claims inspection.

pub mod codec;

pub use codec::{EXPIRY_SKEW_MS, decode_payload, expires_at_ms, is_expired, realm_roles};
