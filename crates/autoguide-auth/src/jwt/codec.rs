//! Signature-blind inspection of a bearer token's embedded claims.
//!
//! The middle segment of the token is base64url-encoded JSON. Nothing here
//! verifies a signature: the decoded claims are a client-side hint for
//! routing and display, and the backend enforces real authorization. Every
//! decode failure degrades to an empty default instead of an error.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use serde_json::Value;

/// Safety margin subtracted from token expiry to absorb clock drift.
pub const EXPIRY_SKEW_MS: i64 = 30_000;

/// Decodes the claims payload of a token.
///
/// Splits on `.`, takes the second segment, reverses the base64url
/// transformation (`-`→`+`, `_`→`/`, `=`-pad to a multiple of four) and
/// parses the result as JSON. Returns `None` on a missing segment, invalid
/// base64, or invalid JSON.
pub fn decode_payload(token: &str) -> Option<Value> {
    let segment = token.split('.').nth(1)?;
    if segment.is_empty() {
        return None;
    }

    let normalized = segment.replace('-', "+").replace('_', "/");
    let padded = match normalized.len() % 4 {
        0 => normalized,
        rem => format!("{normalized}{}", "=".repeat(4 - rem)),
    };

    let bytes = STANDARD.decode(padded).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extracts `realm_access.roles`, lowercased.
///
/// Non-array roles yield an empty list; non-string entries are dropped.
/// Source order is preserved and duplicates are kept.
pub fn realm_roles(token: &str) -> Vec<String> {
    let Some(claims) = decode_payload(token) else {
        return Vec::new();
    };

    let Some(roles) = claims
        .get("realm_access")
        .and_then(|access| access.get("roles"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    roles
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_lowercase)
        .collect()
}

/// Extracts the `exp` claim as absolute epoch milliseconds.
///
/// Returns 0 when `exp` is absent or not a number. A zero expiry is treated
/// as non-expiring by [`is_expired`]; the deployed realm always sets `exp`,
/// so this only shows up for hand-crafted tokens.
pub fn expires_at_ms(token: &str) -> i64 {
    decode_payload(token)
        .as_ref()
        .and_then(|claims| claims.get("exp"))
        .and_then(Value::as_f64)
        .map(|exp| (exp * 1000.0) as i64)
        .unwrap_or(0)
}

/// Checks expiry against an explicit clock reading.
pub fn is_expired_at(token: &str, now_ms: i64) -> bool {
    let expires = expires_at_ms(token);
    if expires == 0 {
        return false;
    }
    now_ms >= expires - EXPIRY_SKEW_MS
}

/// Checks expiry against the system clock.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now().timestamp_millis())
}
