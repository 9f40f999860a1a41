//! Durable session storage trait for pluggable key-value backends.

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "ag_access_token";

/// Storage key holding the display username.
pub const USERNAME_KEY: &str = "ag_username";

/// Trait for the durable key-value store backing the session.
///
/// Only two keys are ever used ([`TOKEN_KEY`] and [`USERNAME_KEY`]); absence
/// of either key is equivalent to "no session". The trait is defined here in
/// `autoguide-core` and implemented in `autoguide-storage`, so tests can swap
/// the file-backed store for an in-memory fake.
///
/// Operations are synchronous: the backing store is local, and access within
/// one client process is effectively serial (last write wins).
pub trait SessionStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value for a key, overwriting any previous value.
    fn set(&self, key: &str, value: &str);

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Removes both session keys from storage.
pub fn clear_session_keys(storage: &dyn SessionStorage) {
    storage.remove(TOKEN_KEY);
    storage.remove(USERNAME_KEY);
}
