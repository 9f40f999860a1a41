//! The session store: singleton authentication state for the client.
//!
//! Holds the bearer token and display username, mirrors them into durable
//! storage under the fixed keys, and derives everything else (roles, expiry,
//! permissions) from the token at every read. The derived values are never
//! cached, so they cannot drift from the token they came from.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use autoguide_core::error::AppError;
use autoguide_core::result::AppResult;
use autoguide_core::traits::identity::{Credentials, IdentityProvider};
use autoguide_core::traits::storage::{SessionStorage, TOKEN_KEY, USERNAME_KEY, clear_session_keys};

use crate::access;
use crate::jwt::codec;

/// Snapshot of the current session.
///
/// Roles and expiry are computed from the token on access, never stored.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Opaque bearer token, or empty for no session.
    pub access_token: String,
    /// Display username co-persisted with the token.
    pub username: String,
}

impl Session {
    /// Lowercased realm roles carried by the token.
    pub fn roles(&self) -> Vec<String> {
        codec::realm_roles(&self.access_token)
    }

    /// Absolute expiry in epoch milliseconds, 0 when the token carries none.
    pub fn expires_at_ms(&self) -> i64 {
        codec::expires_at_ms(&self.access_token)
    }

    fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }
}

/// Process-wide authentication state, persisted to durable storage.
///
/// Construction reads the stored session back; all mutations mirror into
/// storage so a fresh store reproduces the same session. Apart from
/// [`SessionStore::set_session`], every operation degrades to the empty
/// session instead of raising, keeping the client resilient to stale or
/// malformed storage content.
#[derive(Debug)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    identity: Arc<dyn IdentityProvider>,
    state: RwLock<Session>,
}

impl SessionStore {
    /// Creates the store, adopting any still-valid session from storage.
    ///
    /// An absent or expired stored token clears storage and starts empty.
    pub fn new(storage: Arc<dyn SessionStorage>, identity: Arc<dyn IdentityProvider>) -> Self {
        let session = Self::read_stored_session(storage.as_ref());
        Self {
            storage,
            identity,
            state: RwLock::new(session),
        }
    }

    fn read_stored_session(storage: &dyn SessionStorage) -> Session {
        let token = storage.get(TOKEN_KEY).unwrap_or_default();
        if token.is_empty() || codec::is_expired(&token) {
            clear_session_keys(storage);
            return Session::default();
        }

        let username = storage.get(USERNAME_KEY).unwrap_or_default();
        debug!(user = %username, "Restored session from storage");
        Session {
            access_token: token,
            username,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a snapshot of the current session.
    pub fn session(&self) -> Session {
        self.read().clone()
    }

    /// Current display username (empty without a session).
    pub fn username(&self) -> String {
        self.read().username.clone()
    }

    /// Lowercased realm roles of the current token.
    pub fn roles(&self) -> Vec<String> {
        self.read().roles()
    }

    /// Commits a freshly obtained token and username.
    ///
    /// The only operation that signals an explicit error: an empty or
    /// already-expired token clears the session and fails, so the login
    /// caller can surface it.
    pub fn set_session(&self, access_token: &str, username: &str) -> AppResult<()> {
        if access_token.is_empty() || codec::is_expired(access_token) {
            self.logout();
            return Err(AppError::session(
                "Refusing to adopt an empty or expired token",
            ));
        }

        {
            let mut session = self.write();
            session.access_token = access_token.to_string();
            session.username = username.to_string();
        }
        self.storage.set(TOKEN_KEY, access_token);
        self.storage.set(USERNAME_KEY, username);

        info!(user = %username, "Session established");
        Ok(())
    }

    /// Idempotent refresh invoked before each navigation.
    ///
    /// Logs out when the current token has expired in the meantime; roles
    /// and expiry need no refresh since they are recomputed on every read.
    pub fn sync_session(&self) {
        let token = self.read().access_token.clone();
        if !token.is_empty() && codec::is_expired(&token) {
            warn!("Stored token expired, clearing session");
            self.logout();
        }
    }

    /// Boolean gate with cleanup: false (and logout) when the token is
    /// missing or expired.
    pub fn ensure_valid_session(&self) -> bool {
        let token = self.read().access_token.clone();
        if token.is_empty() || codec::is_expired(&token) {
            self.logout();
            return false;
        }
        true
    }

    /// Clears all in-memory fields and both storage keys. Idempotent.
    pub fn logout(&self) {
        *self.write() = Session::default();
        clear_session_keys(self.storage.as_ref());
    }

    /// Exchanges credentials at the identity provider and adopts the token.
    ///
    /// Provider rejections propagate to the caller unchanged.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<()> {
        let tokens = self.identity.login(credentials).await?;
        self.set_session(&tokens.access_token, &credentials.username)
    }

    /// Token present and not expired.
    pub fn has_token(&self) -> bool {
        let token = self.read().access_token.clone();
        !token.is_empty() && !codec::is_expired(&token)
    }

    /// Holds the super-admin realm role.
    pub fn has_super_admin_role(&self) -> bool {
        access::has_role(&self.roles(), access::SUPER_ADMIN_ROLE)
    }

    /// Holds the admin realm role.
    pub fn has_admin_role(&self) -> bool {
        access::has_role(&self.roles(), access::ADMIN_ROLE)
    }

    /// Holds the operator realm role.
    pub fn has_operator_role(&self) -> bool {
        access::has_role(&self.roles(), access::OPERATOR_ROLE)
    }

    /// Holds any staff role.
    pub fn is_backoffice_user(&self) -> bool {
        access::is_backoffice_user(&self.roles())
    }

    /// May list and create guests (admin or super-admin).
    pub fn can_manage_guests(&self) -> bool {
        access::can_manage_guests(&self.roles())
    }

    /// May manage rooms (admin only).
    pub fn can_manage_rooms(&self) -> bool {
        access::can_manage_rooms(&self.roles())
    }

    /// May manage hotels (super-admin only).
    pub fn can_manage_hotels(&self) -> bool {
        access::can_manage_hotels(&self.roles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Utc;
    use serde_json::json;

    use autoguide_core::traits::identity::TokenResponse;
    use autoguide_storage::memory::MemorySessionStorage;

    /// Identity provider stub returning a canned token or a failure.
    #[derive(Debug)]
    struct StubIdentity {
        token: Option<String>,
    }

    #[async_trait]
    impl IdentityProvider for StubIdentity {
        async fn login(&self, _credentials: &Credentials) -> AppResult<TokenResponse> {
            match &self.token {
                Some(token) => Ok(TokenResponse {
                    access_token: token.clone(),
                    expires_in: Some(3600),
                    refresh_token: None,
                    token_type: Some("Bearer".to_string()),
                }),
                None => Err(AppError::authentication("Invalid credentials")),
            }
        }
    }

    fn forge(roles: &[&str], exp_offset_seconds: i64) -> String {
        let exp = Utc::now().timestamp() + exp_offset_seconds;
        let claims = json!({"exp": exp, "realm_access": {"roles": roles}});
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{header}.{payload}.sig")
    }

    fn store_with(storage: Arc<MemorySessionStorage>, token: Option<String>) -> SessionStore {
        SessionStore::new(storage, Arc::new(StubIdentity { token }))
    }

    #[test]
    fn starts_empty_with_blank_storage() {
        let store = store_with(Arc::new(MemorySessionStorage::new()), None);
        assert!(!store.has_token());
        assert!(store.username().is_empty());
        assert!(store.roles().is_empty());
    }

    #[test]
    fn set_session_commits_memory_and_storage() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(storage.clone(), None);
        let token = forge(&["Admin"], 3600);

        store.set_session(&token, "alice").unwrap();

        assert!(store.has_token());
        assert_eq!(store.username(), "alice");
        assert!(store.has_admin_role());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some(token.as_str()));
        assert_eq!(storage.get(USERNAME_KEY).as_deref(), Some("alice"));
    }

    #[test]
    fn set_session_with_expired_token_fails_and_clears() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(storage.clone(), None);

        let err = store
            .set_session(&forge(&["admin"], -3600), "alice")
            .unwrap_err();
        assert_eq!(err.kind, autoguide_core::error::ErrorKind::Session);
        assert!(!store.has_token());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn set_session_with_empty_token_fails() {
        let store = store_with(Arc::new(MemorySessionStorage::new()), None);
        assert!(store.set_session("", "alice").is_err());
        assert!(!store.has_token());
    }

    #[test]
    fn round_trips_through_storage() {
        let storage = Arc::new(MemorySessionStorage::new());
        let token = forge(&["Operator"], 3600);
        {
            let store = store_with(storage.clone(), None);
            store.set_session(&token, "bob").unwrap();
        }

        let fresh = store_with(storage, None);
        let session = fresh.session();
        assert_eq!(session.access_token, token);
        assert_eq!(session.username, "bob");
        assert_eq!(session.roles(), ["operator"]);
        assert_eq!(session.expires_at_ms(), codec::expires_at_ms(&token));
    }

    #[test]
    fn expired_stored_token_is_cleared_on_construction() {
        let storage = Arc::new(MemorySessionStorage::new());
        storage.set(TOKEN_KEY, &forge(&["admin"], -60));
        storage.set(USERNAME_KEY, "carol");

        let store = store_with(storage.clone(), None);
        assert!(!store.has_token());
        assert!(store.username().is_empty());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USERNAME_KEY).is_none());
    }

    #[test]
    fn sync_session_logs_out_expired_tokens() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(storage.clone(), None);
        // Swap an already-expired token in under the store, then sync.
        store.set_session(&forge(&["admin"], 3600), "dave").unwrap();
        storage.set(TOKEN_KEY, &forge(&["admin"], -1));
        {
            let mut session = store.write();
            session.access_token = storage.get(TOKEN_KEY).unwrap();
        }

        store.sync_session();
        assert!(!store.has_token());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn ensure_valid_session_is_a_gate_with_cleanup() {
        let storage = Arc::new(MemorySessionStorage::new());
        let store = store_with(storage.clone(), None);
        assert!(!store.ensure_valid_session());

        store.set_session(&forge(&[], 3600), "erin").unwrap();
        assert!(store.ensure_valid_session());
    }

    #[test]
    fn logout_is_idempotent() {
        let store = store_with(Arc::new(MemorySessionStorage::new()), None);
        store.set_session(&forge(&["admin"], 3600), "frank").unwrap();
        store.logout();
        store.logout();
        assert!(!store.has_token());
    }

    #[tokio::test]
    async fn login_adopts_the_provider_token() {
        let storage = Arc::new(MemorySessionStorage::new());
        let token = forge(&["SUPER_ADMIN"], 3600);
        let store = store_with(storage.clone(), Some(token.clone()));

        store
            .login(&Credentials {
                username: "grace".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert!(store.has_token());
        assert!(store.has_super_admin_role());
        assert!(store.can_manage_hotels());
        assert!(!store.can_manage_rooms());
        assert_eq!(storage.get(USERNAME_KEY).as_deref(), Some("grace"));
    }

    #[tokio::test]
    async fn login_failure_propagates() {
        let store = store_with(Arc::new(MemorySessionStorage::new()), None);
        let err = store
            .login(&Credentials {
                username: "mallory".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, autoguide_core::error::ErrorKind::Authentication);
        assert!(!store.has_token());
    }
}
