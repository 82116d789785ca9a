//!
//! # Session Lifecycle
//!
//! This module owns the client's authentication state: the bearer token handed
//! out at login and the claims derived from it. The token is the single source
//! of truth; claims are always re-derived from it and never stored on their
//! own, so the two cannot drift apart.
//!
//! A session is created by `login` or restored from the token file at
//! construction, and destroyed by `logout`, by a token that fails to decode,
//! or by an expiry already in the past. Whenever the in-memory session is
//! destroyed the persisted token is cleared too, so a stale token never
//! survives a restart. None of the lifecycle calls return errors: a broken
//! token or a failed disk write degrades to the logged-out state and a log
//! line, which is all a hosting page can do about it anyway.

mod claims;
mod storage;

pub use claims::{derive_session, Claims};
pub use storage::TokenStorage;

use chrono::Utc;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    claims: Option<Claims>,
}

/// Owns the bearer token and the claims derived from it.
///
/// Shared behind an `Arc` between the request pipeline (which reads the token)
/// and the failure classifier (which may invalidate the session).
pub struct SessionStore {
    storage: TokenStorage,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Creates a store, restoring any previously persisted session.
    ///
    /// A missing token file yields a logged-out store. A stored token that no
    /// longer decodes, or whose expiry has passed, is discarded and the file
    /// cleared, exactly as if the problem had been noticed at login time.
    pub fn new(storage: TokenStorage) -> Self {
        let store = Self {
            storage,
            state: Mutex::new(SessionState::default()),
        };
        if let Some(token) = store.storage.load() {
            store.set_token(Some(token));
        }
        store
    }

    /// Establishes a session from a freshly issued token.
    ///
    /// Never fails from the caller's perspective. A storage write error is
    /// logged and the session continues in memory; a token that does not
    /// decode, or arrives already expired, degrades to the logged-out state.
    pub fn login(&self, token: &str) {
        log::info!("Establishing session");
        if let Err(e) = self.storage.save(token) {
            log::warn!(
                "Failed to persist token to {}: {}",
                self.storage.path().display(),
                e
            );
        }
        self.set_token(Some(token.to_string()));
    }

    /// Ends the session, clearing both memory and storage. Idempotent.
    pub fn logout(&self) {
        log::info!("Ending session");
        self.set_token(None);
    }

    /// Returns the claims of the current session, if one exists.
    pub fn current_claims(&self) -> Option<Claims> {
        self.state.lock().unwrap().claims.clone()
    }

    /// Returns the raw bearer token, if a session exists. The request
    /// pipeline reads it here for the Authorization header.
    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    /// True when a session exists and its expiry is still in the future at
    /// the moment of the call. Pure observation: an expired session is not
    /// torn down here, only reported.
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.lock().unwrap();
        match &state.claims {
            Some(claims) => !claims.is_expired(Utc::now()),
            None => false,
        }
    }

    // The single transition point for session state. `None`, an undecodable
    // token, and an expired token all land in the logged-out state with the
    // token file cleared. The lock is held through the file removal so the
    // invalidation is complete before any observer sees the new state.
    fn set_token(&self, token: Option<String>) {
        let derived = token.as_deref().and_then(|t| derive_session(t, Utc::now()));
        let mut state = self.state.lock().unwrap();
        match derived {
            Some(claims) => {
                state.token = token;
                state.claims = Some(claims);
            }
            None => {
                state.token = None;
                state.claims = None;
                if let Err(e) = self.storage.clear() {
                    log::warn!(
                        "Failed to clear token file {}: {}",
                        self.storage.path().display(),
                        e
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tempfile::TempDir;

    fn mint_token(sub: &str, exp_offset: Duration) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (Utc::now() + exp_offset).timestamp(),
            role: UserRole::User,
            name: None,
            email: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("server-side-secret".as_bytes()),
        )
        .unwrap()
    }

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::new(TokenStorage::new(dir.path().join("token")))
    }

    #[test_log::test]
    fn test_login_establishes_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let token = mint_token("user-1", Duration::minutes(30));

        assert!(!store.is_authenticated());

        store.login(&token);

        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some(token.as_str()));
        assert_eq!(store.current_claims().unwrap().sub, "user-1");

        // The token survives on disk for the next construction.
        let storage = TokenStorage::new(dir.path().join("token"));
        assert_eq!(storage.load().as_deref(), Some(token.as_str()));
    }

    #[test_log::test]
    fn test_login_with_expired_token_degrades_to_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let token = mint_token("user-1", Duration::hours(-2));

        store.login(&token);

        assert!(!store.is_authenticated());
        assert!(store.current_claims().is_none());
        assert!(store.token().is_none());
        // Storage was cleared along with the in-memory state.
        assert!(TokenStorage::new(dir.path().join("token")).load().is_none());
    }

    #[test_log::test]
    fn test_login_with_garbage_token_degrades_to_logged_out() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.login("definitely-not-a-jwt");

        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(TokenStorage::new(dir.path().join("token")).load().is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.login(&mint_token("user-1", Duration::minutes(30)));

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
        assert!(TokenStorage::new(dir.path().join("token")).load().is_none());

        // A second logout changes nothing and does not fail.
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_restores_session_from_storage() {
        let dir = TempDir::new().unwrap();
        let token = mint_token("user-2", Duration::minutes(30));
        TokenStorage::new(dir.path().join("token"))
            .save(&token)
            .unwrap();

        let store = store_in(&dir);
        assert!(store.is_authenticated());
        assert_eq!(store.current_claims().unwrap().sub, "user-2");
    }

    #[test]
    fn test_restore_discards_stale_token() {
        let dir = TempDir::new().unwrap();
        let token = mint_token("user-2", Duration::hours(-1));
        TokenStorage::new(dir.path().join("token"))
            .save(&token)
            .unwrap();

        let store = store_in(&dir);
        assert!(!store.is_authenticated());
        // The dead token was scrubbed from disk during construction.
        assert!(TokenStorage::new(dir.path().join("token")).load().is_none());
    }

    #[test]
    fn test_expiry_checked_at_call_time() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        // Valid for one second; authenticated now, not after it lapses.
        store.login(&mint_token("user-3", Duration::seconds(1)));
        assert!(store.is_authenticated());

        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert!(!store.is_authenticated());

        // Observation alone does not tear the session down.
        assert!(store.current_claims().is_some());
    }
}
