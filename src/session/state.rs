//! The client-side session: access token plus the signed-in user.
//!
//! Every mutation writes through to the injected [`SessionStorage`] before
//! returning, and the whole session is read back once in [`SessionState::load`].
//! The user is never kept without a token.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::{SessionStorage, StorageError};
use crate::models::SessionUser;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const USER_KEY: &str = "user";

/// A snapshot of the session.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(SessionUser::is_admin)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cannot store a user without an access token")]
    NotAuthenticated,
    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct SessionState {
    storage: Arc<dyn SessionStorage>,
    session: RwLock<Session>,
}

impl SessionState {
    /// Restore the last known session from storage. Unreadable entries are
    /// dropped with a warning; a stored user without a stored token is discarded.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let access_token = match storage.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(
                    event_name = "session.load.failed",
                    event_domain = "session",
                    key = ACCESS_TOKEN_KEY,
                    "Could not read stored access token: {}",
                    e
                );
                None
            }
        };

        let user = match storage.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Option<SessionUser>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!("Discarding unreadable stored user profile: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(
                    event_name = "session.load.failed",
                    event_domain = "session",
                    key = USER_KEY,
                    "Could not read stored user profile: {}",
                    e
                );
                None
            }
        };

        let user = if access_token.is_none() && user.is_some() {
            debug!("Stored user has no access token; clearing it.");
            if let Err(e) = storage.remove(USER_KEY) {
                warn!("Could not remove orphaned user profile: {}", e);
            }
            None
        } else {
            user
        };

        debug!(
            "Session restored (authenticated={}, durable={})",
            access_token.is_some(),
            storage.is_durable()
        );

        Self {
            storage,
            session: RwLock::new(Session { access_token, user }),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.session.read().expect("session lock poisoned").clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .access_token
            .clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.read().expect("session lock poisoned").user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().expect("session lock poisoned").is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.read().expect("session lock poisoned").is_admin()
    }

    /// Replace the access token. Clearing it also clears the user.
    /// Memory is updated even when storage fails; the storage error is
    /// still returned.
    pub fn set_access_token(&self, token: Option<String>) -> Result<(), SessionError> {
        let token = token.filter(|t| !t.is_empty());
        let mut session = self.session.write().expect("session lock poisoned");
        session.access_token = token.clone();
        match token {
            Some(t) => self.storage.set(ACCESS_TOKEN_KEY, &t)?,
            None => {
                let had_user = session.user.take().is_some();
                let removed = self.storage.remove(ACCESS_TOKEN_KEY);
                if had_user {
                    self.storage.remove(USER_KEY)?;
                }
                removed?;
            }
        }
        Ok(())
    }

    /// Replace the signed-in user. Setting a user requires a token.
    /// Like [`set_access_token`](Self::set_access_token), memory wins over
    /// a failing storage.
    pub fn set_user(&self, user: Option<SessionUser>) -> Result<(), SessionError> {
        let mut session = self.session.write().expect("session lock poisoned");
        match user {
            Some(u) => {
                if session.access_token.is_none() {
                    return Err(SessionError::NotAuthenticated);
                }
                let encoded = serde_json::to_string(&u)?;
                session.user = Some(u);
                self.storage.set(USER_KEY, &encoded)?;
            }
            None => {
                session.user = None;
                self.storage.remove(USER_KEY)?;
            }
        }
        Ok(())
    }

    /// Store a fresh login: token first, then the user.
    pub fn sign_in(&self, token: String, user: SessionUser) -> Result<(), SessionError> {
        self.set_access_token(Some(token))?;
        self.set_user(Some(user))
    }

    /// Drop the whole session. The in-memory state is cleared even when
    /// storage fails; the storage error is still returned.
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut session = self.session.write().expect("session lock poisoned");
        *session = Session::default();
        let token = self.storage.remove(ACCESS_TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        token?;
        user?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::memory_storage::MemoryStorage;

    /// Reads work, every write fails.
    struct ReadOnlyStorage;

    impl SessionStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    fn state_with(storage: Arc<MemoryStorage>) -> SessionState {
        SessionState::load(storage)
    }

    #[test]
    fn test_flags_follow_token_and_role() {
        let storage = Arc::new(MemoryStorage::new());
        let state = state_with(storage);
        assert!(!state.is_authenticated());
        assert!(!state.is_admin());

        state.set_access_token(Some("t1".to_string())).unwrap();
        assert!(state.is_authenticated());
        assert!(!state.is_admin());

        state
            .set_user(Some(SessionUser::new("u1", "Kim", "USER")))
            .unwrap();
        assert!(!state.is_admin());

        state
            .set_user(Some(SessionUser::new("u1", "Kim", "ADMIN")))
            .unwrap();
        assert!(state.is_admin());

        state.set_access_token(None).unwrap();
        assert!(!state.is_authenticated());
        assert!(!state.is_admin());
        assert_eq!(state.user(), None);
    }

    #[test]
    fn test_user_requires_token() {
        let state = state_with(Arc::new(MemoryStorage::new()));
        let result = state.set_user(Some(SessionUser::new("u1", "Kim", "USER")));
        assert!(matches!(result, Err(SessionError::NotAuthenticated)));
        assert_eq!(state.user(), None);
    }

    #[test]
    fn test_mutations_write_through() {
        let storage = Arc::new(MemoryStorage::new());
        let state = state_with(storage.clone());
        state
            .sign_in("abc".to_string(), SessionUser::new("u1", "Kim", "USER"))
            .unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        assert!(storage.get(USER_KEY).unwrap().is_some());

        state.logout().unwrap();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
        assert_eq!(state.snapshot(), Session::default());
    }

    #[test]
    fn test_load_discards_orphaned_and_corrupt_users() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(USER_KEY, r#"{"userId":"u1","userName":"Kim","role":"USER"}"#)
            .unwrap();
        let state = state_with(storage.clone());
        assert_eq!(state.user(), None);
        assert_eq!(storage.get(USER_KEY).unwrap(), None);

        storage.set(ACCESS_TOKEN_KEY, "abc").unwrap();
        storage.set(USER_KEY, "not json").unwrap();
        let state = state_with(storage);
        assert_eq!(state.access_token().as_deref(), Some("abc"));
        assert_eq!(state.user(), None);
    }

    #[test]
    fn test_reload_round_trip() {
        let storage = Arc::new(MemoryStorage::new());
        let state = state_with(storage.clone());
        state.set_access_token(Some("abc".to_string())).unwrap();
        assert_eq!(
            state_with(storage.clone()).access_token().as_deref(),
            Some("abc")
        );

        state.set_access_token(None).unwrap();
        assert_eq!(state_with(storage).access_token(), None);
    }

    #[test]
    fn test_memory_is_updated_when_storage_fails() {
        let state = SessionState::load(Arc::new(ReadOnlyStorage));

        let result = state.set_access_token(Some("T2".to_string()));
        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert_eq!(state.access_token().as_deref(), Some("T2"));

        let result = state.set_user(Some(SessionUser::new("u1", "Kim", "ADMIN")));
        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert!(state.is_admin());

        let result = state.set_access_token(None);
        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert_eq!(state.snapshot(), Session::default());
    }
}
