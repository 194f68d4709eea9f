//! Persistent session store.
//!
//! DESIGN
//! ======
//! The session (access token, refresh token, serialized user) lives in client
//! storage under three fixed keys so it survives reloads. `SessionStore` reads
//! those keys once in [`SessionStore::load`], serves reads from an in-memory
//! copy, and writes through on every mutation. It is an explicit handle rather
//! than ambient global state: the app creates one and injects it, tests build
//! their own over `MemoryStorage`.
//!
//! Token staleness is never tracked here. An expired token is discovered when
//! a protected call comes back 401.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, PoisonError, RwLock};

use crate::net::types::{Role, User};
use crate::util::storage::{BrowserStorage, KeyValueStore, MemoryStorage, load_json, save_json};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Credential material and identity for the current browser profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: Option<User>,
}

impl Session {
    /// Authenticated iff a user is present and the access token is non-empty.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && !self.access_token.is_empty()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(User::role_kind)
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionPatch {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<User>,
}

/// Shared handle to the persisted session. Clones see the same state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    current: Arc<RwLock<Session>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Initialize from whatever `storage` already holds.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let access_token = storage.get(ACCESS_TOKEN_KEY).unwrap_or_default();
        let refresh_token = storage.get(REFRESH_TOKEN_KEY).unwrap_or_default();
        let user = match storage.get(USER_KEY) {
            Some(_) => {
                let user = load_json::<User>(storage.as_ref(), USER_KEY);
                if user.is_none() {
                    leptos::logging::warn!("discarding unreadable stored user");
                    storage.remove(USER_KEY);
                }
                user
            }
            None => None,
        };
        let session = Session { access_token, refresh_token, user };
        Self { storage, current: Arc::new(RwLock::new(session)) }
    }

    /// Store backed by window `localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::load(Arc::new(BrowserStorage))
    }

    /// Empty store that never touches the browser.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::load(Arc::new(MemoryStorage::new()))
    }

    /// The storage this session persists to.
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    #[must_use]
    pub fn get(&self) -> Session {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_authenticated()
    }

    /// Apply a partial update and persist the touched keys.
    pub fn set(&self, patch: SessionPatch) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = patch.access_token {
            write_token(self.storage.as_ref(), ACCESS_TOKEN_KEY, &token);
            current.access_token = token;
        }
        if let Some(token) = patch.refresh_token {
            write_token(self.storage.as_ref(), REFRESH_TOKEN_KEY, &token);
            current.refresh_token = token;
        }
        if let Some(user) = patch.user {
            save_json(self.storage.as_ref(), USER_KEY, &user);
            current.user = Some(user);
        }
    }

    /// Drop the session from memory and storage.
    ///
    /// The in-memory copy is reset under the write lock before any key is
    /// removed, so no reader ever sees a half-cleared session.
    pub fn clear(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Session::default();
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            self.storage.remove(key);
        }
    }
}

fn write_token(storage: &dyn KeyValueStore, key: &str, token: &str) {
    if token.is_empty() {
        storage.remove(key);
    } else {
        storage.set(key, token);
    }
}
