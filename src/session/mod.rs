//! Session state: who is logged in and with which token.
//!
//! `SessionStore` is constructed explicitly and cloned into the HTTP client,
//! the auth service and the views. Every read goes to the persisted storage,
//! and every transition is published on a `watch` channel so the navigator
//! can react to logins, logouts and expired tokens.

mod storage;

use std::sync::Arc;
use tokio::sync::watch;

use crate::api::ApiError;
use crate::models::{Role, Session, User};

pub use storage::{FileStore, KeyValueStore, MemoryStore};

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the serialized user
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Persisted state has not been read yet
    Loading,
    Ready,
}

/// What caused the latest session transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Restored,
    LoggedIn,
    LoggedOut,
    /// The backend rejected the token
    Expired,
}

/// Published view of the session.
///
/// Authentication follows the token alone. A stored token without a readable
/// user still counts as logged in, just without a role.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub token: Option<String>,
    pub user: Option<User>,
    pub last_change: Option<SessionChange>,
}

impl SessionSnapshot {
    fn loading() -> Self {
        Self {
            phase: SessionPhase::Loading,
            token: None,
            user: None,
            last_change: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// An empty `required` set passes for any authenticated user
    pub fn has_role(&self, required: &[Role]) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        if required.is_empty() {
            return true;
        }
        self.user()
            .is_some_and(|u| u.role != Role::Other && required.contains(&u.role))
    }
}

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// Create a store that has not read its storage yet
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::loading());
        Self {
            storage,
            state: Arc::new(state),
        }
    }

    /// Create a store and restore the persisted session
    pub fn open(storage: Arc<dyn KeyValueStore>) -> Self {
        let store = Self::new(storage);
        store.restore();
        store
    }

    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStore::new()))
    }

    /// Read persisted state and publish it
    pub fn restore(&self) {
        let token = self.token();
        let user = token.as_ref().and_then(|_| self.current_user());
        match (&token, &user) {
            (Some(_), Some(user)) => tracing::debug!("Restored session for {}", user.name),
            (Some(_), None) => tracing::warn!("Restored token without a stored user"),
            _ => {}
        }
        self.publish(token, user, SessionChange::Restored);
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn current_user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored user: {}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn has_role(&self, required: &[Role]) -> bool {
        self.current_snapshot().has_role(required)
    }

    /// Persist a freshly issued session.
    ///
    /// Either both keys are stored or neither is.
    pub fn establish(&self, session: &Session) -> Result<(), ApiError> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        let stored = self
            .storage
            .set(TOKEN_KEY, &session.token)
            .and_then(|_| self.storage.set(USER_KEY, &user));

        if let Err(e) = stored {
            tracing::error!("Failed to persist session: {}", e);
            self.remove_keys();
            return Err(ApiError::Storage(e.to_string()));
        }

        tracing::info!("Session established for {}", session.user.name);
        self.publish(
            Some(session.token.clone()),
            Some(session.user.clone()),
            SessionChange::LoggedIn,
        );
        Ok(())
    }

    /// Remove token and user; storage failures are logged, never returned
    pub fn clear(&self, change: SessionChange) {
        self.remove_keys();
        tracing::info!("Session cleared ({:?})", change);
        self.publish(None, None, change);
    }

    /// Drop the session after the backend rejected the token
    pub fn expire(&self) {
        self.clear(SessionChange::Expired);
    }

    /// Latest published state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Snapshot built from storage, regardless of what was last published
    fn current_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: SessionPhase::Ready,
            token: self.token(),
            user: self.current_user(),
            last_change: self.state.borrow().last_change,
        }
    }

    fn remove_keys(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::error!("Failed to remove {} from session storage: {}", key, e);
            }
        }
    }

    fn publish(&self, token: Option<String>, user: Option<User>, change: SessionChange) {
        self.state.send_replace(SessionSnapshot {
            phase: SessionPhase::Ready,
            token,
            user,
            last_change: Some(change),
        });
    }
}
