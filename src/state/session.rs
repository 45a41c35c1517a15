//! Auth-session state for the current back-office user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Hosts create one [`SessionStore`] per application instance and share it by
//! `Arc` with every view that needs identity. Persistence goes through the
//! [`KeyValueStore`] port; the store itself only decides *when* the `token`
//! and `user` entries are written or cleared.
//!
//! DESIGN
//! ======
//! The 401 path in the API layer clears storage on its own. Hosts that want
//! the in-memory session to follow wire [`SessionStore::follow_expiry`] (or
//! call [`SessionStore::expire`] themselves) to the API client's
//! session-expired events.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Serialize, Serializer};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use super::directory;
use crate::net::api::SessionExpired;
use crate::net::types::UserRecord;
use crate::storage::{KeyValueStore, SESSION_KEYS, StorageError, TOKEN_KEY, USER_KEY};

tokio::task_local! {
    static CURRENT_SESSION: Arc<SessionStore>;
}

// =============================================================================
// SESSION SNAPSHOT
// =============================================================================

/// Who is logged in, plus whether the initial restore is still pending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<UserRecord>,
    pub loading: bool,
}

impl Session {
    /// True exactly when a user is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            user: Option<&'a UserRecord>,
            is_authenticated: bool,
            loading: bool,
        }
        Wire { user: self.user.as_ref(), is_authenticated: self.is_authenticated(), loading: self.loading }
            .serialize(serializer)
    }
}

// =============================================================================
// LOGIN OUTCOME
// =============================================================================

/// Why a login attempt did not produce a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginFailure {
    /// The identifier is not in the user directory.
    #[error("Invalid username")]
    InvalidUsername,
    /// Persisting the session failed.
    #[error("Login failed")]
    Failed,
}

/// Result of [`SessionStore::login`]. Failures are values, never errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(UserRecord),
    Failure(LoginFailure),
}

impl LoginOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Display message of the failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.to_string()),
        }
    }
}

impl Serialize for LoginOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            success: bool,
            #[serde(skip_serializing_if = "Option::is_none")]
            error: Option<String>,
        }
        Wire { success: self.is_success(), error: self.error() }.serialize(serializer)
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Single source of truth for the current session.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    session: RwLock<Session>,
}

impl SessionStore {
    /// Create an unauthenticated store in the loading state. Call
    /// [`SessionStore::initialize`] to restore a persisted session.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage, session: RwLock::new(Session { user: None, loading: true }) }
    }

    /// Restore the persisted session, if both entries are present and the
    /// user record parses. Never fails: anything unreadable yields an
    /// unauthenticated session.
    pub fn initialize(&self) -> Session {
        let user = match restore(self.storage.as_ref()) {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(%error, "persisted session unreadable; starting signed out");
                None
            }
        };
        let mut session = self.write();
        *session = Session { user, loading: false };
        session.clone()
    }

    /// Sign in as one of the directory users. `secret` is not checked.
    pub fn login(&self, identifier: &str, secret: &str) -> LoginOutcome {
        let _ = secret;
        let Some(user) = directory::lookup(identifier) else {
            tracing::info!(identifier, "login rejected: unknown username");
            return LoginOutcome::Failure(LoginFailure::InvalidUsername);
        };

        if let Err(error) = persist(self.storage.as_ref(), identifier, &user) {
            tracing::error!(%error, identifier, "login failed while persisting session");
            return LoginOutcome::Failure(LoginFailure::Failed);
        }

        self.write().user = Some(user.clone());
        tracing::info!(identifier, role = %user.role, "logged in");
        LoginOutcome::Success(user)
    }

    /// Clear persisted and in-memory session state.
    pub fn logout(&self) {
        if let Err(error) = self.storage.remove_many(&SESSION_KEYS) {
            tracing::error!(%error, "failed to clear persisted session on logout");
        }
        self.write().user = None;
    }

    /// Drop the in-memory user after the API layer has cleared storage.
    pub fn expire(&self) {
        self.write().user = None;
    }

    /// Keep this store in step with an API client's session-expired events.
    ///
    /// Every received event expires the in-memory session and is then passed
    /// to `on_expired` (typically: navigate to the login route). The task ends
    /// when the client and all its clones are dropped.
    pub fn follow_expiry<F>(
        self: &Arc<Self>,
        mut events: broadcast::Receiver<SessionExpired>,
        on_expired: F,
    ) -> JoinHandle<()>
    where
        F: Fn(&SessionExpired) + Send + 'static,
    {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        store.expire();
                        on_expired(&event);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "missed session-expired events");
                        store.expire();
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserRecord> {
        self.read().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Run `body` with `store` provided as the current session.
    pub async fn scope<F: Future>(store: Arc<Self>, body: F) -> F::Output {
        CURRENT_SESSION.scope(store, body).await
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The store provided by the enclosing [`SessionStore::scope`].
///
/// # Panics
///
/// Panics when called outside any session scope.
#[must_use]
pub fn current() -> Arc<SessionStore> {
    match try_current() {
        Some(store) => store,
        None => panic!("session store accessed outside SessionStore::scope"),
    }
}

/// Like [`current`], returning `None` outside a session scope.
#[must_use]
pub fn try_current() -> Option<Arc<SessionStore>> {
    CURRENT_SESSION.try_with(Arc::clone).ok()
}

fn restore(storage: &dyn KeyValueStore) -> Result<Option<UserRecord>, StorageError> {
    let token = storage.get(TOKEN_KEY)?.filter(|token| !token.is_empty());
    let raw_user = storage.get(USER_KEY)?.filter(|raw| !raw.is_empty());
    let (Some(_), Some(raw_user)) = (token, raw_user) else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw_user)?))
}

fn persist(storage: &dyn KeyValueStore, identifier: &str, user: &UserRecord) -> Result<(), StorageError> {
    let token = directory::mock_token(identifier);
    let raw_user = serde_json::to_string(user)?;
    storage.set_many(&[(TOKEN_KEY, token.as_str()), (USER_KEY, raw_user.as_str())])
}
