//! Session state model.

use std::collections::HashSet;

use crate::auth::AuthPhase;
use crate::user::UserProfile;

/// Mutable state owned by the session store.
///
/// Only [`SessionStore`](super::SessionStore) operations mutate this; every
/// other party observes it through [`SessionSnapshot`] copies.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    /// Opaque bearer credential. Source of truth for authentication.
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    /// Last operation failure, surfaced for display.
    pub error: Option<String>,
    /// True while a login/signup request is in flight.
    pub is_loading: bool,
    /// Registration succeeded without a token; a separate login is expected.
    pub pending_login: bool,
    pub bookmarked_post_ids: HashSet<String>,
    /// True only during an in-flight bookmark refresh.
    pub is_loading_bookmarks: bool,
}

impl SessionState {
    /// Derived, never stored independently: authenticated iff a non-empty
    /// token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    pub fn phase(&self) -> AuthPhase {
        if self.is_loading {
            AuthPhase::Authenticating
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else if self.pending_login {
            AuthPhase::PendingLogin
        } else {
            AuthPhase::Anonymous
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.token.clone(),
            user: self.user.clone(),
            phase: self.phase(),
            error: self.error.clone(),
            is_loading: self.is_loading,
            bookmarked_post_ids: self.bookmarked_post_ids.clone(),
            is_loading_bookmarks: self.is_loading_bookmarks,
        }
    }
}

/// Point-in-time view of the session state.
///
/// Snapshots are taken after a mutation completes; holding one never blocks
/// the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub phase: AuthPhase,
    pub error: Option<String>,
    pub is_loading: bool,
    pub bookmarked_post_ids: HashSet<String>,
    pub is_loading_bookmarks: bool,
}

impl SessionSnapshot {
    /// Derived from the token, same as on the live state.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}
