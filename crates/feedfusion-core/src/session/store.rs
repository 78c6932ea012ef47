use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::model::{SessionSnapshot, SessionState};
use crate::api::FeedApi;
use crate::auth::{AuthPhase, Credentials, SignupForm};
use crate::state::StateRepository;
use crate::user::UserProfile;

/// Owns the authentication token, the derived authentication state, the user
/// profile, and the bookmarked-post-id cache.
///
/// `SessionStore` is responsible for:
/// - Exchanging credentials for a token (`login`, `signup`)
/// - Tearing the session down (`logout`)
/// - Keeping the bookmark-id cache consistent with the remote source of
///   truth (`refresh_bookmark_ids`, `add_bookmark`, `remove_bookmark`)
/// - Persisting the token across restarts and re-attaching the bearer
///   header on every committed token change
///
/// One store instance is constructed at application start and injected into
/// consumers; there is no ambient global.
///
/// # Failure semantics
///
/// Remote failures never escape an operation: they are recorded in the error
/// slot and reported as a `false` outcome. Bookmark writes are
/// confirm-then-apply - the local set only changes after the server
/// acknowledged the mutation.
///
/// # Concurrency
///
/// Operations suspend at network-call boundaries; the state remains in its
/// pre-call shape until the response resolves. Concurrent `login` calls are
/// not de-duplicated - whichever response resolves last wins. A 401 response
/// is surfaced like any other failure and does not trigger a logout.
pub struct SessionStore {
    api: Arc<dyn FeedApi>,
    state_repository: Arc<dyn StateRepository>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Creates an empty, anonymous store.
    pub fn new(api: Arc<dyn FeedApi>, state_repository: Arc<dyn StateRepository>) -> Self {
        Self {
            api,
            state_repository,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Creates a store and rehydrates the session from persisted state.
    ///
    /// A non-empty persisted token makes the store start authenticated
    /// without a validation round-trip; the bearer header is re-attached and
    /// the bookmark cache refreshed, exactly as on a fresh login.
    pub async fn restore(
        api: Arc<dyn FeedApi>,
        state_repository: Arc<dyn StateRepository>,
    ) -> Self {
        let store = Self::new(api, state_repository);
        store.rehydrate().await;
        store
    }

    async fn rehydrate(&self) {
        let Some(token) = self.state_repository.get_auth_token().await else {
            return;
        };
        if token.is_empty() {
            return;
        }

        debug!("restoring persisted session token");
        {
            let mut state = self.state.write().await;
            state.token = Some(token.clone());
        }
        self.api.set_auth_token(Some(token)).await;
        self.refresh_bookmark_ids().await;
    }

    /// Exchanges credentials for a session token.
    ///
    /// On success the token is committed (persisted, header attached) and
    /// the bookmark cache refreshed. On any failure the token is cleared,
    /// the persisted token removed, and the failure reason recorded; the
    /// call reports `false` instead of raising.
    pub async fn login(&self, credentials: Credentials) -> bool {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }
        debug!(identifier = %credentials.identifier, "login requested");

        let outcome = match self.api.login(&credentials).await {
            Ok(response) => match response.token.filter(|token| !token.is_empty()) {
                Some(token) => {
                    self.commit_token(Some(token), response.user).await;
                    self.refresh_bookmark_ids().await;
                    true
                }
                None => {
                    let message = response
                        .message
                        .unwrap_or_else(|| "Login failed: no token received.".to_string());
                    warn!(%message, "login rejected");
                    self.fail_auth(message).await;
                    false
                }
            },
            Err(err) => {
                warn!(error = %err, "login request failed");
                self.fail_auth(err.to_string()).await;
                false
            }
        };

        self.state.write().await.is_loading = false;
        outcome
    }

    /// Registers a new account.
    ///
    /// The form is validated client-side first; a validation failure is
    /// recorded synchronously and no network call is made. A server response
    /// carrying a token behaves exactly like a login success; a plain
    /// acknowledgment moves the store to the pending-login phase without
    /// touching session state.
    pub async fn signup(&self, form: SignupForm) -> bool {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => {
                debug!(error = %err, "signup rejected client-side");
                self.state.write().await.error = Some(err.to_string());
                return false;
            }
        };

        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }
        debug!(username = %request.username, "signup requested");

        let outcome = match self.api.signup(&request).await {
            Ok(response) => {
                if let Some(token) = response.token.filter(|token| !token.is_empty()) {
                    // Auto-login: the server issued a token with the account.
                    self.commit_token(Some(token), response.user).await;
                    self.refresh_bookmark_ids().await;
                    true
                } else if response.success {
                    debug!("signup acknowledged, separate login required");
                    self.state.write().await.pending_login = true;
                    true
                } else {
                    let message = response
                        .message
                        .unwrap_or_else(|| "Signup failed.".to_string());
                    warn!(%message, "signup rejected");
                    self.state.write().await.error = Some(message);
                    false
                }
            }
            Err(err) => {
                warn!(error = %err, "signup request failed");
                self.state.write().await.error = Some(err.to_string());
                false
            }
        };

        self.state.write().await.is_loading = false;
        outcome
    }

    /// Tears the session down: clears token, user, and bookmark cache, and
    /// removes the persisted token.
    ///
    /// Idempotent - calling while already anonymous is a no-op beyond the
    /// redundant clears.
    pub async fn logout(&self) {
        debug!("logout");
        self.commit_token(None, None).await;
    }

    /// Replaces the bookmark-id cache with the remote state.
    ///
    /// A no-op (beyond clearing the cache) when not authenticated. On fetch
    /// failure the cache is cleared rather than left stale; the loading flag
    /// is reset regardless of outcome.
    pub async fn refresh_bookmark_ids(&self) {
        {
            let mut state = self.state.write().await;
            if !state.is_authenticated() {
                debug!("skipping bookmark refresh: not authenticated");
                state.bookmarked_post_ids.clear();
                return;
            }
            state.is_loading_bookmarks = true;
        }

        let fetched = self.api.fetch_bookmark_ids().await;
        let mut state = self.state.write().await;
        match fetched {
            Ok(ids) => {
                debug!(count = ids.len(), "bookmark ids refreshed");
                state.bookmarked_post_ids = ids;
            }
            Err(err) => {
                warn!(error = %err, "bookmark refresh failed");
                state.bookmarked_post_ids.clear();
            }
        }
        state.is_loading_bookmarks = false;
    }

    /// Bookmarks a post. Confirm-then-apply: the id is inserted into the
    /// local cache only after the server acknowledged the write.
    ///
    /// Returns `false` without a network call when not authenticated or when
    /// `post_id` is empty.
    pub async fn add_bookmark(&self, post_id: &str) -> bool {
        if !self.is_authenticated().await || post_id.is_empty() {
            warn!("add bookmark skipped: not authenticated or empty post id");
            return false;
        }

        match self.api.add_bookmark(post_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.bookmarked_post_ids.insert(post_id.to_string());
                true
            }
            Err(err) => {
                warn!(%post_id, error = %err, "failed to add bookmark");
                self.state.write().await.error = Some("Failed to add bookmark.".to_string());
                false
            }
        }
    }

    /// Removes a bookmark. Mirrors [`add_bookmark`](Self::add_bookmark):
    /// confirmed-only delete, unchanged cache and `false` on failure.
    pub async fn remove_bookmark(&self, post_id: &str) -> bool {
        if !self.is_authenticated().await || post_id.is_empty() {
            warn!("remove bookmark skipped: not authenticated or empty post id");
            return false;
        }

        match self.api.remove_bookmark(post_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.bookmarked_post_ids.remove(post_id);
                true
            }
            Err(err) => {
                warn!(%post_id, error = %err, "failed to remove bookmark");
                self.state.write().await.error = Some("Failed to remove bookmark.".to_string());
                false
            }
        }
    }

    // ============================================================================
    // Observers
    // ============================================================================

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn phase(&self) -> AuthPhase {
        self.state.read().await.phase()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn user(&self) -> Option<UserProfile> {
        self.state.read().await.user.clone()
    }

    /// Last recorded operation failure, for inline display.
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn bookmarked_post_ids(&self) -> HashSet<String> {
        self.state.read().await.bookmarked_post_ids.clone()
    }

    pub async fn is_bookmarked(&self, post_id: &str) -> bool {
        self.state.read().await.bookmarked_post_ids.contains(post_id)
    }

    pub async fn is_loading_bookmarks(&self) -> bool {
        self.state.read().await.is_loading_bookmarks
    }

    // ============================================================================
    // Internal transitions
    // ============================================================================

    /// Commits a token change and fires the reactions that must follow it:
    /// bearer header attach/detach, then persistence.
    ///
    /// The reactions run strictly after the in-memory mutation; the
    /// invariant "no token implies empty bookmark cache" is restored inside
    /// the same mutation.
    async fn commit_token(&self, token: Option<String>, user: Option<UserProfile>) {
        {
            let mut state = self.state.write().await;
            state.user = if token.is_some() { user } else { None };
            state.pending_login = false;
            if token.is_none() {
                state.bookmarked_post_ids.clear();
            }
            state.token = token.clone();
        }

        self.api.set_auth_token(token.clone()).await;

        let persisted = match token {
            Some(token) => self.state_repository.set_auth_token(token).await,
            None => self.state_repository.clear_auth_token().await,
        };
        if let Err(err) = persisted {
            // The in-memory session stays authoritative.
            warn!(error = %err, "failed to persist session token change");
        }
    }

    /// Failure path for login: record the reason and drop any token.
    async fn fail_auth(&self, message: String) {
        self.state.write().await.error = Some(message);
        self.commit_token(None, None).await;
    }
}
