//! Remote API trait.
//!
//! Defines the interface toward the FeedFusion REST service.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::auth::{AuthResponse, Credentials, SignupRequest, SignupResponse};
use crate::error::Result;
use crate::post::{FeedPost, FeedQuery};

/// An abstract client for the FeedFusion REST API.
///
/// This trait decouples the session store and the use-case layer from the
/// concrete HTTP transport, so that both can be exercised against scripted
/// in-memory implementations in tests.
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Attaching the bearer token set via [`set_auth_token`](FeedApi::set_auth_token)
///   to every request that requires authentication
/// - Mapping transport failures and non-success HTTP statuses to
///   [`FeedError`](crate::error::FeedError) values; no method panics
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Exchanges credentials for a session token.
    ///
    /// # Returns
    ///
    /// - `Ok(AuthResponse)`: The server responded; the response may still
    ///   lack a token, which callers must treat as a failed login
    /// - `Err(_)`: Transport failure or non-success status
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;

    /// Registers a new account.
    ///
    /// # Returns
    ///
    /// - `Ok(SignupResponse)`: Acknowledgment, possibly carrying a token
    ///   when the server auto-issues one
    /// - `Err(_)`: Transport failure or non-success status
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse>;

    /// Fetches the aggregated feed, optionally filtered.
    async fn fetch_feed(&self, query: &FeedQuery) -> Result<Vec<FeedPost>>;

    /// Fetches the identifiers of every post bookmarked by the current user.
    ///
    /// Requires authentication.
    async fn fetch_bookmark_ids(&self) -> Result<HashSet<String>>;

    /// Fetches the full post objects for the current user's bookmarks.
    ///
    /// Requires authentication.
    async fn fetch_bookmarked_posts(&self) -> Result<Vec<FeedPost>>;

    /// Adds a post to the current user's bookmarks.
    ///
    /// Requires authentication.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The server confirmed the bookmark
    /// - `Err(_)`: The bookmark was NOT stored remotely
    async fn add_bookmark(&self, post_id: &str) -> Result<()>;

    /// Removes a post from the current user's bookmarks.
    ///
    /// Requires authentication.
    async fn remove_bookmark(&self, post_id: &str) -> Result<()>;

    /// Attaches or detaches the bearer credential used for authenticated
    /// requests.
    ///
    /// The session store calls this on every committed token change: set on
    /// login/signup success and startup rehydration, cleared on logout and
    /// login failure.
    async fn set_auth_token(&self, token: Option<String>);
}
