//! Feed retrieval use case.
//!
//! Coordinates the remote API, the session store, and the persisted
//! interest selection for the feed and bookmark listing surfaces.

use std::sync::Arc;

use tracing::debug;

use feedfusion_core::api::FeedApi;
use feedfusion_core::error::{FeedError, Result};
use feedfusion_core::post::{FeedPost, FeedQuery};
use feedfusion_core::session::SessionStore;

use crate::interest_service::InterestService;

/// Use case for feed and bookmark listings.
pub struct FeedUseCase {
    api: Arc<dyn FeedApi>,
    session: Arc<SessionStore>,
    interests: Arc<InterestService>,
}

impl FeedUseCase {
    pub fn new(
        api: Arc<dyn FeedApi>,
        session: Arc<SessionStore>,
        interests: Arc<InterestService>,
    ) -> Self {
        Self {
            api,
            session,
            interests,
        }
    }

    /// Fetches the aggregated feed with the given filters.
    pub async fn search(&self, query: FeedQuery) -> Result<Vec<FeedPost>> {
        self.api.fetch_feed(&query).await
    }

    /// Fetches the feed filtered by the persisted interest selection.
    ///
    /// An empty selection degrades to the unfiltered feed.
    pub async fn personalized(&self) -> Result<Vec<FeedPost>> {
        let interests = self.interests.selected().await;
        debug!(count = interests.len(), "fetching personalized feed");
        self.api
            .fetch_feed(&FeedQuery::new().with_interests(interests))
            .await
    }

    /// Fetches the full post objects for the current user's bookmarks.
    ///
    /// Fails without a network call when the session is not authenticated.
    pub async fn bookmarked_posts(&self) -> Result<Vec<FeedPost>> {
        if !self.session.is_authenticated().await {
            return Err(FeedError::unauthorized("Sign in to view bookmarks."));
        }
        self.api.fetch_bookmarked_posts().await
    }
}
