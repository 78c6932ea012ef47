//! Shared application wiring for CLI commands.

use std::sync::Arc;

use anyhow::Result;

use feedfusion_application::{FeedUseCase, InterestService};
use feedfusion_core::api::FeedApi;
use feedfusion_core::session::SessionStore;
use feedfusion_core::state::StateRepository;
use feedfusion_infrastructure::{ConfigService, FileStateRepository};
use feedfusion_remote::RestFeedApi;

pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub feed: FeedUseCase,
    pub interests: Arc<InterestService>,
}

/// Builds the full client stack: configuration, HTTP client, durable state,
/// session store (rehydrated from the persisted token), and use cases.
pub async fn build() -> Result<AppContext> {
    let config = ConfigService::new().get_config();
    let api: Arc<dyn FeedApi> = Arc::new(RestFeedApi::from_config(&config)?);
    let state_repository: Arc<dyn StateRepository> = Arc::new(FileStateRepository::open_default()?);

    let session = Arc::new(SessionStore::restore(api.clone(), state_repository.clone()).await);
    let interests = Arc::new(InterestService::new(state_repository));
    let feed = FeedUseCase::new(api, session.clone(), interests.clone());

    Ok(AppContext {
        session,
        feed,
        interests,
    })
}
