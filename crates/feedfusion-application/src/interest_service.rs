//! Interest selection service.
//!
//! Persists the user's interest tags across restarts, independently of the
//! session token: interests survive logout.

use std::sync::Arc;

use tracing::debug;

use feedfusion_core::error::Result;
use feedfusion_core::state::StateRepository;

/// Service managing the persisted interest-tag selection.
pub struct InterestService {
    state_repository: Arc<dyn StateRepository>,
}

impl InterestService {
    pub fn new(state_repository: Arc<dyn StateRepository>) -> Self {
        Self { state_repository }
    }

    /// Returns the current interest selection.
    pub async fn selected(&self) -> Vec<String> {
        self.state_repository.get_interests().await
    }

    /// Replaces the interest selection.
    ///
    /// Blank entries are dropped and duplicates collapse to their first
    /// occurrence; the stored order is the caller's order.
    pub async fn replace(&self, interests: Vec<String>) -> Result<Vec<String>> {
        let mut cleaned: Vec<String> = Vec::with_capacity(interests.len());
        for interest in interests {
            let interest = interest.trim().to_string();
            if !interest.is_empty() && !cleaned.contains(&interest) {
                cleaned.push(interest);
            }
        }

        debug!(count = cleaned.len(), "replacing interest selection");
        self.state_repository.set_interests(cleaned.clone()).await?;
        Ok(cleaned)
    }

    /// Adds the interest if absent, removes it if present, and returns the
    /// resulting selection.
    pub async fn toggle(&self, interest: &str) -> Result<Vec<String>> {
        let interest = interest.trim();
        let mut interests = self.state_repository.get_interests().await;

        if let Some(position) = interests.iter().position(|existing| existing == interest) {
            interests.remove(position);
        } else if !interest.is_empty() {
            interests.push(interest.to_string());
        }

        self.state_repository.set_interests(interests.clone()).await?;
        Ok(interests)
    }
}
