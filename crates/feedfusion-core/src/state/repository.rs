//! State repository trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::model::ClientState;

/// Repository for durable client state.
///
/// Implementations must survive a process restart; the session store reads
/// the token back at startup to rehydrate an authenticated session.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Saves the full client state to storage.
    async fn save_state(&self, state: ClientState) -> Result<()>;

    async fn get_state(&self) -> Result<ClientState>;

    async fn get_auth_token(&self) -> Option<String>;

    async fn set_auth_token(&self, token: String) -> Result<()>;

    async fn clear_auth_token(&self) -> Result<()>;

    async fn get_interests(&self) -> Vec<String>;

    async fn set_interests(&self, interests: Vec<String>) -> Result<()>;
}
