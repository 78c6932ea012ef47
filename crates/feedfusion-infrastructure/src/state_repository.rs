//! File-backed client state repository.
//!
//! Persists the session token and interest selection across restarts.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use feedfusion_core::error::{FeedError, Result};
use feedfusion_core::state::{ClientState, StateRepository};

use crate::paths::FeedPaths;
use crate::storage::AtomicTomlFile;

/// Durable [`StateRepository`] backed by a TOML file.
///
/// The state is loaded once at construction and cached in memory; every
/// mutation updates the cache and flushes the whole state through an atomic
/// write on a blocking task. A single client process owns the file, so
/// write serialization via the in-process mutex is sufficient.
#[derive(Clone)]
pub struct FileStateRepository {
    /// Cached client state loaded from storage.
    state: Arc<Mutex<ClientState>>,
    file: Arc<AtomicTomlFile<ClientState>>,
}

impl FileStateRepository {
    /// Opens the repository at the default platform path
    /// (`~/.config/feedfusion/state.toml`).
    pub fn open_default() -> Result<Self> {
        let path = FeedPaths::state_file().map_err(|e| FeedError::config(e.to_string()))?;
        Self::open(path)
    }

    /// Opens the repository at a custom path (used by tests).
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = AtomicTomlFile::new(path);
        let initial = file
            .load()
            .map_err(|e| FeedError::data_access(format!("Failed to load client state: {e}")))?
            .unwrap_or_default();

        Ok(Self {
            state: Arc::new(Mutex::new(initial)),
            file: Arc::new(file),
        })
    }

    async fn flush(&self, state: ClientState) -> Result<()> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || {
            file.save(&state)
                .map_err(|e| FeedError::data_access(format!("Failed to save client state: {e}")))
        })
        .await
        .map_err(|e| FeedError::internal(format!("Failed to join save task: {e}")))?
    }
}

#[async_trait::async_trait]
impl StateRepository for FileStateRepository {
    async fn save_state(&self, state: ClientState) -> Result<()> {
        {
            let mut cached = self.state.lock().await;
            *cached = state.clone();
        }
        self.flush(state).await
    }

    async fn get_state(&self) -> Result<ClientState> {
        Ok(self.state.lock().await.clone())
    }

    async fn get_auth_token(&self) -> Option<String> {
        self.state.lock().await.auth_token.clone()
    }

    async fn set_auth_token(&self, token: String) -> Result<()> {
        let mut state = self.state.lock().await.clone();
        state.auth_token = Some(token);
        self.save_state(state).await
    }

    async fn clear_auth_token(&self) -> Result<()> {
        let mut state = self.state.lock().await.clone();
        state.auth_token = None;
        self.save_state(state).await
    }

    async fn get_interests(&self) -> Vec<String> {
        self.state.lock().await.interests.clone()
    }

    async fn set_interests(&self, interests: Vec<String>) -> Result<()> {
        let mut state = self.state.lock().await.clone();
        state.interests = interests;
        self.save_state(state).await
    }
}
