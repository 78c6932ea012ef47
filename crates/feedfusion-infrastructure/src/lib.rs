//! Infrastructure layer for the FeedFusion client.
//!
//! Provides the durable implementations behind the core's trait seams:
//! file-backed client state persistence and configuration loading.

pub mod config;
pub mod paths;
pub mod state_repository;
pub mod storage;

pub use config::{API_URL_ENV, ClientConfig, ConfigService};
pub use paths::FeedPaths;
pub use state_repository::FileStateRepository;
