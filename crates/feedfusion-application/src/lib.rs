//! Application layer for the FeedFusion client.
//!
//! Use cases that coordinate the session store, the remote API, and the
//! persisted interest selection.

pub mod feed_usecase;
pub mod interest_service;

pub use feed_usecase::FeedUseCase;
pub use interest_service::InterestService;
