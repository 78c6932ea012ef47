//! HTTP transport for the FeedFusion client.
//!
//! Implements the core [`FeedApi`](feedfusion_core::FeedApi) trait against
//! the FeedFusion REST service.

pub mod rest_client;

pub use rest_client::RestFeedApi;
