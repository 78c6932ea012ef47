//! Persistent client state.
//!
//! The small amount of state that must survive a process restart: the
//! session token and the interest-tag selection.
//!
//! - `model`: the [`ClientState`] model
//! - `repository`: the [`StateRepository`] persistence trait

mod model;
mod repository;

pub use model::ClientState;
pub use repository::StateRepository;
