//! Storage primitives for persisted client files.

mod atomic_toml;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
