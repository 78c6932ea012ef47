//! Unified path management for feedfusion configuration files.
//!
//! All client configuration and persisted state live under a single
//! per-user directory, resolved through the `dirs` crate so the layout is
//! correct on Linux, macOS, and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for feedfusion.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/feedfusion/        # Config directory (XDG on Linux)
/// ├── config.toml              # Client configuration (API base URL, ...)
/// └── state.toml               # Persisted client state (token, interests)
/// ```
pub struct FeedPaths;

impl FeedPaths {
    /// Returns the feedfusion configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/feedfusion/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("feedfusion"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted client state file.
    ///
    /// The state file holds the session token, so it should carry
    /// user-only permissions like any credential file.
    pub fn state_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("state.toml"))
    }
}
