//! Client state domain model.
//!
//! Contains the state that persists across application restarts.

use serde::{Deserialize, Serialize};

/// Client state that persists across restarts.
///
/// # Fields
///
/// * `auth_token` - The session token from the last successful login.
///   Present iff the user was signed in when the process last ran; the
///   session store rehydrates from it at startup.
/// * `interests` - The user's interest-tag selection, kept independently of
///   the session token (it survives logout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClientState {
    pub auth_token: Option<String>,

    #[serde(default)]
    pub interests: Vec<String>,
}

impl ClientState {
    /// Creates a new ClientState with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let state = ClientState::new();
        assert!(state.auth_token.is_none());
        assert!(state.interests.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let state = ClientState {
            auth_token: Some("abc123".to_string()),
            interests: vec!["rust".to_string(), "cooking".to_string()],
        };
        let encoded = toml::to_string(&state).unwrap();
        let decoded: ClientState = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, state);
    }
}
