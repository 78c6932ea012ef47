//! Authentication request/response types and the session phase enum.

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};
use crate::user::UserProfile;

/// Login credentials.
///
/// `identifier` is the account name the user signs in with; the wire layer
/// maps it onto whatever field name the server expects.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

/// Raw signup input, including the password confirmation.
///
/// Validation happens entirely on the client, before any network call; a
/// [`SignupRequest`] is only produced from a form that passed every check.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Runs the client-side checks and returns the wire-ready request.
    ///
    /// Checks mirror the server's registration constraints: confirmation
    /// match, password 6-120 chars, username 3-30 chars, well-formed email.
    pub fn validate(&self) -> Result<SignupRequest> {
        if self.password != self.confirm_password {
            return Err(FeedError::validation("Passwords do not match."));
        }
        if self.password.len() < 6 {
            return Err(FeedError::validation(
                "Password must be at least 6 characters long.",
            ));
        }
        if self.password.len() > 120 {
            return Err(FeedError::validation(
                "Password must be at most 120 characters long.",
            ));
        }
        let username = self.username.trim();
        if username.len() < 3 || username.len() > 30 {
            return Err(FeedError::validation(
                "Username must be between 3 and 30 characters.",
            ));
        }
        let email = self.email.trim();
        if email.is_empty() || email.len() > 50 || !email.contains('@') {
            return Err(FeedError::validation("Invalid email format."));
        }

        Ok(SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// Validated registration payload sent to the remote API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response of a successful login call.
///
/// A response without a token is still delivered here; the session store
/// treats it as a failed login and surfaces `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of a signup call.
///
/// The server either acknowledges the registration (`success`, separate
/// login required) or auto-issues a token, in which case the response
/// behaves exactly like a login success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authentication phase of the session state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// No token held; the session is signed out.
    #[default]
    Anonymous,
    /// A login or signup request is in flight.
    Authenticating,
    /// Registration succeeded without a token; a separate login is expected.
    PendingLogin,
    /// A non-empty token is held.
    Authenticated,
}

impl AuthPhase {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthPhase::Authenticated)
    }
}
