//! RestFeedApi - reqwest implementation of the FeedFusion REST contract.
//!
//! Routes:
//! - `POST /auth/login`, `POST /auth/register` (anonymous)
//! - `GET /feed` with optional `platform`/`keyword`/`interests` filters
//! - `GET /bookmarks/ids`, `GET /bookmarks`, `POST /bookmarks`,
//!   `DELETE /bookmarks/{postId}` (bearer-authenticated)

use std::collections::HashSet;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use feedfusion_core::api::FeedApi;
use feedfusion_core::auth::{AuthResponse, Credentials, SignupRequest, SignupResponse};
use feedfusion_core::error::{FeedError, Result};
use feedfusion_core::post::{FeedPost, FeedQuery};
use feedfusion_core::user::UserProfile;
use feedfusion_infrastructure::ClientConfig;

/// HTTP client for the FeedFusion REST API.
///
/// Holds the bearer token in a shared slot; the session store updates it
/// through [`FeedApi::set_auth_token`] whenever the session token changes,
/// and every subsequent request picks the new value up automatically.
pub struct RestFeedApi {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl RestFeedApi {
    /// Creates a client for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
            token: RwLock::new(None),
        }
    }

    /// Creates a client from the loaded configuration, applying the
    /// configured request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| FeedError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(config.api_base_url.clone()),
            token: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.endpoint(path));
        if let Some(token) = self.token.read().unwrap().as_ref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        response.json::<T>().await.map_err(|err| FeedError::Serialization {
            format: "JSON".to_string(),
            message: format!("Failed to parse API response: {err}"),
        })
    }

    /// Sends a request whose response body is an acknowledgment we don't
    /// need; only the status is inspected.
    async fn send_ack(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        Ok(())
    }
}

#[async_trait]
impl FeedApi for RestFeedApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let body = LoginRequestBody {
            username: &credentials.identifier,
            password: &credentials.password,
        };
        let response: AuthResponseBody = self
            .send_json(self.request(Method::POST, "/auth/login").json(&body))
            .await?;
        Ok(response.into_auth_response())
    }

    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        let response: SignupResponseBody = self
            .send_json(self.request(Method::POST, "/auth/register").json(request))
            .await?;
        Ok(response.into_signup_response())
    }

    async fn fetch_feed(&self, query: &FeedQuery) -> Result<Vec<FeedPost>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(platform) = &query.platform {
            params.push(("platform", platform.to_string()));
        }
        if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
            params.push(("keyword", keyword.to_string()));
        }
        if !query.interests.is_empty() {
            params.push(("interests", query.interests.join(",")));
        }

        debug!(?params, "fetching feed");
        self.send_json(self.request(Method::GET, "/feed").query(&params))
            .await
    }

    async fn fetch_bookmark_ids(&self) -> Result<HashSet<String>> {
        let ids: Vec<String> = self
            .send_json(self.request(Method::GET, "/bookmarks/ids"))
            .await?;
        Ok(ids.into_iter().collect())
    }

    async fn fetch_bookmarked_posts(&self) -> Result<Vec<FeedPost>> {
        self.send_json(self.request(Method::GET, "/bookmarks")).await
    }

    async fn add_bookmark(&self, post_id: &str) -> Result<()> {
        let body = BookmarkRequestBody { post_id };
        self.send_ack(self.request(Method::POST, "/bookmarks").json(&body))
            .await
    }

    async fn remove_bookmark(&self, post_id: &str) -> Result<()> {
        self.send_ack(self.request(Method::DELETE, &format!("/bookmarks/{post_id}")))
            .await
    }

    async fn set_auth_token(&self, token: Option<String>) {
        match &token {
            Some(_) => debug!("auth token set in API client"),
            None => debug!("auth token removed from API client"),
        }
        *self.token.write().unwrap() = token;
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

fn map_transport_error(err: reqwest::Error) -> FeedError {
    if err.is_connect() || err.is_timeout() {
        FeedError::transport(format!("FeedFusion API unreachable: {err}"))
    } else {
        FeedError::transport(format!("FeedFusion API request failed: {err}"))
    }
}

fn map_http_error(status: StatusCode, body: &str) -> FeedError {
    let message = serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|wrapper| wrapper.message)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        });

    FeedError::api(status.as_u16(), message)
}

#[derive(Serialize)]
struct LoginRequestBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookmarkRequestBody<'a> {
    post_id: &'a str,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// Login response. Some deployments nest the profile under `user`, the
/// original server inlines it next to the token; both are accepted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponseBody {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

impl AuthResponseBody {
    fn into_auth_response(self) -> AuthResponse {
        let AuthResponseBody {
            token,
            user,
            message,
            id,
            username,
            email,
            roles,
        } = self;

        let user = user.or_else(|| {
            username.map(|username| UserProfile {
                id,
                username,
                email,
                roles,
            })
        });

        AuthResponse {
            token,
            user,
            message,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupResponseBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
    #[serde(default)]
    message: Option<String>,
}

impl SignupResponseBody {
    fn into_signup_response(self) -> SignupResponse {
        SignupResponse {
            success: self.success.unwrap_or(false),
            token: self.token,
            user: self.user,
            message: self.message,
        }
    }
}
