//! Feed post domain model.
//!
//! Posts are produced by the remote API and never constructed locally; the
//! client only consumes them for display and membership checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Source platform of a feed post.
///
/// Unknown platform tags deserialize to [`Platform::Other`] so the client
/// keeps working when the server starts aggregating a new source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Reddit,
    Youtube,
    #[serde(other)]
    Other,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Reddit => "reddit",
            Platform::Youtube => "youtube",
            Platform::Other => "other",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reddit" => Ok(Platform::Reddit),
            "youtube" => Ok(Platform::Youtube),
            other => Err(FeedError::validation(format!(
                "Unknown platform '{other}' (expected 'reddit' or 'youtube')"
            ))),
        }
    }
}

/// A single aggregated feed item as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPost {
    /// Server-issued identifier; bookmarks reference posts by this value.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub link: String,
    /// Thumbnail URL, when the platform provides one.
    #[serde(default)]
    pub media_url: Option<String>,
    pub platform: Platform,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    /// Set for YouTube posts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

/// Filter parameters for a feed request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedQuery {
    pub platform: Option<Platform>,
    pub keyword: Option<String>,
    pub interests: Vec<String>,
}

impl FeedQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_interests(mut self, interests: Vec<String>) -> Self {
        self.interests = interests;
        self
    }

    /// True when no filter is set and the request is for the plain feed.
    pub fn is_unfiltered(&self) -> bool {
        self.platform.is_none() && self.keyword.is_none() && self.interests.is_empty()
    }
}
