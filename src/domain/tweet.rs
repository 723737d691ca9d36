//! Tweet domain types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserSummary;

/// A like as shown under a tweet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LikeSummary {
    pub user_id: i32,
    pub name: String,
}

/// A tweet as it appears in the feed.
///
/// `likes` and `attachments` are omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TweetView {
    pub id: i32,
    pub content: String,
    pub author: UserSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub likes: Vec<LikeSummary>,
    /// Stored media paths, in the order the author attached them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

/// A tweet to be published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTweet {
    pub content: String,
    pub media_ids: Vec<i32>,
}
