use serde::{Deserialize, Serialize};

use crate::models::user::UserSummary;

/// A past or upcoming event published by the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comments_count: i64,
    #[serde(default)]
    pub posted_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventComment {
    pub id: i64,
    pub content: String,
    pub user: UserSummary,
    pub event_id: i64,
    /// Set when the comment is a reply to another comment.
    #[serde(default)]
    pub based_comment_id: Option<i64>,
    #[serde(default)]
    pub posted_date: Option<String>,
    #[serde(default)]
    pub edited: bool,
}

/// Comment submission body accepted from the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub content: String,
    #[serde(default)]
    pub based_comment_id: Option<i64>,
}
