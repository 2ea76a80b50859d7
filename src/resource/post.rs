//! Facebook post object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GraphError, GraphResult};

/// A post published to a page's feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post ID
    pub id: String,

    /// Message text
    #[serde(default)]
    pub message: Option<String>,

    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created_time: Option<String>,

    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_time: Option<String>,

    /// Permanent URL of the post
    #[serde(default)]
    pub permalink_url: Option<String>,

    /// URL of a full-size picture attached to the post
    #[serde(default)]
    pub full_picture: Option<String>,

    /// Icon representing the post type
    #[serde(default)]
    pub icon: Option<String>,

    /// Post type, e.g. "added_photos", "shared_story"
    #[serde(default)]
    pub status_type: Option<String>,

    /// Attached media and links (kept raw; shape varies by post type)
    #[serde(default)]
    pub attachments: Option<Value>,

    /// Profiles tagged in the message
    #[serde(default)]
    pub message_tags: Option<Vec<Value>>,

    /// Share count
    #[serde(default)]
    pub shares: Option<Shares>,

    /// Comment summary when requested via comments.summary(true)
    #[serde(default)]
    pub comments: Option<ConnectionSummary>,

    /// Reaction summary when requested via reactions.summary(true)
    #[serde(default)]
    pub reactions: Option<ConnectionSummary>,
}

/// Share counts for a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shares {
    pub count: u64,
}

/// Summary block of a post connection (comments, reactions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSummary {
    #[serde(default)]
    pub data: Vec<Value>,

    #[serde(default)]
    pub summary: Option<SummaryCounts>,
}

/// Counts within a connection summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryCounts {
    #[serde(default)]
    pub total_count: Option<u64>,

    #[serde(default)]
    pub can_comment: Option<bool>,

    #[serde(default)]
    pub viewer_reaction: Option<String>,
}

impl Post {
    /// Construct a post from one raw record. Pure, no I/O.
    pub fn new_from_json(record: Value) -> GraphResult<Self> {
        serde_json::from_value(record).map_err(GraphError::from)
    }
}
