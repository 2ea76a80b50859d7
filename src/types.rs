//! Graph API wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a connection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionPage {
    /// Raw records for this page
    #[serde(default)]
    pub data: Vec<Value>,

    /// Paging block, absent on single-page results
    #[serde(default)]
    pub paging: Option<Paging>,
}

/// Paging block of a connection response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    /// Opaque cursors for this page
    #[serde(default)]
    pub cursors: Option<Cursors>,

    /// URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,

    /// URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
}

impl Paging {
    /// The cursor to request the next page with, if the API reports
    /// one. A `next` URL without an `after` cursor is treated as
    /// end-of-data rather than re-deriving offsets from the URL.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_ref()?;
        self.cursors.as_ref()?.after.as_deref()
    }
}

/// Cursor pair within a paging block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cursors {
    /// Cursor pointing before the first record of this page
    #[serde(default)]
    pub before: Option<String>,

    /// Cursor pointing after the last record of this page
    #[serde(default)]
    pub after: Option<String>,
}

/// Error envelope returned by the Graph API on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Body of the Graph API error envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "type")]
    pub error_type: Option<String>,

    #[serde(default)]
    pub code: Option<i64>,

    #[serde(default)]
    pub error_subcode: Option<i64>,

    #[serde(default)]
    pub fbtrace_id: Option<String>,
}
