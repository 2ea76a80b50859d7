//! Typed async client for the Facebook Graph API.
//!
//! Builds requests against the Graph REST endpoint, paginates
//! connection results, and maps JSON responses into typed Page, Post
//! and Video objects.
//!
//! ## Example
//!
//! ```no_run
//! use fbgraph::{FeedParams, GraphClient, GraphConfig};
//!
//! # async fn run() -> Result<(), fbgraph::GraphError> {
//! let client = GraphClient::new(&GraphConfig::new("access-token"))?;
//!
//! let page = client.pages().get_info(Some("20531316728"), None, None).await?;
//!
//! // Accumulate up to 50 posts across however many pages it takes.
//! let (posts, _paging) = client
//!     .pages()
//!     .get_posts(
//!         "20531316728",
//!         FeedParams {
//!             count: Some(50),
//!             limit: Some(25),
//!             ..Default::default()
//!         },
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Every typed operation has a `_json` sibling returning the raw
//! records untouched; the typed one is layered strictly on top of it.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod auth;
mod client;
mod config;
mod error;
mod params;
mod resource;
mod types;

pub use client::{ConnectionParams, GraphClient};
pub use config::{GraphConfig, RetryConfig};
pub use error::{GraphError, GraphResult};
pub use params::{resolve_target, Fields};
pub use resource::{
    ConnectionSummary, FeedParams, Page, PageApi, PageCategory, PageEngagement, Post, Shares,
    SummaryCounts, Video, VideoApi, VideosParams, PAGE_PUBLIC_FIELDS,
    POST_CONNECTIONS_SUMMARY_FIELDS, POST_PUBLIC_FIELDS, VIDEO_PUBLIC_FIELDS,
};
pub use types::{ConnectionPage, Cursors, Paging};
