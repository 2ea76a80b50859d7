//! Typed resources and their operation surfaces.

mod page;
mod post;
mod video;

pub use page::{FeedParams, Page, PageApi, PageCategory, PageEngagement};
pub use post::{ConnectionSummary, Post, Shares, SummaryCounts};
pub use video::{Video, VideoApi, VideosParams};

/// Default public fields requested for a page when the caller passes
/// no field selection.
pub const PAGE_PUBLIC_FIELDS: &[&str] = &[
    "id",
    "about",
    "category",
    "category_list",
    "checkins",
    "cover",
    "description",
    "engagement",
    "fan_count",
    "founded",
    "general_info",
    "link",
    "location",
    "name",
    "phone",
    "picture",
    "rating_count",
    "single_line_address",
    "username",
    "verification_status",
    "website",
];

/// Default public fields requested for a post.
pub const POST_PUBLIC_FIELDS: &[&str] = &[
    "id",
    "attachments",
    "created_time",
    "full_picture",
    "icon",
    "message",
    "message_tags",
    "permalink_url",
    "shares",
    "status_type",
    "updated_time",
];

/// Engagement summary fields appended to the post defaults for feed
/// queries. limit(0) keeps the payload to the summary counts.
pub const POST_CONNECTIONS_SUMMARY_FIELDS: &[&str] = &[
    "comments.summary(true).limit(0)",
    "reactions.summary(true).limit(0)",
];

/// Default public fields requested for a video.
pub const VIDEO_PUBLIC_FIELDS: &[&str] = &[
    "id",
    "created_time",
    "description",
    "embed_html",
    "embeddable",
    "length",
    "permalink_url",
    "picture",
    "published",
    "status",
    "title",
    "updated_time",
];
