//! Facebook page object and its operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::{
    client::{ConnectionParams, GraphClient},
    error::{GraphError, GraphResult},
    params::{resolve_target, Fields},
    types::Paging,
};

use super::{
    post::Post, PAGE_PUBLIC_FIELDS, POST_CONNECTIONS_SUMMARY_FIELDS, POST_PUBLIC_FIELDS,
};

/// A Facebook page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page ID
    pub id: String,

    /// Page name
    #[serde(default)]
    pub name: Option<String>,

    /// Page username (vanity handle)
    #[serde(default)]
    pub username: Option<String>,

    /// About blurb
    #[serde(default)]
    pub about: Option<String>,

    /// Longer description
    #[serde(default)]
    pub description: Option<String>,

    /// Primary category name
    #[serde(default)]
    pub category: Option<String>,

    /// All categories the page belongs to
    #[serde(default)]
    pub category_list: Option<Vec<PageCategory>>,

    /// Number of fans (likes)
    #[serde(default)]
    pub fan_count: Option<u64>,

    /// Number of checkins
    #[serde(default)]
    pub checkins: Option<u64>,

    /// Number of ratings
    #[serde(default)]
    pub rating_count: Option<u64>,

    /// Engagement counts
    #[serde(default)]
    pub engagement: Option<PageEngagement>,

    /// Cover photo
    #[serde(default)]
    pub cover: Option<Value>,

    /// Profile picture
    #[serde(default)]
    pub picture: Option<Value>,

    /// Street address and coordinates
    #[serde(default)]
    pub location: Option<Value>,

    /// Address rendered on one line
    #[serde(default)]
    pub single_line_address: Option<String>,

    /// Canonical page URL
    #[serde(default)]
    pub link: Option<String>,

    /// Website listed by the page
    #[serde(default)]
    pub website: Option<String>,

    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Founding info free text
    #[serde(default)]
    pub founded: Option<String>,

    /// General info free text
    #[serde(default)]
    pub general_info: Option<String>,

    /// Verification status, e.g. "blue_verified"
    #[serde(default)]
    pub verification_status: Option<String>,
}

/// One entry of a page's category list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCategory {
    pub id: String,
    pub name: String,
}

/// Engagement counts for a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEngagement {
    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub social_sentence: Option<String>,
}

impl Page {
    /// Construct a page from one raw record. Pure, no I/O.
    pub fn new_from_json(record: Value) -> GraphResult<Self> {
        serde_json::from_value(record).map_err(GraphError::from)
    }
}

/// Parameters for the feed family of operations.
#[derive(Debug, Clone)]
pub struct FeedParams {
    /// Field selection; None uses the post defaults plus engagement
    /// summaries
    pub fields: Option<Fields>,

    /// Unix timestamp or strtotime value for the start of data
    pub since: Option<String>,

    /// Unix timestamp or strtotime value for the end of data
    pub until: Option<String>,

    /// Total posts to accumulate; None fetches all pages
    pub count: Option<usize>,

    /// Page size per request; should be no more than 100
    pub limit: Option<u32>,
}

impl Default for FeedParams {
    fn default() -> Self {
        Self {
            fields: None,
            since: None,
            until: None,
            count: Some(10),
            limit: Some(10),
        }
    }
}

impl FeedParams {
    fn into_connection_params(self) -> ConnectionParams {
        let fields = self.fields.unwrap_or_else(|| {
            Fields::new(
                POST_PUBLIC_FIELDS
                    .iter()
                    .chain(POST_CONNECTIONS_SUMMARY_FIELDS),
            )
        });
        ConnectionParams {
            fields: Some(fields),
            since: self.since,
            until: self.until,
            count: self.count,
            limit: self.limit,
        }
    }
}

/// Page operations over a [`GraphClient`].
#[derive(Debug, Clone, Copy)]
pub struct PageApi<'a> {
    client: &'a GraphClient,
}

impl GraphClient {
    /// Page operations.
    #[must_use]
    pub fn pages(&self) -> PageApi<'_> {
        PageApi { client: self }
    }
}

impl PageApi<'_> {
    /// Get information about a page as a raw record.
    ///
    /// The page is addressed by `page_id` when given, else by
    /// `username`. Fails with [`GraphError::InvalidParameter`] before
    /// any request when both are absent.
    #[instrument(skip(self, fields))]
    pub async fn get_info_json(
        &self,
        page_id: Option<&str>,
        username: Option<&str>,
        fields: Option<Fields>,
    ) -> GraphResult<Value> {
        let target = resolve_target(page_id, username, "page_id or username")?;
        let fields = fields.unwrap_or_else(|| Fields::new(PAGE_PUBLIC_FIELDS));
        self.client.get_object(target, &fields).await
    }

    /// Get information about a page as a typed object.
    pub async fn get_info(
        &self,
        page_id: Option<&str>,
        username: Option<&str>,
        fields: Option<Fields>,
    ) -> GraphResult<Page> {
        let data = self.get_info_json(page_id, username, fields).await?;
        Page::new_from_json(data)
    }

    /// Get several pages by id in one request, as raw records.
    #[instrument(skip(self, fields))]
    pub async fn get_batch_json(
        &self,
        ids: &[&str],
        fields: Option<Fields>,
    ) -> GraphResult<HashMap<String, Value>> {
        if ids.is_empty() {
            return Err(GraphError::invalid_parameter("Specify at least one id"));
        }
        let fields = fields.unwrap_or_else(|| Fields::new(PAGE_PUBLIC_FIELDS));
        self.client.get_objects(ids, &fields).await
    }

    /// Get several pages by id in one request, as typed objects.
    pub async fn get_batch(
        &self,
        ids: &[&str],
        fields: Option<Fields>,
    ) -> GraphResult<HashMap<String, Page>> {
        let data = self.get_batch_json(ids, fields).await?;
        data.into_iter()
            .map(|(id, record)| Ok((id, Page::new_from_json(record)?)))
            .collect()
    }

    /// Get the page's feed (posts and links by the page or visitors)
    /// as raw records plus the final paging block.
    pub async fn get_feed_json(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Value>, Option<Paging>)> {
        self.feed_connection_json(page_id, "feed", params).await
    }

    /// Get the page's feed as typed posts plus the final paging block.
    pub async fn get_feed(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Post>, Option<Paging>)> {
        let (records, paging) = self.get_feed_json(page_id, params).await?;
        let posts = records
            .into_iter()
            .map(Post::new_from_json)
            .collect::<GraphResult<Vec<_>>>()?;
        Ok((posts, paging))
    }

    /// Get the page's own posts as raw records.
    pub async fn get_posts_json(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Value>, Option<Paging>)> {
        self.feed_connection_json(page_id, "posts", params).await
    }

    /// Get the page's own posts as typed posts.
    pub async fn get_posts(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Post>, Option<Paging>)> {
        let (records, paging) = self.get_posts_json(page_id, params).await?;
        let posts = records
            .into_iter()
            .map(Post::new_from_json)
            .collect::<GraphResult<Vec<_>>>()?;
        Ok((posts, paging))
    }

    /// Get all published posts by the page as raw records.
    ///
    /// Requires a page access token.
    pub async fn get_published_posts_json(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Value>, Option<Paging>)> {
        self.feed_connection_json(page_id, "published_posts", params)
            .await
    }

    /// Get all published posts by the page as typed posts.
    pub async fn get_published_posts(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Post>, Option<Paging>)> {
        let (records, paging) = self.get_published_posts_json(page_id, params).await?;
        let posts = records
            .into_iter()
            .map(Post::new_from_json)
            .collect::<GraphResult<Vec<_>>>()?;
        Ok((posts, paging))
    }

    /// Get posts that tag the page as raw records.
    pub async fn get_tagged_posts_json(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Value>, Option<Paging>)> {
        self.feed_connection_json(page_id, "tagged", params).await
    }

    /// Get posts that tag the page as typed posts.
    pub async fn get_tagged_posts(
        &self,
        page_id: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Post>, Option<Paging>)> {
        let (records, paging) = self.get_tagged_posts_json(page_id, params).await?;
        let posts = records
            .into_iter()
            .map(Post::new_from_json)
            .collect::<GraphResult<Vec<_>>>()?;
        Ok((posts, paging))
    }

    async fn feed_connection_json(
        &self,
        page_id: &str,
        connection: &str,
        params: FeedParams,
    ) -> GraphResult<(Vec<Value>, Option<Paging>)> {
        self.client
            .get_full_connections(page_id, connection, &params.into_connection_params())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_client(mock_server: &MockServer) -> GraphClient {
        let config = GraphConfig {
            base_url: mock_server.uri(),
            ..GraphConfig::new("test_token")
        };
        GraphClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_get_info_by_page_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v12.0/20531316728"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "20531316728",
                "name": "Facebook App",
                "fan_count": 214643503,
                "category": "Product/service"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let page = client
            .pages()
            .get_info(Some("20531316728"), None, None)
            .await
            .unwrap();
        assert_eq!(page.id, "20531316728");
        assert_eq!(page.name.as_deref(), Some("Facebook App"));
        assert_eq!(page.fan_count, Some(214643503));
    }

    #[tokio::test]
    async fn test_get_info_by_username() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v12.0/facebookapp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "20531316728",
                "username": "facebookapp"
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let page = client
            .pages()
            .get_info(None, Some("facebookapp"), Some(Fields::new(["id", "username"])))
            .await
            .unwrap();
        assert_eq!(page.username.as_deref(), Some("facebookapp"));
    }

    #[tokio::test]
    async fn test_get_info_without_identifier_fails_before_request() {
        let mock_server = MockServer::start().await;
        // No mock mounted: any request would come back as an error
        // other than InvalidParameter.
        let client = test_client(&mock_server);

        let err = client.pages().get_info(None, None, None).await.unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { .. }));

        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_batch_typed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v12.0/"))
            .and(query_param("ids", "111,222"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "111": {"id": "111", "name": "One"},
                "222": {"id": "222", "name": "Two"}
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let pages = client
            .pages()
            .get_batch(&["111", "222"], None)
            .await
            .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages["111"].name.as_deref(), Some("One"));
    }

    #[tokio::test]
    async fn test_get_batch_empty_ids_fails() {
        let mock_server = MockServer::start().await;
        let client = test_client(&mock_server);

        let err = client.pages().get_batch(&[], None).await.unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_get_feed_maps_posts_and_keeps_paging() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v12.0/20531316728/feed"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "1_1", "message": "first"},
                    {"id": "1_2", "message": "second"}
                ],
                "paging": {"cursors": {"before": "B", "after": "A"}}
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let (posts, paging) = client
            .pages()
            .get_feed("20531316728", FeedParams::default())
            .await
            .unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].message.as_deref(), Some("first"));
        assert!(paging.is_some());
    }

    #[tokio::test]
    async fn test_get_tagged_posts_hits_tagged_connection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v12.0/20531316728/tagged"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "2_1"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let (posts, _) = client
            .pages()
            .get_tagged_posts("20531316728", FeedParams::default())
            .await
            .unwrap();
        assert_eq!(posts[0].id, "2_1");
    }

    #[tokio::test]
    async fn test_default_feed_fields_include_summaries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v12.0/20531316728/posts"))
            .and(query_param(
                "fields",
                Fields::new(
                    POST_PUBLIC_FIELDS
                        .iter()
                        .chain(POST_CONNECTIONS_SUMMARY_FIELDS),
                )
                .as_str(),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "3_1"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let (records, _) = client
            .pages()
            .get_posts_json("20531316728", FeedParams::default())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }
}
