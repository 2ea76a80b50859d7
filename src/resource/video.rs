//! Facebook video object and its operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::{
    client::{ConnectionParams, GraphClient},
    error::{GraphError, GraphResult},
    params::Fields,
    types::Paging,
};

use super::VIDEO_PUBLIC_FIELDS;

/// A video hosted on Facebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// Video ID
    pub id: String,

    /// Video title
    #[serde(default)]
    pub title: Option<String>,

    /// Description text
    #[serde(default)]
    pub description: Option<String>,

    /// Creation timestamp (ISO 8601)
    #[serde(default)]
    pub created_time: Option<String>,

    /// Last update timestamp (ISO 8601)
    #[serde(default)]
    pub updated_time: Option<String>,

    /// Duration in seconds
    #[serde(default)]
    pub length: Option<f64>,

    /// Permanent URL (relative to facebook.com)
    #[serde(default)]
    pub permalink_url: Option<String>,

    /// Thumbnail URL
    #[serde(default)]
    pub picture: Option<String>,

    /// HTML embed code
    #[serde(default)]
    pub embed_html: Option<String>,

    /// Whether embedding is allowed
    #[serde(default)]
    pub embeddable: Option<bool>,

    /// Whether the video is published
    #[serde(default)]
    pub published: Option<bool>,

    /// Live broadcast status
    #[serde(default)]
    pub live_status: Option<String>,

    /// Encoding status (kept raw; shape varies)
    #[serde(default)]
    pub status: Option<Value>,
}

impl Video {
    /// Construct a video from one raw record. Pure, no I/O.
    pub fn new_from_json(record: Value) -> GraphResult<Self> {
        serde_json::from_value(record).map_err(GraphError::from)
    }
}

/// Parameters for listing an object's videos.
#[derive(Debug, Clone)]
pub struct VideosParams {
    /// Field selection; None uses the video defaults
    pub fields: Option<Fields>,

    /// Unix timestamp or strtotime value for the start of data
    pub since: Option<String>,

    /// Unix timestamp or strtotime value for the end of data
    pub until: Option<String>,

    /// Total videos to accumulate; None fetches all pages
    pub count: Option<usize>,

    /// Page size per request; should be no more than 100
    pub limit: Option<u32>,
}

impl Default for VideosParams {
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

/// Video operations over a [`GraphClient`].
#[derive(Debug, Clone, Copy)]
pub struct VideoApi<'a> {
    client: &'a GraphClient,
}

impl GraphClient {
    /// Video operations.
    #[must_use]
    pub fn videos(&self) -> VideoApi<'_> {
        VideoApi { client: self }
    }
}

impl VideoApi<'_> {
    /// Get information about a video as a raw record.
    #[instrument(skip(self, fields))]
    pub async fn get_info_json(
        &self,
        video_id: &str,
        fields: Option<Fields>,
    ) -> GraphResult<Value> {
        let fields = fields.unwrap_or_else(|| Fields::new(VIDEO_PUBLIC_FIELDS));
        self.client.get_object(video_id, &fields).await
    }

    /// Get information about a video as a typed object.
    pub async fn get_info(
        &self,
        video_id: &str,
        fields: Option<Fields>,
    ) -> GraphResult<Video> {
        let data = self.get_info_json(video_id, fields).await?;
        Video::new_from_json(data)
    }

    /// Get several videos by id in one request, as raw records.
    #[instrument(skip(self, fields))]
    pub async fn get_batch_json(
        &self,
        ids: &[&str],
        fields: Option<Fields>,
    ) -> GraphResult<HashMap<String, Value>> {
        if ids.is_empty() {
            return Err(GraphError::invalid_parameter("Specify at least one id"));
        }
        let fields = fields.unwrap_or_else(|| Fields::new(VIDEO_PUBLIC_FIELDS));
        self.client.get_objects(ids, &fields).await
    }

    /// Get several videos by id in one request, as typed objects.
    pub async fn get_batch(
        &self,
        ids: &[&str],
        fields: Option<Fields>,
    ) -> GraphResult<HashMap<String, Video>> {
        let data = self.get_batch_json(ids, fields).await?;
        data.into_iter()
            .map(|(id, record)| Ok((id, Video::new_from_json(record)?)))
            .collect()
    }

    /// List the videos of a page, group, event or user as raw records
    /// plus the final paging block.
    pub async fn get_videos_by_object_json(
        &self,
        object_id: &str,
        params: VideosParams,
    ) -> GraphResult<(Vec<Value>, Option<Paging>)> {
        let fields = params
            .fields
            .unwrap_or_else(|| Fields::new(VIDEO_PUBLIC_FIELDS));
        let connection_params = ConnectionParams {
            fields: Some(fields),
            since: params.since,
            until: params.until,
            count: params.count,
            limit: params.limit,
        };
        self.client
            .get_full_connections(object_id, "videos", &connection_params)
            .await
    }

    /// List the videos of a page, group, event or user as typed
    /// objects plus the final paging block.
    pub async fn get_videos_by_object(
        &self,
        object_id: &str,
        params: VideosParams,
    ) -> GraphResult<(Vec<Video>, Option<Paging>)> {
        let (records, paging) = self.get_videos_by_object_json(object_id, params).await?;
        let videos = records
            .into_iter()
            .map(Video::new_from_json)
            .collect::<GraphResult<Vec<_>>>()?;
        Ok((videos, paging))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use wiremock::{
        matchers::{method, path, query_param, query_param_is_missing},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_client(mock_server: &MockServer) -> GraphClient {
        let config = GraphConfig {
            base_url: mock_server.uri(),
            ..GraphConfig::new("test_token")
        };
        GraphClient::new(&config).unwrap()
    }

    fn video_page(ids: std::ops::Range<u32>, next: Option<&str>) -> serde_json::Value {
        let data: Vec<_> = ids
            .map(|i| serde_json::json!({"id": i.to_string(), "title": format!("video {i}")}))
            .collect();
        match next {
            Some(cursor) => serde_json::json!({
                "data": data,
                "paging": {
                    "cursors": {"before": "B", "after": cursor},
                    "next": format!("https://graph.facebook.com/v12.0/x/videos?after={cursor}")
                }
            }),
            None => serde_json::json!({
                "data": data,
                "paging": {"cursors": {"before": "B", "after": "END"}}
            }),
        }
    }

    #[tokio::test]
    async fn test_get_videos_by_object_with_count() {
        let mock_server = MockServer::start().await;
        let page_id = "367152833370567";

        Mock::given(method("GET"))
            .and(path(format!("/v12.0/{page_id}/videos")))
            .and(query_param("limit", "5"))
            .and(query_param_is_missing("after"))
            .respond_with(ResponseTemplate::new(200).set_body_json(video_page(0..5, Some("P2"))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let (videos, _) = client
            .videos()
            .get_videos_by_object(
                page_id,
                VideosParams {
                    count: Some(3),
                    limit: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(videos.len(), 3);
    }

    #[tokio::test]
    async fn test_get_videos_by_object_fetches_all() {
        let mock_server = MockServer::start().await;
        let page_id = "367152833370567";

        Mock::given(method("GET"))
            .and(path(format!("/v12.0/{page_id}/videos")))
            .and(query_param_is_missing("after"))
            .respond_with(ResponseTemplate::new(200).set_body_json(video_page(0..5, Some("P2"))))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/v12.0/{page_id}/videos")))
            .and(query_param("after", "P2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(video_page(5..9, None)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let (videos, _) = client
            .videos()
            .get_videos_by_object(
                page_id,
                VideosParams {
                    count: None,
                    limit: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(videos.len(), 9);
        assert_eq!(videos[8].title.as_deref(), Some("video 8"));
    }

    #[tokio::test]
    async fn test_get_video_info() {
        let mock_server = MockServer::start().await;
        let video_id = "320504219400220";

        Mock::given(method("GET"))
            .and(path(format!("/v12.0/{video_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": video_id,
                "title": "A video",
                "length": 123.45,
                "embeddable": true
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let video = client.videos().get_info(video_id, None).await.unwrap();
        assert_eq!(video.id, video_id);
        assert_eq!(video.length, Some(123.45));

        let raw = client.videos().get_info_json(video_id, None).await.unwrap();
        assert_eq!(raw["id"], video_id);
    }

    #[tokio::test]
    async fn test_get_videos_batch() {
        let mock_server = MockServer::start().await;
        let ids = ["320504219400220", "1237122236642185"];

        Mock::given(method("GET"))
            .and(path("/v12.0/"))
            .and(query_param("ids", ids.join(",").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "320504219400220": {"id": "320504219400220"},
                "1237122236642185": {"id": "1237122236642185"}
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server);
        let videos = client.videos().get_batch(&ids, None).await.unwrap();
        for (id, video) in &videos {
            assert!(ids.contains(&id.as_str()));
            assert_eq!(id, &video.id);
        }
    }
}
