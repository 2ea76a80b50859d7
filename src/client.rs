//! Graph API transport and the paginated connection fetcher.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    auth::appsecret_proof,
    config::GraphConfig,
    error::{GraphError, GraphResult},
    params::Fields,
    types::{ConnectionPage, ErrorBody, ErrorEnvelope, Paging},
};

/// Parameters shared by every page request within one connection fetch.
#[derive(Debug, Clone, Default)]
pub struct ConnectionParams {
    /// Field selection; None uses the server default
    pub fields: Option<Fields>,

    /// Unix timestamp or strtotime value for the start of data
    pub since: Option<String>,

    /// Unix timestamp or strtotime value for the end of data
    pub until: Option<String>,

    /// Total records to accumulate across pages; None fetches all
    pub count: Option<usize>,

    /// Page size per request; should be no more than 100. None uses
    /// the server default. Values above the server maximum are the
    /// server's problem, not clamped here.
    pub limit: Option<u32>,
}

/// Graph API client.
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Client,
    base_url: String,
    version: String,
    access_token: String,
    appsecret_proof: Option<String>,
    max_retries: u32,
    initial_delay_ms: u64,
    max_delay_ms: u64,
}

impl GraphClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build or the app
    /// secret is unusable as an HMAC key.
    pub fn new(config: &GraphConfig) -> GraphResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("fbgraph/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let proof = config
            .app_secret
            .as_deref()
            .map(|secret| appsecret_proof(secret, &config.access_token))
            .transpose()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            version: config.version.clone(),
            access_token: config.access_token.clone(),
            appsecret_proof: proof,
            max_retries: config.retry.max_attempts,
            initial_delay_ms: config.retry.initial_delay_ms,
            max_delay_ms: config.retry.max_delay_ms,
        })
    }

    /// Get a single object by id.
    #[instrument(skip(self, fields))]
    pub async fn get_object(&self, object_id: &str, fields: &Fields) -> GraphResult<Value> {
        let params = vec![("fields".to_string(), fields.as_str().to_string())];
        self.get(object_id, &params).await
    }

    /// Get several objects in one multiplexed request.
    ///
    /// Issues a single GET against the version root with a
    /// comma-joined `ids` parameter; the response maps each id to its
    /// record.
    #[instrument(skip(self, fields))]
    pub async fn get_objects(
        &self,
        ids: &[&str],
        fields: &Fields,
    ) -> GraphResult<HashMap<String, Value>> {
        let params = vec![
            ("ids".to_string(), ids.join(",")),
            ("fields".to_string(), fields.as_str().to_string()),
        ];
        self.get("", &params).await
    }

    /// Get one page of a connection.
    #[instrument(skip(self, params, after))]
    pub async fn get_connection(
        &self,
        object_id: &str,
        connection: &str,
        params: &ConnectionParams,
        after: Option<&str>,
    ) -> GraphResult<ConnectionPage> {
        let mut query = Vec::new();
        if let Some(fields) = &params.fields {
            query.push(("fields".to_string(), fields.as_str().to_string()));
        }
        if let Some(since) = &params.since {
            query.push(("since".to_string(), since.clone()));
        }
        if let Some(until) = &params.until {
            query.push(("until".to_string(), until.clone()));
        }
        if let Some(limit) = params.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(after) = after {
            query.push(("after".to_string(), after.to_string()));
        }

        self.get(&format!("{object_id}/{connection}"), &query).await
    }

    /// Accumulate a connection across pages.
    ///
    /// Issues page requests until `params.count` records have been
    /// accumulated, the API reports no further page, or a page comes
    /// back empty. Returns the raw records plus the paging block of
    /// the last page actually fetched; mapping records into typed
    /// resources is the caller's job.
    ///
    /// With `count = Some(n)` the result is truncated to exactly `n`
    /// records. A fetch either completes whole or fails whole: any
    /// page-level error aborts without partial results.
    #[instrument(skip(self, params))]
    pub async fn get_full_connections(
        &self,
        object_id: &str,
        connection: &str,
        params: &ConnectionParams,
    ) -> GraphResult<(Vec<Value>, Option<Paging>)> {
        let mut items: Vec<Value> = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let page = self
                .get_connection(object_id, connection, params, after.as_deref())
                .await?;

            let page_was_empty = page.data.is_empty();
            items.extend(page.data);
            let paging = page.paging;

            // An empty page is end-of-data even below the requested
            // count; guards against looping on an exhausted cursor.
            if page_was_empty {
                debug!(object_id, connection, total = items.len(), "Empty page, stopping");
                return Ok((items, paging));
            }

            if let Some(count) = params.count {
                if items.len() >= count {
                    items.truncate(count);
                    return Ok((items, paging));
                }
            }

            match paging.as_ref().and_then(Paging::next_cursor) {
                Some(cursor) => after = Some(cursor.to_owned()),
                None => return Ok((items, paging)),
            }
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> GraphResult<T> {
        let url = format!("{}/{}/{}", self.base_url, self.version, path);
        let mut delay = Duration::from_millis(self.initial_delay_ms);
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(attempt = attempts, path, "Making Graph API request");

            let mut req = self.client.get(&url).query(params).query(&[(
                "access_token",
                self.access_token.as_str(),
            )]);
            if let Some(proof) = &self.appsecret_proof {
                req = req.query(&[("appsecret_proof", proof.as_str())]);
            }

            let result = req.send().await;

            match result {
                Ok(response) => match self.handle_response(response).await {
                    Ok(data) => return Ok(data),
                    Err(e) if e.is_retryable() && attempts < self.max_retries => {
                        if let Some(retry_after) = e.retry_after() {
                            delay = retry_after;
                        }
                        warn!(
                            attempt = attempts,
                            delay_ms = delay.as_millis(),
                            error = %e,
                            "Retrying Graph API request"
                        );
                        tokio::time::sleep(delay).await;
                        delay = std::cmp::min(delay * 2, Duration::from_millis(self.max_delay_ms));
                    }
                    Err(e) => return Err(e),
                },
                Err(e) if e.is_timeout() || e.is_connect() => {
                    if attempts < self.max_retries {
                        warn!(
                            attempt = attempts,
                            delay_ms = delay.as_millis(),
                            error = %e,
                            "Retrying after connection error"
                        );
                        tokio::time::sleep(delay).await;
                        delay = std::cmp::min(delay * 2, Duration::from_millis(self.max_delay_ms));
                    } else {
                        return Err(GraphError::Http(e));
                    }
                }
                Err(e) => return Err(GraphError::Http(e)),
            }
        }
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> GraphResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&bytes).map_err(GraphError::from);
        }

        let body = serde_json::from_slice::<ErrorEnvelope>(&bytes)
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| ErrorBody {
                message: Some(String::from_utf8_lossy(&bytes).into_owned()),
                error_type: None,
                code: None,
                error_subcode: None,
                fbtrace_id: None,
            });

        Err(GraphError::Api {
            status: status.as_u16(),
            code: body.code.unwrap_or(-1),
            error_subcode: body.error_subcode,
            error_type: body.error_type,
            message: body.message.unwrap_or_else(|| "Unknown error".into()),
            fbtrace_id: body.fbtrace_id,
        })
    }
}
