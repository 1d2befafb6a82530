//! Concrete Pocket API client over HTTP.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::{debug, instrument};

use crate::config::PocketCredentials;
use crate::http;

use super::{Article, ArticleState, BatchDeleteOutcome, BookmarkService, PAGE_SIZE, PocketError};

const DEFAULT_BASE_URL: &str = "https://getpocket.com";
const GET_ENDPOINT: &str = "/v3/get";
const SEND_ENDPOINT: &str = "/v3/send";

/// HTTP client for the Pocket v3 API.
#[derive(Debug, Clone)]
pub struct PocketClient {
    http: reqwest::Client,
    base_url: String,
    credentials: PocketCredentials,
}

impl PocketClient {
    /// Creates a client against the production Pocket API.
    ///
    /// # Errors
    ///
    /// Returns [`PocketError::Client`] if the HTTP client cannot be built.
    pub fn new(credentials: PocketCredentials) -> Result<Self, PocketError> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Creates a client against an alternate base URL (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`PocketError::Client`] if the HTTP client cannot be built.
    pub fn with_base_url(
        credentials: PocketCredentials,
        base_url: impl Into<String>,
    ) -> Result<Self, PocketError> {
        let http = http::build_client().map_err(|source| PocketError::Client { source })?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    async fn send_actions(&self, actions: serde_json::Value) -> Result<SendResponse, PocketError> {
        let body = json!({
            "consumer_key": self.credentials.consumer_key,
            "access_token": self.credentials.access_token,
            "actions": actions,
        });

        let response = self
            .http
            .post(format!("{}{SEND_ENDPOINT}", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|source| PocketError::Request {
                endpoint: SEND_ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PocketError::Status {
                endpoint: SEND_ENDPOINT,
                status: status.as_u16(),
            });
        }

        response
            .json::<SendResponse>()
            .await
            .map_err(|source| PocketError::Decode {
                endpoint: SEND_ENDPOINT,
                source,
            })
    }
}

#[async_trait]
impl BookmarkService for PocketClient {
    #[instrument(skip(self), fields(state = state.as_query()))]
    async fn list_articles(
        &self,
        state: ArticleState,
        offset: usize,
    ) -> Result<Vec<Article>, PocketError> {
        let count = PAGE_SIZE.to_string();
        let offset = offset.to_string();
        let form = [
            ("consumer_key", self.credentials.consumer_key.as_str()),
            ("access_token", self.credentials.access_token.as_str()),
            ("state", state.as_query()),
            ("sort", "newest"),
            ("detailType", "complete"),
            ("count", count.as_str()),
            ("offset", offset.as_str()),
        ];

        let response = self
            .http
            .post(format!("{}{GET_ENDPOINT}", self.base_url))
            .header("X-Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|source| PocketError::Request {
                endpoint: GET_ENDPOINT,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PocketError::Status {
                endpoint: GET_ENDPOINT,
                status: status.as_u16(),
            });
        }

        let page: GetResponse =
            response
                .json()
                .await
                .map_err(|source| PocketError::Decode {
                    endpoint: GET_ENDPOINT,
                    source,
                })?;

        debug!(count = page.list.len(), "retrieved article page");
        Ok(page.list)
    }

    #[instrument(skip_all, fields(requested = item_ids.len()))]
    async fn batch_delete(&self, item_ids: &[String]) -> Result<BatchDeleteOutcome, PocketError> {
        let actions: Vec<_> = item_ids
            .iter()
            .map(|item_id| json!({ "action": "delete", "item_id": item_id }))
            .collect();

        let response = self.send_actions(serde_json::Value::Array(actions)).await?;
        Ok(BatchDeleteOutcome {
            requested: item_ids.len(),
            performed: response.performed_count(),
        })
    }

    #[instrument(skip_all, fields(count = urls.len()))]
    async fn batch_add(&self, urls: &[String]) -> Result<(), PocketError> {
        let actions: Vec<_> = urls
            .iter()
            .map(|url| json!({ "action": "add", "url": url }))
            .collect();

        self.send_actions(serde_json::Value::Array(actions)).await?;
        Ok(())
    }
}

/// Response of `/v3/get`.
#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default, deserialize_with = "deserialize_article_list")]
    list: Vec<Article>,
}

/// Response of `/v3/send`.
#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    action_results: Vec<serde_json::Value>,
}

impl SendResponse {
    /// Number of actions the service reports as carried out.
    ///
    /// Pocket documents `action_results` as per-action booleans, but older
    /// deployments answered with the action name as a string.
    fn performed_count(&self) -> usize {
        self.action_results
            .iter()
            .filter(|result| {
                result.as_bool() == Some(true) || result.as_str() == Some("deleted")
            })
            .count()
    }
}

/// Pocket serializes an empty `list` as `[]` and a non-empty one as an
/// object keyed by item id. Accept both.
fn deserialize_article_list<'de, D>(deserializer: D) -> Result<Vec<Article>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListShape {
        Keyed(BTreeMap<String, Article>),
        Plain(Vec<Article>),
    }

    Ok(match ListShape::deserialize(deserializer)? {
        ListShape::Keyed(map) => map.into_values().collect(),
        ListShape::Plain(list) => list,
    })
}
