//! Notion database query client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::{NotionIcalError, NotionIcalResult};
use crate::notion::record::Record;

const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: u32 = 100;

/// One page of a database query
#[derive(Debug, Clone, Default)]
pub struct QueryPage {
    pub records: Vec<Record>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// A paged source of database records.
///
/// Implementations query records whose `date_property` is non-empty, sorted
/// ascending by that property, resuming from `cursor` when given.
#[async_trait]
pub trait DatabaseSource: Send + Sync {
    async fn query_page(
        &self,
        date_property: &str,
        cursor: Option<&str>,
    ) -> NotionIcalResult<QueryPage>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// HTTP client for the Notion REST API, bound to one database.
pub struct NotionClient {
    http: reqwest::Client,
    api_key: String,
    database_id: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> NotionIcalResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(NotionClient {
            http,
            api_key: config.notion_api_key.clone(),
            database_id: config.notion_database_id.clone(),
            base_url: config.notion_api_base_url.clone(),
        })
    }

    fn query_url(&self) -> String {
        format!(
            "{}/databases/{}/query",
            self.base_url.trim_end_matches('/'),
            self.database_id
        )
    }
}

/// Build the JSON body for a filtered, sorted database query.
fn query_body(date_property: &str, cursor: Option<&str>) -> Value {
    let mut body = json!({
        "filter": {
            "property": date_property,
            "date": { "is_not_empty": true },
        },
        "sorts": [
            { "property": date_property, "direction": "ascending" },
        ],
        "page_size": PAGE_SIZE,
    });

    if let Some(cursor) = cursor {
        body["start_cursor"] = Value::String(cursor.to_string());
    }

    body
}

/// Turn raw query results into records, skipping non-page objects.
fn decode_results(results: Vec<Value>) -> Vec<Record> {
    results
        .into_iter()
        .filter(|value| value.get("properties").is_some())
        .filter_map(|value| match serde_json::from_value::<Record>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Skipping undecodable query result: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl DatabaseSource for NotionClient {
    async fn query_page(
        &self,
        date_property: &str,
        cursor: Option<&str>,
    ) -> NotionIcalResult<QueryPage> {
        let response = self
            .http
            .post(self.query_url())
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&query_body(date_property, cursor))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or(ApiErrorBody {
                code: String::new(),
                message: text,
            });
            return Err(NotionIcalError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: QueryResponse =
            serde_json::from_slice(&bytes).map_err(|e| NotionIcalError::Decode(e.to_string()))?;

        Ok(QueryPage {
            records: decode_results(parsed.results),
            has_more: parsed.has_more,
            next_cursor: parsed.next_cursor,
        })
    }
}
