use reqwest::{Client, Response, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::is_json;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const LIST_PATH: &str = "ping";
pub const SEARCH_PATH: &str = "echo";
pub const SEARCH_ACTION: &str = "search_heroes";

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    /// Anything not declared as JSON, or declared but unparsable, kept verbatim.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: UpstreamBody,
}

/// Body of the search call. A missing keyword drops `postBody` entirely.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_body: Option<Value>,
    pub action: &'static str,
}

#[derive(Clone)]
pub struct Upstream {
    client: Client,
    base_url: String,
    api_key: String,
}

impl Upstream {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn list(&self) -> Result<UpstreamReply, UpstreamError> {
        let response = self
            .client
            .get(self.url(LIST_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        read_reply(response).await
    }

    pub async fn search(&self, keyword: Option<Value>) -> Result<UpstreamReply, UpstreamError> {
        let payload = SearchPayload {
            post_body: keyword,
            action: SEARCH_ACTION,
        };

        // .json() also sets the content type
        let response = self
            .client
            .post(self.url(SEARCH_PATH))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await?;

        read_reply(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

async fn read_reply(response: Response) -> Result<UpstreamReply, UpstreamError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    if !is_json(content_type.as_deref()) {
        return Ok(UpstreamReply {
            status,
            body: UpstreamBody::Raw(response.text().await?),
        });
    }

    let bytes = response.bytes().await?;

    let body = match serde_json::from_slice(&bytes) {
        Ok(json) => UpstreamBody::Json(json),
        Err(e) => {
            warn!("Upstream declared JSON but sent something else: {e}");
            UpstreamBody::Raw(String::from_utf8_lossy(&bytes).into_owned())
        }
    };

    Ok(UpstreamReply { status, body })
}
