use heroes::Hero;
use reqwest::{Client, RequestBuilder};
use serde_json::json;
use tracing::error;

use crate::view::Query;

pub const HEROES_PATH: &str = "api/heroes";

/// What a request to the backend ended in.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Heroes(Vec<Hero>),
    Failed(String),
}

#[derive(Clone)]
pub struct ProxyClient {
    client: Client,
    url: String,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}/{HEROES_PATH}", base_url.trim_end_matches('/')),
        }
    }

    pub async fn list(&self) -> Outcome {
        fetch(self.client.get(&self.url))
            .await
            .unwrap_or_else(|e| {
                error!("Error fetching heroes: {e}");
                Outcome::Failed(e.to_string())
            })
    }

    pub async fn search(&self, keyword: &str) -> Outcome {
        let request = self.client.post(&self.url).json(&json!({ "keyword": keyword }));

        fetch(request).await.unwrap_or_else(|e| {
            error!("Error searching heroes: {e}");
            Outcome::Failed(e.to_string())
        })
    }

    pub async fn execute(&self, query: &Query) -> Outcome {
        match query {
            Query::List => self.list().await,
            Query::Search(keyword) => self.search(keyword).await,
        }
    }
}

// Status is not checked, an error status with a JSON list still yields heroes.
async fn fetch(request: RequestBuilder) -> Result<Outcome, reqwest::Error> {
    let heroes = request.send().await?.json::<Vec<Hero>>().await?;

    Ok(Outcome::Heroes(heroes))
}
