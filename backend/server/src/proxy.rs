//! # Hero Proxy
//!
//! The browser never talks to the upstream hero API directly. It calls `/api/heroes` and we
//! forward the request with the API key attached, then reshape whatever comes back.
//!
//!
//!
//! ## Reshaping
//! - Declared JSON: normalized into a list of heroes, upstream status kept
//! - Anything else: treated as an upstream failure, body and status passed through untouched
//!
//! Semantic failures (`ok: false`, no `hero`, no `data`) are not errors here, they just mean
//! an empty list. The client cannot tell them apart from "no matches".
//!
//!
//!
//! ## Notes
//! - No retries, no caching, no rate limiting
//! - No timeout beyond what the HTTP client does by default
//! - Every call is independent, so any number of replicas can run side by side
use axum::{
    Json,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use heroes::{
    Hero, Upstream, UpstreamBody, UpstreamReply, hero_from_search, heroes_from_listing,
};
use serde_json::Value;
use tracing::error;

use crate::error::AppError;

#[derive(Debug)]
pub enum ProxyReply {
    Heroes { status: StatusCode, heroes: Vec<Hero> },
    Passthrough { status: StatusCode, body: String },
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        match self {
            ProxyReply::Heroes { status, heroes } => (status, Json(heroes)).into_response(),
            ProxyReply::Passthrough { status, body } => {
                (status, [(CONTENT_TYPE, "text/plain;charset=UTF-8")], body).into_response()
            }
        }
    }
}

pub async fn list_heroes(upstream: &Upstream) -> Result<ProxyReply, AppError> {
    let reply = upstream.list().await?;

    Ok(reshape(reply, heroes_from_listing))
}

pub async fn search_heroes(
    upstream: &Upstream,
    keyword: Option<Value>,
) -> Result<ProxyReply, AppError> {
    let reply = upstream.search(keyword).await?;

    Ok(reshape(reply, hero_from_search))
}

fn reshape(reply: UpstreamReply, transform: fn(&Value) -> Vec<Hero>) -> ProxyReply {
    #[cfg(feature = "verbose")]
    tracing::info!("Upstream status: {}", reply.status);

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);

    match reply.body {
        UpstreamBody::Raw(body) => {
            error!("API error response: {body}");
            ProxyReply::Passthrough { status, body }
        }
        UpstreamBody::Json(json) => ProxyReply::Heroes {
            status,
            heroes: transform(&json),
        },
    }
}
