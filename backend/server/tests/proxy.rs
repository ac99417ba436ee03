use std::net::SocketAddr;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use server::{config::Config, router, state::AppState};
use tokio::net::TcpListener;

const KEY: &str = "secret";

const TIGREAL: &str = r#"{"data":[{"id":"7","heroName":"Tigreal","role":"Tank","pickRate":12.5,"description":"A wall.","heroImage":"http://x/t.png"}]}"#;

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Boots the proxy in front of `upstream` and returns its base url.
async fn proxy_for(upstream: Router, api_key: Option<&str>) -> String {
    let upstream_address = spawn(upstream).await;

    let config = Config {
        port: 0,
        upstream_url: format!("http://{upstream_address}/api"),
        api_key: api_key.map(str::to_string),
    };

    let address = spawn(router(AppState::new(config))).await;

    format!("http://{address}")
}

fn listing(body: &'static str) -> Router {
    Router::new().route(
        "/api/ping",
        get(move || async move { ([(CONTENT_TYPE, "application/json")], body) }),
    )
}

fn searching() -> Router {
    async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Response {
        if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(KEY) {
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }

        match body {
            Value::Object(ref map) if map.get("action") != Some(&json!("search_heroes")) => {
                (StatusCode::BAD_REQUEST, "Unknown action").into_response()
            }
            _ if body.get("postBody") == Some(&json!("assassin")) => Json(json!({
                "ok": true,
                "hero": {
                    "id": 3, "heroName": "Karina", "role": "Assassin", "pickRate": 9.1,
                    "description": "...", "heroImage": "..."
                }
            }))
            .into_response(),
            _ => Json(json!({ "ok": false })).into_response(),
        }
    }

    Router::new().route("/api/echo", post(echo))
}

async fn search(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/api/heroes"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn list_normalizes_upstream_heroes() {
    let base = proxy_for(listing(TIGREAL), Some(KEY)).await;

    let response = reqwest::get(format!("{base}/api/heroes")).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.unwrap(),
        r#"[{"id":7,"heroName":"Tigreal","role":"Tank","pickRate":12.5,"description":"A wall.","heroImage":"http://x/t.png"}]"#
    );
}

#[tokio::test]
async fn list_is_repeatable() {
    let base = proxy_for(listing(TIGREAL), Some(KEY)).await;
    let url = format!("{base}/api/heroes");

    let first: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    let second: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn list_without_data_is_empty() {
    let base = proxy_for(listing(r#"{"message":"nothing here"}"#), Some(KEY)).await;

    let response = reqwest::get(format!("{base}/api/heroes")).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn list_passes_through_non_json_failures() {
    let upstream = Router::new().route(
        "/api/ping",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error") }),
    );
    let base = proxy_for(upstream, Some(KEY)).await;

    let response = reqwest::get(format!("{base}/api/heroes")).await.unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(response.text().await.unwrap(), "Internal Error");
}

#[tokio::test]
async fn list_passes_through_unparsable_json() {
    let upstream = Router::new().route(
        "/api/ping",
        get(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [(CONTENT_TYPE, "application/json")],
                "upstream down",
            )
        }),
    );
    let base = proxy_for(upstream, Some(KEY)).await;

    let response = reqwest::get(format!("{base}/api/heroes")).await.unwrap();

    assert_eq!(response.status(), 503);
    assert_eq!(response.text().await.unwrap(), "upstream down");
}

#[tokio::test]
async fn search_passes_through_empty_json_body() {
    let upstream = Router::new().route(
        "/api/echo",
        post(|| async { (StatusCode::OK, [(CONTENT_TYPE, "application/json")], "") }),
    );
    let base = proxy_for(upstream, Some(KEY)).await;

    let response = search(&base, json!({ "keyword": "assassin" })).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "");
}

#[tokio::test]
async fn list_mirrors_json_error_status() {
    let upstream = Router::new().route(
        "/api/ping",
        get(|| async { (StatusCode::FORBIDDEN, Json(json!({ "error": "bad key" }))) }),
    );
    let base = proxy_for(upstream, Some(KEY)).await;

    let response = reqwest::get(format!("{base}/api/heroes")).await.unwrap();

    assert_eq!(response.status(), 403);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn missing_key_is_sent_empty() {
    async fn key_as_hero(headers: HeaderMap) -> Json<Value> {
        let key = headers
            .get("x-api-key")
            .map(|v| v.to_str().unwrap().to_string());

        Json(json!({ "data": [{ "id": 1, "heroName": key }] }))
    }

    let upstream = Router::new().route("/api/ping", get(key_as_hero));
    let base = proxy_for(upstream, None).await;

    let heroes: Value = reqwest::get(format!("{base}/api/heroes"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(heroes, json!([{ "id": 1, "heroName": "" }]));
}

#[tokio::test]
async fn search_returns_single_hero() {
    let base = proxy_for(searching(), Some(KEY)).await;

    let response = search(&base, json!({ "keyword": "assassin" })).await;

    assert_eq!(response.status(), 200);
    let heroes: Value = response.json().await.unwrap();
    assert_eq!(heroes.as_array().unwrap().len(), 1);
    assert_eq!(heroes[0]["heroName"], "Karina");
    assert_eq!(heroes[0]["id"], 3);
}

#[tokio::test]
async fn search_miss_is_empty() {
    let base = proxy_for(searching(), Some(KEY)).await;

    let response = search(&base, json!({ "keyword": "nobody" })).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn search_without_keyword_still_forwards() {
    let base = proxy_for(searching(), Some(KEY)).await;

    let response = search(&base, json!({})).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn search_passes_through_non_json_failures() {
    let base = proxy_for(searching(), Some("wrong")).await;

    let response = search(&base, json!({ "keyword": "assassin" })).await;

    assert_eq!(response.status(), 401);
    assert_eq!(response.text().await.unwrap(), "Unauthorized");
}

#[tokio::test]
async fn search_rejects_malformed_body() {
    let base = proxy_for(searching(), Some(KEY)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/heroes"))
        .header(CONTENT_TYPE.as_str(), "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = closed.local_addr().unwrap();
    drop(closed);

    let config = Config {
        port: 0,
        upstream_url: format!("http://{address}/api"),
        api_key: Some(KEY.to_string()),
    };
    let base = format!("http://{}", spawn(router(AppState::new(config))).await);

    let response = reqwest::get(format!("{base}/api/heroes")).await.unwrap();

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn health() {
    let base = proxy_for(Router::new(), None).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}
