//! Hero Pedia backend.
//!
//! Catalog of game heroes for signed-in users. The hero data itself lives in a third party API,
//! this server is the only thing that knows its key.
//!
//!
//!
//! # General Infrastructure
//! - Browser calls `/api/heroes` on the same origin
//! - Server forwards to the upstream hero API with `x-api-key` attached
//! - Upstream replies are reshaped into a stable hero list before going back
//! - Sign-in is handled by an external identity provider, not here
//!
//!
//!
//! # Routes
//!
//! | Method | Path          | Upstream    | Returns                |
//! |--------|---------------|-------------|------------------------|
//! | GET    | `/api/heroes` | `GET /ping` | every hero             |
//! | POST   | `/api/heroes` | `POST /echo`| zero or one hero       |
//! | GET    | `/health`     | none        | `ok`                   |
//!
//! `POST` takes `{ "keyword": "..." }`. Statuses from upstream are mirrored as is.
//!
//!
//!
//! # Setup
//!
//! Environment
//! - `RUST_PORT`: listen port, defaults to 3000
//! - `UPSTREAM_URL`: upstream base, defaults to `https://ipt-keys.vercel.app/api`
//! - `MY_KEY`: upstream API key, falls back to `/run/secrets/MY_KEY`
//! - `RUST_LOG`: log filter
//!
//! Run.
//! ```sh
//! RUST_LOG=info MY_KEY=... cargo run -p hero-pedia
//! ```
//!
//! Log upstream statuses too.
//! ```sh
//! cargo run -p hero-pedia --features server/verbose
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

use signal::ctrl_c;
#[cfg(unix)]
use signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use error::StartupError;
use routes::{health_handler, list_handler, search_handler};
use state::AppState;

pub const HEROES_ROUTE: &str = "/api/heroes";
pub const HEALTH_ROUTE: &str = "/health";

pub async fn start_server() -> Result<(), StartupError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config);

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(HEROES_ROUTE, get(list_handler).post(search_handler))
        .route(HEALTH_ROUTE, get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
