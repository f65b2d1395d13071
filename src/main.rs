//! Match Odds Normalization Proxy
//!
//! Stateless reshaping service: each request fetches raw odds data for one
//! league from the upstream provider (through an intermediary fetch relay),
//! normalizes and deduplicates it, and responds with a clean JSON array of
//! match records. No scheduler, no storage, no cross-request state.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use odds_proxy::config::{self, Config};
use odds_proxy::error::ApiError;
use odds_proxy::{fetch, normalize, project};

#[derive(Clone)]
struct AppState {
    http_client: reqwest::Client,
}

/// Main endpoint: run the whole pipeline for one request. Upstream trouble
/// of any kind still answers 200 with an empty array; only configuration or
/// truly unexpected failures produce a 500.
async fn matches_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let config = Config::from_env()?;

    let raw = fetch::fetch_raw(&state.http_client, &config).await;
    let outcome = normalize::normalize(&raw);
    info!(
        "normalized {} matches across {} leagues",
        outcome.matches.len(),
        outcome.leagues.len()
    );

    let formatted = project::project(&outcome.matches);
    let body = serde_json::to_string_pretty(&formatted)
        .context("failed to serialize response")
        .map_err(ApiError::Internal)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "odds-proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(matches_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("odds_proxy=info".parse().unwrap()),
        )
        .init();

    info!("Match Odds Normalization Proxy");

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .build()
        .context("Failed to create HTTP client")?;

    let app = router(AppState { http_client });

    let addr = format!("0.0.0.0:{}", config::listen_port());
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
