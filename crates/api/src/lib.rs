// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! kbforge-api: HTTP gateway for firmware compile jobs.
//!
//! Accepts compile requests, hands them to the queue backend, reconciles
//! live queue state with the durable metadata the worker writes at
//! completion, and streams finished artifacts back to clients. The
//! gateway is stateless; every request is served independently from the
//! injected queue and storage clients.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use kbforge_queue::JobQueue;
use kbforge_storage::ArtifactStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub mod artifacts;
pub mod env;
pub mod error;
pub mod handlers;
pub mod resolver;

pub use error::ApiError;

/// Shared dependencies injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub queue: Arc<dyn JobQueue>,
    pub store: Arc<dyn ArtifactStore>,
    pub version: &'static str,
    pub docs_url: String,
}

/// Build the application router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/v1", get(handlers::service_status))
        .route("/v1/compile", post(handlers::submit_compile))
        .route("/v1/compile/:job_id", get(handlers::job_status))
        .route("/v1/compile/:job_id/hex", get(handlers::download_firmware))
        .route("/v1/compile/:job_id/source", get(handlers::download_source))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and run the gateway until the process is stopped.
pub async fn serve(bind: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(addr = %bind, "compile gateway listening");
    axum::serve(listener, build_router(state)).await
}
