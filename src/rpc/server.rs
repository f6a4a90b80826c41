//! HTTP server
//!
//! Axum router exposing the registry operations.

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::node::StarRegistry;
use crate::rpc::methods::{
    get_block_by_hash, get_block_by_height, get_height, get_stars_by_owner, request_validation,
    submit_star, validate_chain,
};

/// Build the router over `registry`
pub fn router(registry: StarRegistry) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/height", get(get_height))
        .route("/block/height/:height", get(get_block_by_height))
        .route("/block/hash/:hash", get(get_block_by_hash))
        .route("/requestValidation", post(request_validation))
        .route("/submitstar", post(submit_star))
        .route("/blocks/:address", get(get_stars_by_owner))
        .route("/validateChain", get(validate_chain))
        .layer(cors)
        .with_state(registry)
}

/// Serve the router on `addr` until the process is stopped
pub async fn start_rpc_server(registry: StarRegistry, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "RPC server listening");
    axum::serve(listener, router(registry)).await
}
