//! HTTP handlers
//!
//! Each handler maps one registry operation onto a JSON request/response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::chain::{Block, ChainError, ChainReport, OwnedStar, Star};
use crate::node::StarRegistry;
use crate::wallet::decode_address;

/// Error returned by handlers
#[derive(Debug)]
pub enum ApiError {
    Chain(ChainError),
    BadRequest(String),
    NotFound(String),
}

impl From<ChainError> for ApiError {
    fn from(err: ChainError) -> Self {
        ApiError::Chain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            ApiError::Chain(ChainError::RegistrationRejected(rejection)) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!("registration rejected: {}", rejection),
                    "staleMessage": rejection.stale_message,
                    "badSignature": rejection.bad_signature,
                }),
            ),
            ApiError::Chain(err @ ChainError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, json!({ "error": err.to_string() }))
            }
            ApiError::Chain(err) => {
                error!(%err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": err.to_string() }))
            }
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HeightResponse {
    pub height: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChallengeRequest {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitStarRequest {
    pub address: String,
    pub message: String,
    pub signature: String,
    pub star: Star,
}

/// GET /height
pub async fn get_height(State(registry): State<StarRegistry>) -> Json<HeightResponse> {
    Json(HeightResponse {
        height: registry.height().await,
    })
}

/// GET /block/height/:height
pub async fn get_block_by_height(
    State(registry): State<StarRegistry>,
    Path(height): Path<u64>,
) -> Result<Json<Block>, ApiError> {
    registry
        .find_by_height(height)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no block at height {}", height)))
}

/// GET /block/hash/:hash
pub async fn get_block_by_hash(
    State(registry): State<StarRegistry>,
    Path(hash): Path<String>,
) -> Result<Json<Block>, ApiError> {
    Ok(Json(registry.find_by_hash(&hash).await?))
}

/// POST /requestValidation
pub async fn request_validation(
    State(registry): State<StarRegistry>,
    Json(request): Json<ChallengeRequest>,
) -> Result<Json<String>, ApiError> {
    decode_address(&request.address).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(registry.request_ownership_challenge(&request.address).await))
}

/// POST /submitstar
pub async fn submit_star(
    State(registry): State<StarRegistry>,
    Json(request): Json<SubmitStarRequest>,
) -> Result<Json<Block>, ApiError> {
    let block = registry
        .submit_registration(&request.address, &request.message, &request.signature, request.star)
        .await?;
    Ok(Json(block))
}

/// GET /blocks/:address
pub async fn get_stars_by_owner(
    State(registry): State<StarRegistry>,
    Path(address): Path<String>,
) -> Result<Json<Vec<OwnedStar>>, ApiError> {
    Ok(Json(registry.stars_owned_by(&address).await?))
}

/// GET /validateChain
pub async fn validate_chain(
    State(registry): State<StarRegistry>,
) -> Result<Json<ChainReport>, ApiError> {
    Ok(Json(registry.validate_chain().await?))
}
