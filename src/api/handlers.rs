//! Request handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::gateway::{ImagePayload, ImageRequest};
use crate::AppState;

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /remove-bg?image_url=...`
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn remove_bg(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<ImageRequest>, QueryRejection>,
) -> Result<ImagePayload> {
    let Query(request) = query.map_err(|rejection| {
        let err = AppError::InvalidRequest(rejection.body_text());
        warn!(error = %err, "Rejected request");
        err
    })?;

    state
        .gateway
        .remove_background(&request)
        .await
        .map_err(|err| {
            if err.is_client_error() {
                warn!(url = %request.source_url, error = %err, "Failed to fetch source image");
            } else {
                error!(url = %request.source_url, error = %err, "Background removal failed");
            }
            err
        })
}
