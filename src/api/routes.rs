//! Router construction

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::api::handlers;
use crate::config::CorsConfig;
use crate::error::{AppError, Result};
use crate::AppState;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Result<Router> {
    let cors = create_cors_layer(&state.settings.cors)?;

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .route("/remove-bg", post(handlers::remove_bg))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

/// Create CORS layer from configuration.
///
/// Methods and headers mirror the preflight request, which is how "allow
/// everything" is expressed when credentials are enabled.
fn create_cors_layer(cors: &CorsConfig) -> Result<CorsLayer> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                AppError::Config(config::ConfigError::Message(format!(
                    "Invalid allowed origin '{}'",
                    origin
                )))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(cors.allow_credentials)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
