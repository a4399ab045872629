//! Unit tests for error classification and response bodies

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use bg_removal_gateway::AppError;

async fn detail_of(err: AppError) -> (StatusCode, String) {
    let response = err.into_response();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, value["detail"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn test_network_error_response() {
    let (status, detail) = detail_of(AppError::Network("dns error".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail, "Network or request error: dns error");
}

#[tokio::test]
async fn test_upstream_fetch_response() {
    let (status, detail) = detail_of(AppError::UpstreamFetch {
        url: "https://bucket.example/a.png".to_string(),
        status: 404,
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        detail,
        "Failed to fetch image from URL: https://bucket.example/a.png with status code 404"
    );
}

#[tokio::test]
async fn test_processing_error_response() {
    let (status, detail) =
        detail_of(AppError::Processing("cannot identify image file".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(detail, "Internal server error: cannot identify image file");
}

#[test]
fn test_client_error_classification() {
    assert!(AppError::Network(String::new()).is_client_error());
    assert!(AppError::InvalidRequest(String::new()).is_client_error());
    assert!(!AppError::Internal(String::new()).is_client_error());
}
