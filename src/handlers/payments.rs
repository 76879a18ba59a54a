use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::models::payment::{PaymentRequest, PaymentResponse};
use crate::services::{PaymentService, ServiceError};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(e) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
            }
            ServiceError::InvalidBody(details) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid request body", "details": details })),
            )
                .into_response(),
            ServiceError::Internal(details) => internal_error(details),
        }
    }
}

pub fn internal_error(details: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal_error", "details": details })),
    )
        .into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map_or(false, |mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

// Bodies not sent as application/json are ignored and read as `{}`.
fn parse_request(headers: &HeaderMap, body: &[u8]) -> Result<PaymentRequest, ServiceError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PaymentRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ServiceError::InvalidBody(e.to_string()))
}

pub async fn create_payment(
    State(service): State<Arc<PaymentService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PaymentResponse>, ServiceError> {
    let request = parse_request(&headers, &body)?;

    match service.create_payment(request).await {
        Ok(response) => Ok(Json(response)),
        Err(ServiceError::Internal(details)) => {
            error!("Failed to create payment: {}", details);
            Err(ServiceError::Internal(details))
        }
        Err(e) => Err(e),
    }
}
