use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success envelope. The payload's fields are flattened next to `success`,
/// so a listing renders as `{ "success": true, "events": [...], ... }`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

pub fn success<T>(data: T) -> impl IntoResponse
where
    T: Serialize,
{
    with_status(StatusCode::OK, data, None)
}

pub fn success_with_message<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    with_status(StatusCode::OK, data, Some(message.into()))
}

pub fn created<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    with_status(StatusCode::CREATED, data, Some(message.into()))
}

fn with_status<T>(status: StatusCode, data: T, message: Option<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        message,
        data,
    };
    (status, Json(body)).into_response()
}

pub fn error(code: &str, message: impl Into<String>, status: StatusCode) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: message.into(),
        code: code.to_string(),
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        status: &'static str,
    }

    #[test]
    fn test_success_envelope_flattens_payload() {
        let body = ApiResponse {
            success: true,
            message: None,
            data: Payload { status: "ok" },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "status": "ok" }));
    }

    #[test]
    fn test_error_status_is_preserved() {
        let response = error("NOT_FOUND", "Event not found", StatusCode::NOT_FOUND);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
