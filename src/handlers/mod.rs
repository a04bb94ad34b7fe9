use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::utils::response::success_with_message;

pub mod events;

pub use events::{create_event, get_event, list_events};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "campus-events-api",
    };

    success_with_message(payload, "Campus events API is running").into_response()
}
