//! Handler for the secrets endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::secrets::SecretsResponse;

use super::routes::AppState;

/// ANY /secret
/// Return every secret loaded at startup, in walk order.
pub async fn get_secrets(State(state): State<Arc<AppState>>) -> Response {
    let body = SecretsResponse {
        secrets: state.secrets.secrets(),
    };
    json_response(&body)
}

/// Serialize `value` as a `200` JSON response, or `500` if it cannot be serialized.
fn json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(json) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize secrets as JSON");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to serialize secrets",
            )
                .into_response()
        }
    }
}
