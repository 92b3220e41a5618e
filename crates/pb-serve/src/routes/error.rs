use axum::http::StatusCode;
use axum::Json;
use pb_core::PostbackError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub correlation_id: Option<String>,
}

pub fn map_error(
    err: &PostbackError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code) = match err {
        PostbackError::Persistence { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "persistence_error")
        }
        PostbackError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
    };
    if status.is_server_error() {
        tracing::error!(error = %err, code, "request failed");
    }

    (
        status,
        Json(ErrorEnvelope {
            code,
            message: err.to_string(),
            correlation_id,
        }),
    )
}
