use crate::routes::error::map_error;
use crate::routes::postbacks::capture;
use crate::AppState;
use axum::extract::Query;
use axum::http::header::LOCATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use pb_core::PostbackError;
use utoipa::IntoParams;

const DEFAULT_REDIRECT: &str = "https://go.to-me.local/?userId=b0fa6dd5c8c778795a16bd2aa44df4807d9022e25ae62de342044ec01e2422ad&campaignId=72a4998aaf1e9829b1dd473cd40f964f95c1d2c97e82ea366b73bc245e7d5e73";

#[derive(Debug, serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TestUrlQuery {
    /// Extra header to carry the target, `Location` by default.
    header: Option<String>,
    /// Redirect target.
    value: Option<String>,
}

// Other methods on these paths are ordinary captures.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(capture))
        .route("/test-url", get(test_url).fallback(capture))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up"))
)]
pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Answers with a permanent redirect, for exercising clients that follow
/// tracking links.
#[utoipa::path(
    get,
    path = "/test-url",
    params(TestUrlQuery),
    responses(
        (status = 301, description = "Redirect to `value`"),
        (status = 400, description = "`value` is not a valid header value")
    )
)]
pub(crate) async fn test_url(Query(query): Query<TestUrlQuery>) -> Response {
    let value = query.value.unwrap_or_else(|| DEFAULT_REDIRECT.to_string());
    let header = query.header.unwrap_or_else(|| LOCATION.to_string());

    let target = match HeaderValue::from_str(&value) {
        Ok(target) => target,
        Err(err) => {
            let err = PostbackError::InvalidInput {
                message: format!("invalid redirect target: {err}"),
            };
            return map_error(&err, None).into_response();
        }
    };

    let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
    let headers = response.headers_mut();
    headers.insert(LOCATION, target.clone());
    if let Ok(name) = HeaderName::from_bytes(header.as_bytes()) {
        headers.insert(name, target);
    }
    response
}
