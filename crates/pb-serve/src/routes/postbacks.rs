use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, delete, get};
use axum::{Extension, Json, Router};
use pb_core::postbacks::resolve_limit;
use pb_core::types::{first_values, CaptureRequest, Postback};
use utoipa::IntoParams;

#[derive(Debug, serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Maximum number of postbacks; missing, non-numeric or non-positive values mean 10.
    limit: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/get", get(list_postbacks).fallback(capture))
        .route("/delete/{postback_id}", delete(delete_postback))
        .route("/", any(capture))
        .route("/{path}", any(capture))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/{path}",
    params(("path" = String, Path, description = "Any single path segment; every method is captured")),
    request_body(content = String, description = "Stored verbatim for POST and PUT"),
    responses(
        (status = 200, description = "Captured", body = String),
        (status = 500, description = "Postback could not be stored")
    )
)]
pub(crate) async fn capture(
    State(state): State<AppState>,
    correlation: Option<Extension<CorrelationId>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let pairs = Query::<Vec<(String, String)>>::try_from_uri(&uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();
    let body = if method == Method::POST || method == Method::PUT {
        String::from_utf8_lossy(&body).into_owned()
    } else {
        String::new()
    };
    let request = CaptureRequest {
        method: method.to_string(),
        url: uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), ToString::to_string),
        args: first_values(pairs),
        body,
    };
    match state.postbacks.capture(request) {
        Ok(_) => "OK".into_response(),
        Err(err) => {
            map_error(&err, correlation.map(|Extension(id)| id.0)).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/get",
    params(ListQuery),
    responses((status = 200, body = Vec<Postback>))
)]
pub(crate) async fn list_postbacks(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Query(query): Query<ListQuery>,
) -> Response {
    let limit = resolve_limit(query.limit.as_deref());
    match state.postbacks.recent(limit) {
        Ok(postbacks) => Json(postbacks).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/delete/{postback_id}",
    params(("postback_id" = String, Path, description = "Postback ID")),
    responses((status = 200, description = "Deleted, or never existed", body = String))
)]
pub(crate) async fn delete_postback(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(postback_id): Path<String>,
) -> Response {
    match state.postbacks.delete(&postback_id) {
        Ok(()) => "DELETED".into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}
