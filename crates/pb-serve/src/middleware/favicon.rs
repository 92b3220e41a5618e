use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

// Browsers probe this on every visit; it must never be captured.
pub async fn ignore_favicon(request: Request<Body>, next: Next) -> Response {
    if request.uri().path() == "/favicon.ico" {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}
