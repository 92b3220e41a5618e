use pb_core::types::{Postback, PostbackId};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "postback", description = "Capture and inspect webhook postbacks"),
    paths(
        crate::routes::postbacks::capture,
        crate::routes::postbacks::list_postbacks,
        crate::routes::postbacks::delete_postback,
        crate::routes::probes::health,
        crate::routes::probes::test_url,
    ),
    components(schemas(Postback, PostbackId))
)]
pub struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let spec: serde_json::Value = serde_json::from_str(&generate_spec()).unwrap();
        let paths = spec["paths"].as_object().unwrap();
        for path in ["/{path}", "/get", "/delete/{postback_id}", "/health", "/test-url"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(spec["components"]["schemas"]["Postback"].is_object());
    }
}
