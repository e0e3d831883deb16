pub mod health;
pub mod tools;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cv::handlers;
use crate::mail::handlers::handle_send_email;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tools", get(tools::tools_handler))
        // CV API
        .route("/api/v1/cv", get(handlers::handle_get_document))
        .route("/api/v1/cv/ask", post(handlers::handle_ask))
        .route("/api/v1/cv/extract", post(handlers::handle_extract))
        // Mail API
        .route("/api/v1/email", post(handle_send_email))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::cv::service::CvService;
    use crate::cv::source::{CvSource, StaticSource, TextFileSource};
    use crate::cv::store::CvStore;

    const CV_TEXT: &str = "Jane Doe\nSkills\nRust, Go\nEducation\nBSc Computer Science";

    fn app(cache: &Path, source: Arc<dyn CvSource>) -> Router {
        build_router(AppState {
            cv: Arc::new(CvService::new(CvStore::new(cache), source)),
            mailer: None,
        })
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir.path().join("cv.json"), Arc::new(StaticSource(String::new())));

        let (status, body) = send(app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_ask_returns_answer() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir.path().join("cv.json"), Arc::new(StaticSource(CV_TEXT.to_string())));

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/cv/ask",
            Some(json!({ "question": "What skills do I have?" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["answer"].as_str().unwrap().contains("Rust, Go"));
    }

    #[tokio::test]
    async fn test_ask_rejects_empty_question() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir.path().join("cv.json"), Arc::new(StaticSource(CV_TEXT.to_string())));

        let (status, body) =
            send(app, "POST", "/api/v1/cv/ask", Some(json!({ "question": "" }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Question is required");
    }

    #[tokio::test]
    async fn test_ask_without_source_returns_not_loaded_answer() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(TextFileSource::new(dir.path().join("missing.txt")));
        let app = app(&dir.path().join("cv.json"), source);

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/cv/ask",
            Some(json!({ "question": "What skills do I have?" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], crate::cv::answerer::NOT_LOADED);
    }

    #[tokio::test]
    async fn test_extract_then_get_document() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir.path().join("cv.json"), Arc::new(StaticSource(CV_TEXT.to_string())));

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/v1/cv/extract",
            Some(json!({ "force": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "extracted");
        assert_eq!(body["ready"], true);
        assert_eq!(body["sections"][1]["section"], "skills");
        assert_eq!(body["sections"][1]["lines"], 3);

        let (status, body) = send(
            app.clone(),
            "POST",
            "/api/v1/cv/extract",
            Some(json!({ "force": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "cache_hit");

        let (status, body) = send(app, "GET", "/api/v1/cv", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rawText"], CV_TEXT);
        assert_eq!(body["education"][1], "BSc Computer Science");
    }

    #[tokio::test]
    async fn test_forced_extract_with_missing_source_is_503() {
        let dir = tempfile::tempdir().unwrap();
        let source = Arc::new(TextFileSource::new(dir.path().join("missing.txt")));
        let app = app(&dir.path().join("cv.json"), source);

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/cv/extract",
            Some(json!({ "force": true })),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_tools_catalog_lists_both_tools() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir.path().join("cv.json"), Arc::new(StaticSource(String::new())));

        let (status, body) = send(app, "GET", "/api/v1/tools", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ask_about_cv", "send_email"]);
    }

    #[tokio::test]
    async fn test_email_validation_failure_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir.path().join("cv.json"), Arc::new(StaticSource(String::new())));

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/email",
            Some(json!({ "recipient": "invalid-email", "subject": "Hi", "body": "Hello" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid email format");
    }
}
