pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/job-match", post(handlers::handle_job_match))
        .route(
            "/api/v1/skills/extract",
            post(handlers::handle_extract_skills),
        )
        .route("/api/v1/rubric", get(handlers::handle_rubric_summary))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::SkillOverlapMatcher;
    use crate::config::Config;
    use crate::rubric::Rubric;

    fn app() -> Router {
        let rubric = Arc::new(Rubric::builtin().unwrap());
        let state = AppState {
            job_matcher: Arc::new(SkillOverlapMatcher::new(rubric.clone())),
            rubric,
            config: Config {
                max_document_chars: 2_000,
                ..Config::default()
            },
        };
        build_router(state)
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-analyzer");
    }

    #[tokio::test]
    async fn test_analyze_with_job_description() {
        let (status, body) = send(
            "POST",
            "/api/v1/analyze",
            Some(json!({
                "text": "SUMMARY\nBackend engineer.\nEXPERIENCE\n2019 - Present\n- Built Rust services\nSKILLS\nRust, Docker",
                "job_description": "Looking for Rust and Kubernetes experience",
                "as_of": "2024-01-01"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["analysis"]["overall_score"].as_u64().unwrap() <= 100);
        assert!(body["analysis"]["ats_compatibility"].is_u64());
        assert_eq!(body["job_match"]["match_score"], 50);
        assert_eq!(body["job_match"]["missing_skills"], json!(["Kubernetes"]));
    }

    #[tokio::test]
    async fn test_analyze_without_job_description_omits_match() {
        let (status, body) = send(
            "POST",
            "/api/v1/analyze",
            Some(json!({ "text": "SKILLS\nRust" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.get("job_match").is_none());
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_text() {
        let (status, body) = send("POST", "/api/v1/analyze", Some(json!({ "text": "   " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_text() {
        let text = "word ".repeat(1_000);
        let (status, _) = send("POST", "/api/v1/analyze", Some(json!({ "text": text }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_symbol_only_text_is_malformed() {
        let (status, body) =
            send("POST", "/api/v1/analyze", Some(json!({ "text": "--- ••• ---" }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "MALFORMED_DOCUMENT");
    }

    #[tokio::test]
    async fn test_job_match_endpoint() {
        let (status, body) = send(
            "POST",
            "/api/v1/job-match",
            Some(json!({
                "resume_skills": ["k8s", "Python"],
                "job_description": "Python, Kubernetes, AWS"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched_requirement_count"], 2);
        assert_eq!(body["total_requirement_count"], 3);
        assert_eq!(body["match_score"], 67);
    }

    #[tokio::test]
    async fn test_extract_skills_endpoint() {
        let (status, body) = send(
            "POST",
            "/api/v1/skills/extract",
            Some(json!({ "text": "I know JS and ECMAScript" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["JavaScript"]));
    }

    #[tokio::test]
    async fn test_rubric_summary() {
        let (status, body) = send("GET", "/api/v1/rubric", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["skill_count"].as_u64().unwrap() > 0);
        assert_eq!(body["industries"][0], "Software Development");
        assert_eq!(body["warnings"], json!([]));
    }
}
