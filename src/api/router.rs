use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::v1;

/// Full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::retrieval::MockRetrievalBackend;
    use crate::domain::{CollectionInfo, DomainError, LlmRequest, Passage, RagConfig};
    use crate::infrastructure::llm::Oracle;
    use crate::infrastructure::rag::prompts::GRADER_SYSTEM;
    use crate::infrastructure::rag::RagLoop;

    fn state_with(
        backend: MockRetrievalBackend,
        provider: MockLlmProvider,
        config: RagConfig,
    ) -> AppState {
        let backend: Arc<dyn crate::domain::RetrievalBackend> = Arc::new(backend);
        let oracle = Oracle::new(Arc::new(provider), "qwen-plus");
        let rag = RagLoop::new(backend.clone(), oracle, config).unwrap();

        AppState::new(Arc::new(rag), backend)
    }

    fn grading_provider(answer: Result<&'static str, &'static str>) -> MockLlmProvider {
        MockLlmProvider::new("mock").with_responder(move |req: &LlmRequest| {
            if req.system_text() == Some(GRADER_SYSTEM) {
                return Ok("0.9".to_string());
            }
            answer
                .map(str::to_string)
                .map_err(|e| DomainError::provider("mock", e))
        })
    }

    fn one_passage_backend() -> MockRetrievalBackend {
        let mut backend = MockRetrievalBackend::new();
        backend
            .expect_retrieve()
            .returning(|_| Ok(vec![Passage::new("Returns within 30 days", "policy.md", 0.9)]));
        backend.expect_backend_name().return_const("mock");
        backend
    }

    fn post_ask(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/ask")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let state = state_with(MockRetrievalBackend::new(), MockLlmProvider::new("mock"), RagConfig::default());
        let response = create_router(state)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_ask_returns_outcome() {
        let state = state_with(
            one_passage_backend(),
            grading_provider(Ok("Items can be returned within 30 days.")),
            RagConfig::default().with_default_collections(["kb-1"]),
        );

        let response = create_router(state)
            .oneshot(post_ask(serde_json::json!({"question": "What is the return policy?"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["answer"], "Items can be returned within 30 days.");
        assert_eq!(json["rewrite_count"], 0);
        assert_eq!(json["documents"][0]["source_name"], "policy.md");
        assert_eq!(
            json["trace"],
            serde_json::json!(["retrieve", "grade", "generate", "done"])
        );
    }

    #[tokio::test]
    async fn test_ask_blank_question_is_bad_request() {
        let state = state_with(MockRetrievalBackend::new(), MockLlmProvider::new("mock"), RagConfig::default());

        let response = create_router(state)
            .oneshot(post_ask(serde_json::json!({"question": "  "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }

    #[tokio::test]
    async fn test_ask_malformed_body() {
        let state = state_with(MockRetrievalBackend::new(), MockLlmProvider::new("mock"), RagConfig::default());

        let response = create_router(state)
            .oneshot(post_ask(serde_json::json!({"query": "wrong field"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_ask_generation_failure_is_bad_gateway() {
        let state = state_with(
            one_passage_backend(),
            grading_provider(Err("quota exceeded")),
            RagConfig::default().with_default_collections(["kb-1"]),
        );

        let response = create_router(state)
            .oneshot(post_ask(serde_json::json!({"question": "q"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[derive(Debug)]
    struct StalledBackend;

    #[async_trait::async_trait]
    impl crate::domain::RetrievalBackend for StalledBackend {
        async fn retrieve(
            &self,
            _request: crate::domain::RetrievalRequest,
        ) -> Result<Vec<Passage>, DomainError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn list_collections(&self) -> Result<Vec<CollectionInfo>, DomainError> {
            Ok(Vec::new())
        }

        fn backend_name(&self) -> &'static str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_ask_timeout_is_gateway_timeout() {
        let backend: Arc<dyn crate::domain::RetrievalBackend> = Arc::new(StalledBackend);
        let rag = RagLoop::new(
            backend.clone(),
            Oracle::new(Arc::new(MockLlmProvider::new("mock").with_reply("1")), "m"),
            RagConfig::default()
                .with_default_collections(["kb-1"])
                .with_session_timeout(Duration::from_secs(1)),
        )
        .unwrap();
        let state = AppState::new(Arc::new(rag), backend);

        let response = create_router(state)
            .oneshot(post_ask(serde_json::json!({"question": "q"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_collections_listing() {
        let mut backend = MockRetrievalBackend::new();
        backend
            .expect_list_collections()
            .times(1)
            .returning(|| Ok(vec![CollectionInfo::new("kb-1", "Policies")]));
        let state = state_with(backend, MockLlmProvider::new("mock"), RagConfig::default());

        let response = create_router(state)
            .oneshot(Request::builder().uri("/v1/collections").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["object"], "list");
        assert_eq!(json["data"][0]["id"], "kb-1");
        assert_eq!(json["data"][0]["name"], "Policies");
    }

    #[tokio::test]
    async fn test_collections_backend_failure_is_empty() {
        let mut backend = MockRetrievalBackend::new();
        backend
            .expect_list_collections()
            .returning(|| Err(DomainError::provider("ragflow", "HTTP 401")));
        backend.expect_backend_name().return_const("mock");
        let state = state_with(backend, MockLlmProvider::new("mock"), RagConfig::default());

        let response = create_router(state)
            .oneshot(Request::builder().uri("/v1/collections").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], serde_json::json!([]));
    }
}
