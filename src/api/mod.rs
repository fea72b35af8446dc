//! HTTP 接口层
//!
//! 只负责请求提取与响应映射，业务流程全部交给 `workflow::StudyFlow`。

pub mod study;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::AppError;
use crate::workflow::StudyFlow;

/// 路由共享状态
pub type AppState = Arc<StudyFlow>;

/// 构建路由
pub fn router(flow: Arc<StudyFlow>) -> Router {
    with_layers(
        Router::new()
            .route("/api/study", get(study::study))
            .route("/health", get(study::health))
            .with_state(flow),
    )
}

/// 公共中间件：panic 转 500，请求追踪
fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// 未捕获的 panic 映射为 `{error, message}` 500 响应
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("❌ 请求处理过程中发生 panic: {}", message);
    AppError::Internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::clients::ContentResolver;
    use crate::error::ResolveError;
    use crate::models::ContentPayload;
    use crate::services::ResponseGenerator;

    /// 只认识 "Photosynthesis" 的百科
    struct OneTopicResolver;

    #[async_trait]
    impl ContentResolver for OneTopicResolver {
        async fn resolve(&self, topic: &str) -> Result<ContentPayload, ResolveError> {
            if topic == "Photosynthesis" {
                Ok(ContentPayload {
                    text: "Photosynthesis is a process used by plants to convert light energy into chemical energy. Chlorophyll absorbs mostly blue and red light.".to_string(),
                    title: Some(topic.to_string()),
                    source_reference: Some("https://en.wikipedia.org/wiki/Photosynthesis".to_string()),
                })
            } else {
                Err(ResolveError::NotFound {
                    topic: topic.to_string(),
                })
            }
        }
    }

    fn app() -> Router {
        let flow = StudyFlow::new(Arc::new(OneTopicResolver), ResponseGenerator::new(Vec::new()));
        router(Arc::new(flow))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        async fn explode() -> &'static str {
            panic!("resolver state corrupted")
        }

        let app = with_layers(Router::new().route("/explode", get(explode)));
        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "resolver state corrupted");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_study_topic() {
        let (status, body) = get_json("/api/study?topic=Photosynthesis").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topic"], "Photosynthesis");
        assert_eq!(body["mode"], "normal");
        assert_eq!(body["source"], "https://en.wikipedia.org/wiki/Photosynthesis");
        assert_eq!(body["summary"].as_array().unwrap().len(), 3);
        assert!(body["studyTip"].is_string());
        assert!(body["solution"].is_null());

        let quiz = body["quiz"].as_array().unwrap();
        assert_eq!(quiz.len(), 3);
        for item in quiz {
            assert_eq!(item["options"].as_array().unwrap().len(), 4);
            assert!(item["correctAnswer"].as_u64().unwrap() <= 3);
        }
    }

    #[tokio::test]
    async fn test_study_math_question() {
        let (status, body) = get_json("/api/study?topic=3x%20%2B%205%20%3D%2020&mode=math").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "math");
        assert_eq!(body["source"], "AI-generated response");
        assert_eq!(body["summary"][1], "Solution: x = 5.0");
        assert!(body["solution"]["steps"].as_array().unwrap().len() > 3);
    }

    #[tokio::test]
    async fn test_study_not_found() {
        let (status, body) = get_json("/api/study?topic=NonExistentTopic12345XYZ").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Topic not found");
        assert!(body["message"].as_str().unwrap().contains("NonExistentTopic12345XYZ"));
    }

    #[tokio::test]
    async fn test_study_invalid_input() {
        let (status, body) = get_json("/api/study").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid input");

        let (status, _) = get_json("/api/study?topic=%20%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get_json("/api/study?topic=Photosynthesis&mode=invalid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("math"));
    }
}
