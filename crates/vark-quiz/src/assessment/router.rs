use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{LearningStyle, ResultId, SavedResult};
use super::inference::compute_learning_style;
use super::questions::QuestionSource;
use super::recommendation::{RecommendationError, RecommendationProvider, RecommendationRequest};
use super::repository::{RepositoryError, ResultRepository};
use super::service::{QuizService, QuizServiceError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub user_name: String,
    pub answers: Vec<LearningStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    pub answers: Vec<LearningStyle>,
}

/// Submission response; `share_path` is present only when the result was stored.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    #[serde(flatten)]
    pub saved: SavedResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_path: Option<String>,
}

/// Router builder exposing the questionnaire endpoints. `/shared/:result_id` resolves the
/// path handed out with stored results.
pub fn quiz_router<Q, R, P>(service: Arc<QuizService<Q, R, P>>) -> Router
where
    Q: QuestionSource + 'static,
    R: ResultRepository + 'static,
    P: RecommendationProvider + 'static,
{
    Router::new()
        .route("/api/v1/questions", get(questions_handler::<Q, R, P>))
        .route("/api/v1/inference", post(inference_handler))
        .route("/api/v1/results", post(submit_handler::<Q, R, P>))
        .route("/api/v1/results/:result_id", get(shared_handler::<Q, R, P>))
        .route("/shared/:result_id", get(shared_handler::<Q, R, P>))
        .route(
            "/api/v1/recommendations",
            post(recommendation_handler::<Q, R, P>),
        )
        .with_state(service)
}

pub(crate) async fn questions_handler<Q, R, P>(
    State(service): State<Arc<QuizService<Q, R, P>>>,
) -> Response
where
    Q: QuestionSource + 'static,
    R: ResultRepository + 'static,
    P: RecommendationProvider + 'static,
{
    let bank = service.load_questions().await;
    (StatusCode::OK, Json(bank)).into_response()
}

pub(crate) async fn inference_handler(Json(request): Json<InferenceRequest>) -> Response {
    let result = compute_learning_style(&request.answers);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn submit_handler<Q, R, P>(
    State(service): State<Arc<QuizService<Q, R, P>>>,
    Json(request): Json<SubmissionRequest>,
) -> Response
where
    Q: QuestionSource + 'static,
    R: ResultRepository + 'static,
    P: RecommendationProvider + 'static,
{
    match service.complete(&request.user_name, &request.answers).await {
        Ok(saved) => {
            let share_path = saved.share_path();
            let view = SubmissionView { saved, share_path };
            (StatusCode::CREATED, Json(view)).into_response()
        }
        Err(QuizServiceError::Session(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn shared_handler<Q, R, P>(
    State(service): State<Arc<QuizService<Q, R, P>>>,
    Path(result_id): Path<String>,
) -> Response
where
    Q: QuestionSource + 'static,
    R: ResultRepository + 'static,
    P: RecommendationProvider + 'static,
{
    let not_found = || {
        let payload = json!({ "error": "Hasil tidak ditemukan", "result_id": result_id });
        (StatusCode::NOT_FOUND, Json(payload)).into_response()
    };

    let Ok(id) = result_id.parse::<ResultId>() else {
        return not_found();
    };

    match service.shared_result(id).await {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(QuizServiceError::Repository(RepositoryError::NotFound)) => not_found(),
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn recommendation_handler<Q, R, P>(
    State(service): State<Arc<QuizService<Q, R, P>>>,
    Json(request): Json<RecommendationRequest>,
) -> Response
where
    Q: QuestionSource + 'static,
    R: ResultRepository + 'static,
    P: RecommendationProvider + 'static,
{
    match service.recommend(&request).await {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(QuizServiceError::Recommendation(error)) => {
            let status = match &error {
                RecommendationError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
                RecommendationError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({
                "error": error.user_message(),
                "quota_exceeded": error.is_quota_exceeded(),
            });
            (status, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
