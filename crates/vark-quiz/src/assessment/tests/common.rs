use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::assessment::domain::{Question, QuestionOption, ResultId};
use crate::assessment::questions::{QuestionSource, QuestionSourceError};
use crate::assessment::recommendation::{
    classify_failure, RecommendationError, RecommendationProvider,
};
use crate::assessment::repository::{NewResult, RepositoryError, ResultRepository, StoredResult};
use crate::assessment::{quiz_router, QuizService};

pub(super) use crate::assessment::domain::LearningStyle::{
    Auditory as A, Kinesthetic as K, ReadWrite as R, Visual as V,
};

pub(super) fn question(id: u32) -> Question {
    Question {
        id,
        text: format!("Pertanyaan {id}"),
        options: vec![
            QuestionOption::new("Lihat diagram", V),
            QuestionOption::new("Dengarkan penjelasan", A),
            QuestionOption::new("Baca catatan", R),
            QuestionOption::new("Coba langsung", K),
        ],
        created_at: None,
    }
}

pub(super) struct StaticQuestions(pub(super) Vec<Question>);

impl QuestionSource for StaticQuestions {
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
        Ok(self.0.clone())
    }
}

pub(super) struct FailingQuestions;

impl QuestionSource for FailingQuestions {
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
        Err(QuestionSourceError::Unavailable("connection refused".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) rows: Arc<Mutex<HashMap<ResultId, StoredResult>>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, row: StoredResult) {
        self.rows
            .lock()
            .expect("repository mutex poisoned")
            .insert(row.id, row);
    }

    pub(super) fn len(&self) -> usize {
        self.rows.lock().expect("repository mutex poisoned").len()
    }
}

impl ResultRepository for MemoryRepository {
    async fn insert(&self, record: NewResult) -> Result<ResultId, RepositoryError> {
        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        let id = ResultId(guard.len() as u64 + 1);
        guard.insert(id, StoredResult::from_new(id, record, Utc::now()));
        Ok(id)
    }

    async fn fetch(&self, id: ResultId) -> Result<Option<StoredResult>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    async fn insert(&self, _record: NewResult) -> Result<ResultId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn fetch(&self, _id: ResultId) -> Result<Option<StoredResult>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Canned provider outcomes.
#[derive(Clone)]
pub(super) enum StubRecommender {
    Reply(String),
    Quota,
    Broken,
    Unconfigured,
}

impl RecommendationProvider for StubRecommender {
    async fn generate(&self, prompt: &str) -> Result<String, RecommendationError> {
        match self {
            StubRecommender::Reply(text) => Ok(format!("{text}: {}", prompt.lines().count())),
            StubRecommender::Quota => Err(classify_failure(
                Some(429),
                "RESOURCE_EXHAUSTED: quota exceeded",
            )),
            StubRecommender::Broken => Err(classify_failure(Some(500), "internal error")),
            StubRecommender::Unconfigured => {
                Err(RecommendationError::NotConfigured("GEMINI_API_KEY"))
            }
        }
    }
}

pub(super) type TestService = QuizService<StaticQuestions, MemoryRepository, StubRecommender>;

pub(super) fn build_service() -> (TestService, MemoryRepository) {
    build_service_with(StubRecommender::Reply("Rekomendasi".to_string()))
}

pub(super) fn build_service_with(recommender: StubRecommender) -> (TestService, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = QuizService::new(
        Arc::new(StaticQuestions((1..=4).map(question).collect())),
        Arc::new(repository.clone()),
        Arc::new(recommender),
    );
    (service, repository)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    quiz_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
