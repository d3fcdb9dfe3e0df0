use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;
use vark_quiz::assessment::{
    BuiltinQuestionSource, CsvQuestionSource, GeminiClient, NewResult, Question, QuestionSource,
    QuestionSourceError, QuizService, RepositoryError, RestStore, ResultId, ResultRepository,
    StoredResult,
};
use vark_quiz::config::AppConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local result store used when no remote store is configured.
#[derive(Clone)]
pub(crate) struct InMemoryResultRepository {
    next_id: Arc<AtomicU64>,
    rows: Arc<Mutex<HashMap<ResultId, StoredResult>>>,
}

impl Default for InMemoryResultRepository {
    fn default() -> Self {
        Self {
            next_id: Arc::new(AtomicU64::new(1)),
            rows: Arc::default(),
        }
    }
}

impl ResultRepository for InMemoryResultRepository {
    async fn insert(&self, record: NewResult) -> Result<ResultId, RepositoryError> {
        let id = ResultId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut guard = self
            .rows
            .lock()
            .map_err(|_| RepositoryError::Unavailable("result store lock poisoned".into()))?;
        guard.insert(id, StoredResult::from_new(id, record, Utc::now()));
        Ok(id)
    }

    async fn fetch(&self, id: ResultId) -> Result<Option<StoredResult>, RepositoryError> {
        let guard = self
            .rows
            .lock()
            .map_err(|_| RepositoryError::Unavailable("result store lock poisoned".into()))?;
        Ok(guard.get(&id).cloned())
    }
}

pub(crate) enum QuestionBackend {
    Csv(CsvQuestionSource),
    Remote(RestStore),
    Builtin(BuiltinQuestionSource),
}

impl QuestionSource for QuestionBackend {
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
        match self {
            QuestionBackend::Csv(source) => source.fetch().await,
            QuestionBackend::Remote(store) => QuestionSource::fetch(store).await,
            QuestionBackend::Builtin(source) => source.fetch().await,
        }
    }
}

pub(crate) enum ResultBackend {
    Remote(RestStore),
    Memory(InMemoryResultRepository),
}

impl ResultRepository for ResultBackend {
    async fn insert(&self, record: NewResult) -> Result<ResultId, RepositoryError> {
        match self {
            ResultBackend::Remote(store) => store.insert(record).await,
            ResultBackend::Memory(memory) => memory.insert(record).await,
        }
    }

    async fn fetch(&self, id: ResultId) -> Result<Option<StoredResult>, RepositoryError> {
        match self {
            ResultBackend::Remote(store) => ResultRepository::fetch(store, id).await,
            ResultBackend::Memory(memory) => memory.fetch(id).await,
        }
    }
}

pub(crate) type AppQuizService = QuizService<QuestionBackend, ResultBackend, GeminiClient>;

/// Wires adapters from configuration. A CSV path wins over the remote store for questions.
pub(crate) fn build_quiz_service(
    config: &AppConfig,
    questions_csv: Option<PathBuf>,
) -> AppQuizService {
    let store = RestStore::from_config(&config.store);

    let questions = match (questions_csv.or_else(|| config.questions_csv.clone()), &store) {
        (Some(path), _) => {
            info!(path = %path.display(), "loading questions from csv");
            QuestionBackend::Csv(CsvQuestionSource::new(path))
        }
        (None, Some(store)) => QuestionBackend::Remote(store.clone()),
        (None, None) => QuestionBackend::Builtin(BuiltinQuestionSource),
    };

    let results = match store {
        Some(store) => {
            info!(base_url = store.base_url(), "using remote result store");
            ResultBackend::Remote(store)
        }
        None => {
            info!("no STORE_URL configured; results kept in memory");
            ResultBackend::Memory(InMemoryResultRepository::default())
        }
    };

    let recommender = GeminiClient::new(config.recommendation.clone());

    QuizService::new(Arc::new(questions), Arc::new(results), Arc::new(recommender))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_result(name: &str) -> NewResult {
        NewResult {
            user_name: name.to_string(),
            score_visual: 1,
            score_auditory: 0,
            score_readwrite: 2,
            score_kinesthetic: 1,
            dominant_style: "R".to_string(),
        }
    }

    #[tokio::test]
    async fn memory_repository_assigns_sequential_ids() {
        let repository = InMemoryResultRepository::default();

        let first = repository.insert(new_result("Ayu")).await.expect("insert");
        let second = repository.insert(new_result("Bima")).await.expect("insert");

        assert_eq!(first, ResultId(1));
        assert_eq!(second, ResultId(2));
        let stored = repository.fetch(second).await.expect("fetch").expect("present");
        assert_eq!(stored.user_name, "Bima");
        assert!(stored.created_at.is_some());
        assert!(repository.fetch(ResultId(9)).await.expect("fetch").is_none());
    }

    #[tokio::test]
    async fn builtin_backend_serves_bank() {
        let questions = QuestionBackend::Builtin(BuiltinQuestionSource)
            .fetch()
            .await
            .expect("builtin");
        assert_eq!(questions.len(), 16);
    }
}
