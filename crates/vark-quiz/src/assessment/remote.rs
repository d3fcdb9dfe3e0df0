//! PostgREST-style adapters for the hosted question and result tables.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tracing::{info, warn};

use super::domain::{Question, ResultId};
use super::questions::{QuestionSource, QuestionSourceError};
use super::repository::{NewResult, RepositoryError, ResultRepository, StoredResult};
use crate::config::StoreConfig;

#[derive(Debug, Deserialize)]
struct InsertedRow {
    id: ResultId,
}

/// Client for a REST table store exposing `questions` and `results`.
#[derive(Clone)]
pub struct RestStore {
    base_url: String,
    client: reqwest::Client,
}

impl RestStore {
    /// Returns `None` when no store URL is configured.
    pub fn from_config(config: &StoreConfig) -> Option<Self> {
        let base_url = config.url.as_deref()?.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        if let Some(key) = config.api_key.as_deref() {
            if let Ok(value) = HeaderValue::from_str(key) {
                headers.insert("apikey", value);
            }
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {key}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Some(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl QuestionSource for RestStore {
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
        let response = self
            .client
            .get(self.table_url("questions"))
            .query(&[("select", "*"), ("order", "id.asc")])
            .send()
            .await
            .map_err(|err| QuestionSourceError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuestionSourceError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        response
            .json::<Vec<Question>>()
            .await
            .map_err(|err| QuestionSourceError::Malformed(err.to_string()))
    }
}

impl ResultRepository for RestStore {
    async fn insert(&self, record: NewResult) -> Result<ResultId, RepositoryError> {
        let response = self
            .client
            .post(self.table_url("results"))
            .query(&[("select", "id")])
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "result insert rejected by store");
            return Err(RepositoryError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let rows: Vec<InsertedRow> = response
            .json()
            .await
            .map_err(|err| RepositoryError::InvalidResponse(err.to_string()))?;
        let id = rows
            .first()
            .map(|row| row.id)
            .ok_or_else(|| RepositoryError::InvalidResponse("insert returned no rows".into()))?;

        info!(%id, "result stored");
        Ok(id)
    }

    async fn fetch(&self, id: ResultId) -> Result<Option<StoredResult>, RepositoryError> {
        let filter = format!("eq.{id}");
        let response = self
            .client
            .get(self.table_url("results"))
            .query(&[("select", "*"), ("id", filter.as_str())])
            .send()
            .await
            .map_err(|err| RepositoryError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let rows: Vec<StoredResult> = response
            .json()
            .await
            .map_err(|err| RepositoryError::InvalidResponse(err.to_string()))?;
        Ok(rows.into_iter().next())
    }
}
