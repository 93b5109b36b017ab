//! Question repository: fetches, normalizes and caches question banks.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{info, warn};

use crate::error::QuizError;
use crate::models::QuestionBank;

use super::loader::parse_bank;

/// Default upper bound for a single fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a question bank comes from. Also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionSource {
    File(PathBuf),
    Url(String),
}

impl QuestionSource {
    /// Interpret `location` as a URL when it has an http(s) scheme, else a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::File(path) => write!(f, "{}", path.display()),
            QuestionSource::Url(url) => f.write_str(url),
        }
    }
}

/// Loads question banks and caches them for the life of the process.
///
/// Cached banks are shared behind `Arc`; a refresh swaps the whole entry.
pub struct QuestionRepository {
    client: reqwest::Client,
    timeout: Duration,
    cache: Mutex<HashMap<QuestionSource, Arc<QuestionBank>>>,
}

impl QuestionRepository {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cached bank for `source`, fetching it on first use.
    pub async fn load(&self, source: &QuestionSource) -> Result<Arc<QuestionBank>, QuizError> {
        if let Some(bank) = self.cached(source) {
            return Ok(bank);
        }
        self.refresh(source).await
    }

    /// Fetch `source` again and replace whatever was cached for it.
    ///
    /// On failure the previous cache entry is left untouched.
    pub async fn refresh(&self, source: &QuestionSource) -> Result<Arc<QuestionBank>, QuizError> {
        let raw = self.fetch(source).await.inspect_err(|e| {
            warn!(%source, error = %e, "failed to fetch question source");
        })?;
        let bank = Arc::new(parse_bank(&raw)?);
        info!(%source, questions = bank.len(), "loaded question bank");

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source.clone(), Arc::clone(&bank));
        Ok(bank)
    }

    /// Drop the cached bank for `source`, if any.
    pub fn evict(&self, source: &QuestionSource) -> Option<Arc<QuestionBank>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(source)
    }

    pub fn cached(&self, source: &QuestionSource) -> Option<Arc<QuestionBank>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
            .cloned()
    }

    async fn fetch(&self, source: &QuestionSource) -> Result<String, QuizError> {
        let fetch = async {
            match source {
                QuestionSource::File(path) => tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| QuizError::SourceUnavailable(format!("{}: {}", source, e))),
                QuestionSource::Url(url) => self.fetch_url(url).await,
            }
        };

        tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| {
                QuizError::SourceUnavailable(format!(
                    "{}: timed out after {:?}",
                    source, self.timeout
                ))
            })?
    }

    async fn fetch_url(&self, url: &str) -> Result<String, QuizError> {
        let unavailable =
            |e: reqwest::Error| QuizError::SourceUnavailable(format!("{}: {}", url, e));

        self.client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unavailable)?
            .text()
            .await
            .map_err(unavailable)
    }
}

impl Default for QuestionRepository {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            QuestionSource::parse("https://example.com/q.json"),
            QuestionSource::Url("https://example.com/q.json".to_string())
        );
        assert_eq!(
            QuestionSource::parse("data/questions.json"),
            QuestionSource::File(PathBuf::from("data/questions.json"))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let repo = QuestionRepository::default();
        let source = QuestionSource::File(PathBuf::from("/nonexistent/disa-quiz/questions.json"));

        let err = repo.load(&source).await.unwrap_err();
        assert!(matches!(err, QuizError::SourceUnavailable(_)));
        assert!(repo.cached(&source).is_none());
    }
}
