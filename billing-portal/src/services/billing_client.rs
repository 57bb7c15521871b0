//! One-shot retrieval of the billing document.
//!
//! A [`BillingSource`] only moves bytes; [`BillingLoader`] turns them into a
//! checked [`BillingDocument`], logs failures for operators and counts every
//! outcome. Nothing here retries.

use crate::config::{SourceKind, SourceSettings};
use crate::models::{BillingDocument, DocumentError};
use crate::services::metrics::record_fetch;
use async_trait::async_trait;
use reqwest::Client;
use service_core::observability::TracedClientExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("billing source responded with status {0}")]
    Status(u16),

    #[error("billing source request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read billing file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("billing fetch did not settle within {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl LoadError {
    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            LoadError::Status(_) => "status",
            LoadError::Transport(_) | LoadError::Io { .. } => "transport",
            LoadError::TimedOut(_) => "timeout",
            LoadError::Document(DocumentError::Malformed(_)) => "malformed",
            LoadError::Document(DocumentError::Incomplete(_)) => "incomplete",
            LoadError::Document(DocumentError::Invalid(_)) => "invalid",
        }
    }
}

/// A place a billing document can be read from.
#[async_trait]
pub trait BillingSource: Send + Sync {
    /// Raw payload. Any non-success response must come back as an error.
    async fn fetch(&self) -> Result<Vec<u8>, LoadError>;

    /// Location shown in logs.
    fn location(&self) -> &str;
}

/// GETs the document from a URL.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl BillingSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .traced_get(&self.url)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(LoadError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(LoadError::Transport)?;
        Ok(body.to_vec())
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// Reads the document from disk.
pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl BillingSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn location(&self) -> &str {
        &self.display
    }
}

/// Fetches, parses and checks one billing document per call.
#[derive(Clone)]
pub struct BillingLoader {
    source: Arc<dyn BillingSource>,
    timeout: Option<Duration>,
}

impl BillingLoader {
    pub fn new(source: Arc<dyn BillingSource>, timeout: Option<Duration>) -> Self {
        Self { source, timeout }
    }

    pub fn from_settings(settings: &SourceSettings) -> Self {
        let source: Arc<dyn BillingSource> = match settings.kind {
            SourceKind::Http => Arc::new(HttpSource::new(settings.location.clone())),
            SourceKind::File => Arc::new(FileSource::new(settings.location.clone())),
        };
        Self::new(source, settings.timeout())
    }

    pub fn location(&self) -> &str {
        self.source.location()
    }

    /// Run the fetch once. Failures are logged here with full detail; callers
    /// only need the outcome.
    #[tracing::instrument(name = "billing_fetch", skip(self), fields(source = %self.source.location()))]
    pub async fn load(&self) -> Result<BillingDocument, LoadError> {
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetch_document())
                .await
                .unwrap_or_else(|_| Err(LoadError::TimedOut(limit))),
            None => self.fetch_document().await,
        };

        match &result {
            Ok(document) => {
                tracing::info!(
                    history_entries = document.payment_history.len(),
                    "Billing document loaded"
                );
                record_fetch("loaded");
            }
            Err(e) => {
                tracing::error!(error = %e, outcome = e.outcome(), "Error loading billing data");
                record_fetch(e.outcome());
            }
        }

        result
    }

    async fn fetch_document(&self) -> Result<BillingDocument, LoadError> {
        let bytes = self.source.fetch().await?;
        Ok(BillingDocument::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(&'static [u8]);

    #[async_trait]
    impl BillingSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
            Ok(self.0.to_vec())
        }

        fn location(&self) -> &str {
            "static"
        }
    }

    struct PendingSource;

    #[async_trait]
    impl BillingSource for PendingSource {
        async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
            std::future::pending().await
        }

        fn location(&self) -> &str {
            "pending"
        }
    }

    #[tokio::test]
    async fn malformed_payload_is_reported() {
        let loader = BillingLoader::new(Arc::new(StaticSource(b"{ not json")), None);
        let err = loader.load().await.unwrap_err();
        assert_eq!(err.outcome(), "malformed");
    }

    #[tokio::test]
    async fn incomplete_payload_is_reported() {
        let loader = BillingLoader::new(Arc::new(StaticSource(b"{\"billingDetails\": {}}")), None);
        let err = loader.load().await.unwrap_err();
        assert_eq!(err.outcome(), "incomplete");
    }

    #[tokio::test]
    async fn timeout_bounds_a_hung_source() {
        let loader = BillingLoader::new(Arc::new(PendingSource), Some(Duration::from_millis(20)));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::TimedOut(_)));
        assert_eq!(err.outcome(), "timeout");
    }

    #[tokio::test]
    async fn missing_file_is_a_transport_failure() {
        let loader = BillingLoader::new(
            Arc::new(FileSource::new("/nonexistent/billingData.json")),
            None,
        );
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert_eq!(err.outcome(), "transport");
    }
}
