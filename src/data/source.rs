//! Retrieval of raw CSV text from a local directory or an HTTP mirror.

use std::{future::Future, path::PathBuf};

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};
use urlencoding::encode;

use crate::config::Settings;

/// Failure to obtain a CSV resource.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("requesting {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("building http client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Anything that can hand back the text of a named CSV resource.
pub trait CsvSource: Send + Sync {
    fn fetch(&self, resource: &str) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Resources resolved relative to a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CsvSource for DirSource {
    #[instrument(skip(self))]
    async fn fetch(&self, resource: &str) -> Result<String, SourceError> {
        let path = self.root.join(resource);
        debug!(path = %path.display(), "reading csv");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SourceError::Io { path, source })
    }
}

/// Resources resolved relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent("chain-compare/0.1")
            .gzip(true)
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Join a resource path onto the base URL, percent-encoding each segment.
    pub fn url_for(&self, resource: &str) -> String {
        let path = resource
            .split('/')
            .map(|segment| encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl CsvSource for HttpSource {
    #[instrument(skip(self))]
    async fn fetch(&self, resource: &str) -> Result<String, SourceError> {
        let url = self.url_for(resource);
        debug!(%url, "requesting csv");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status());
        let response = match response {
            Ok(response) => response,
            Err(source) => return Err(SourceError::Http { url, source }),
        };
        response
            .text()
            .await
            .map_err(|source| SourceError::Http { url, source })
    }
}

/// Source selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum AnySource {
    Dir(DirSource),
    Http(HttpSource),
}

impl AnySource {
    /// Prefer the HTTP mirror when `DATA_BASE_URL` is set, else the data dir.
    pub fn from_settings(settings: &Settings) -> Result<Self, SourceError> {
        match &settings.data_base_url {
            Some(base) => Ok(Self::Http(HttpSource::new(base.clone())?)),
            None => Ok(Self::Dir(DirSource::new(settings.data_dir.clone()))),
        }
    }
}

impl CsvSource for AnySource {
    async fn fetch(&self, resource: &str) -> Result<String, SourceError> {
        match self {
            Self::Dir(source) => source.fetch(resource).await,
            Self::Http(source) => source.fetch(resource).await,
        }
    }
}
