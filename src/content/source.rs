//! Content sources: where manifest and markdown bytes come from

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::helpers::decode_segment;

/// Errors raised when a location cannot be fetched at all
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Request timed out: {0}")]
    Timeout(String),
}

/// A response from a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub body: String,
}

impl Fetched {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: String::new(),
        }
    }

    /// Application-level success (2xx)
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Fetches a location and reports its status and body.
///
/// An `Err` means the transport failed. A reachable location with nothing
/// behind it is an `Ok` with a non-2xx status.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<Fetched, SourceError>;
}

/// Fetches over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    origin: Option<Url>,
}

impl HttpSource {
    /// Create a source; relative locations are joined onto `origin`.
    ///
    /// `timeout` bounds each request including its body. `None` waits forever.
    pub fn new(origin: Option<&str>, timeout: Option<Duration>) -> Result<Self, SourceError> {
        let origin = origin
            .map(|o| {
                // A trailing slash keeps the last path segment when joining
                let o = if o.ends_with('/') {
                    o.to_string()
                } else {
                    format!("{}/", o)
                };
                Url::parse(&o).map_err(|e| SourceError::InvalidLocation(format!("{}: {}", o, e)))
            })
            .transpose()?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, origin })
    }

    /// Resolve a location to an absolute URL
    pub fn resolve(&self, location: &str) -> Result<Url, SourceError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Url::parse(location)
                .map_err(|e| SourceError::InvalidLocation(format!("{}: {}", location, e)));
        }

        let origin = self.origin.as_ref().ok_or_else(|| {
            SourceError::InvalidLocation(format!("{} (relative location without origin)", location))
        })?;
        origin
            .join(location)
            .map_err(|e| SourceError::InvalidLocation(format!("{}: {}", location, e)))
    }
}

#[async_trait]
impl Fetcher for HttpSource {
    async fn fetch(&self, location: &str) -> Result<Fetched, SourceError> {
        let url = self.resolve(location)?;
        let transport_error = |e: reqwest::Error| {
            if e.is_timeout() {
                SourceError::Timeout(url.to_string())
            } else {
                SourceError::Http(e)
            }
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(Fetched { status, body })
    }
}

/// Serves locations out of a local directory
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Map a location to a file below the root.
    ///
    /// Segments are percent-decoded, so an encoded `/` becomes a nested
    /// directory. `..` and absolute components are refused.
    pub fn file_path(&self, location: &str) -> Result<PathBuf, SourceError> {
        let rel = location.trim_start_matches("./").trim_start_matches('/');
        let mut path = self.root.clone();

        for raw in rel.split('/').filter(|s| !s.is_empty()) {
            let segment = decode_segment(raw)
                .ok_or_else(|| SourceError::InvalidLocation(location.to_string()))?;

            for component in Path::new(&segment).components() {
                match component {
                    Component::Normal(part) => path.push(part),
                    Component::CurDir => {}
                    _ => return Err(SourceError::InvalidLocation(location.to_string())),
                }
            }
        }

        Ok(path)
    }
}

#[async_trait]
impl Fetcher for DirSource {
    async fn fetch(&self, location: &str) -> Result<Fetched, SourceError> {
        let path = self.file_path(location)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(Fetched::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Fetched::not_found()),
            Err(e) if path.is_dir() => {
                tracing::debug!("{:?} is a directory: {}", path, e);
                Ok(Fetched::not_found())
            }
            Err(e) => Err(e.into()),
        }
    }
}
