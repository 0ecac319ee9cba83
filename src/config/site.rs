//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub about: String,
    pub portfolio: Option<String>,

    // Content
    /// Candidate base locations, tried in order
    pub sources: Vec<String>,
    /// HTTP origin that relative sources are joined onto
    pub origin: Option<String>,
    /// Manifest file name inside each source
    pub manifest: String,
    /// Per-request timeout in seconds, 0 disables it
    pub request_timeout: u64,

    // Views
    pub home_limit: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: "Engineering notes".to_string(),
            author: "John Doe".to_string(),
            about: String::new(),
            portfolio: None,

            sources: vec!["./myBlog".to_string()],
            origin: None,
            manifest: "manifest.json".to_string(),
            request_timeout: 10,

            home_limit: 4,
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Request timeout as a duration, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.request_timeout > 0).then(|| Duration::from_secs(self.request_timeout))
    }

    /// Whether content is fetched over HTTP rather than from disk
    pub fn is_remote(&self) -> bool {
        self.origin.is_some()
            || self
                .sources
                .iter()
                .any(|s| s.starts_with("http://") || s.starts_with("https://"))
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
