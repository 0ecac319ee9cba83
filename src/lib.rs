//! folio-rs: reader and local server for manifest-driven markdown blogs
//!
//! A blog is a `manifest.json` listing categories and post filenames, plus one
//! markdown file per post. This crate resolves that content from a list of
//! candidate locations, over HTTP or from disk, and renders it.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{ContentResolver, DirSource, Fetcher, HttpSource, MarkdownRenderer};

/// The main application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory; local sources are relative to it
    pub base_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Build the content resolver for the configured sources
    pub fn resolver(&self) -> Result<ContentResolver> {
        let fetcher: Arc<dyn Fetcher> = if self.config.is_remote() {
            Arc::new(HttpSource::new(
                self.config.origin.as_deref(),
                self.config.timeout(),
            )?)
        } else {
            Arc::new(DirSource::new(&self.base_dir))
        };

        Ok(ContentResolver::new(fetcher, self.config.sources.clone())
            .with_manifest_name(self.config.manifest.clone()))
    }

    /// Build a markdown renderer from the highlight settings
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::with_options(
            &self.config.highlight.theme,
            self.config.highlight.line_number,
        )
    }

    /// Scaffold a new site
    pub fn init(&self) -> Result<()> {
        commands::init::init_site(&self.base_dir)
    }
}
