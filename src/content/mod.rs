//! Content module - manifest resolution, post models, and markdown rendering

mod markdown;
mod post;
pub mod resolver;
pub mod source;

pub use markdown::{MarkdownRenderer, RenderedPost, TocItem};
pub use post::{title_from_slug, CategoryInfo, Manifest, ManifestCategory, ManifestPost, Post, UNDATED};
pub use resolver::ContentResolver;
pub use source::{DirSource, Fetched, Fetcher, HttpSource, SourceError};
