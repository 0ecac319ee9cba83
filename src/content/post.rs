//! Manifest and post models

use serde::{Deserialize, Serialize};

use crate::helpers::{join_location, logical_path, markdown_resource};

/// Date shown for posts whose manifest entry carries none
pub const UNDATED: &str = "Archive Entry";

/// The blog index published next to the markdown files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub categories: Vec<ManifestCategory>,
}

impl Manifest {
    /// Find a category by exact name
    pub fn category(&self, name: &str) -> Option<&ManifestCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Find the manifest entry for a post
    pub fn entry(&self, category: &str, slug: &str) -> Option<&ManifestPost> {
        self.category(category)?
            .posts
            .iter()
            .find(|p| p.filename == slug)
    }

    /// Total number of entries across all categories
    pub fn post_count(&self) -> usize {
        self.categories.iter().map(|c| c.posts.len()).sum()
    }
}

/// A named group of posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestCategory {
    pub name: String,
    #[serde(default)]
    pub posts: Vec<ManifestPost>,
}

/// A manifest-level post entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestPost {
    /// File name without the `.md` extension, doubles as the slug
    pub filename: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A resolved blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug (the manifest filename)
    pub slug: String,

    /// Category name as it appears in the manifest
    pub category: String,

    /// Display title derived from the slug
    pub title: String,

    /// Manifest date, or [`UNDATED`]
    pub date: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Manifest summary
    pub summary: String,

    /// Raw markdown body, empty in listings
    pub content: String,

    /// Location of the markdown resource
    pub raw_url: String,

    /// Logical `category/slug.md` identifier
    pub path: String,
}

impl Post {
    /// Build a listing record for a manifest entry, located against `base`
    pub fn from_entry(base: &str, category: &str, entry: &ManifestPost) -> Self {
        Self::assemble(
            category,
            &entry.filename,
            entry.date.as_deref(),
            &entry.summary,
            join_location(base, &markdown_resource(category, &entry.filename)),
        )
    }

    /// Build a listing record for a post with optional manifest metadata
    pub(crate) fn assemble(
        category: &str,
        slug: &str,
        date: Option<&str>,
        summary: &str,
        raw_url: String,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            category: category.to_string(),
            title: title_from_slug(slug),
            date: date
                .filter(|d| !d.is_empty())
                .unwrap_or(UNDATED)
                .to_string(),
            tags: Vec::new(),
            summary: summary.to_string(),
            content: String::new(),
            raw_url,
            path: logical_path(category, slug),
        }
    }
}

/// Per-category post count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub name: String,
    pub count: usize,
}

/// Display title for a slug: every hyphen becomes a space
pub fn title_from_slug(slug: &str) -> String {
    slug.replace('-', " ")
}
