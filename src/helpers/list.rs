//! List helpers for the home page and the archive

use serde::Deserialize;

use crate::content::{CategoryInfo, Post};

/// Archive filter, read from the `q` and `category` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl ArchiveQuery {
    /// Trimmed free-text query, if any
    pub fn text(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Category filter, if any
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Whether the post passes both filters
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = self.category() {
            if post.category != category {
                return false;
            }
        }

        match self.text() {
            Some(text) => {
                let needle = text.to_lowercase();
                [&post.title, &post.summary, &post.category, &post.slug]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Filter posts for the archive, keeping manifest order
pub fn filter_posts<'a>(posts: &'a [Post], query: &ArchiveQuery) -> Vec<&'a Post> {
    posts.iter().filter(|p| query.matches(p)).collect()
}

/// The first `limit` posts, as shown on the home page
pub fn recent(posts: &[Post], limit: usize) -> &[Post] {
    &posts[..posts.len().min(limit)]
}

/// Unique categories in first-appearance order, with post counts
pub fn categories(posts: &[Post]) -> Vec<CategoryInfo> {
    let mut result: Vec<CategoryInfo> = Vec::new();

    for post in posts {
        match result.iter_mut().find(|c| c.name == post.category) {
            Some(info) => info.count += 1,
            None => result.push(CategoryInfo {
                name: post.category.clone(),
                count: 1,
            }),
        }
    }

    result
}
