//! Content resolver - loads the manifest and post bodies from candidate sources

use std::sync::Arc;

use super::source::{Fetched, Fetcher};
use super::{Manifest, Post};
use crate::helpers::{join_location, markdown_resource};

/// Default manifest file name
pub const MANIFEST_FILE: &str = "manifest.json";

/// Resolves blog content by trying each candidate base in order
#[derive(Clone)]
pub struct ContentResolver {
    fetcher: Arc<dyn Fetcher>,
    candidates: Vec<String>,
    manifest_name: String,
}

impl ContentResolver {
    /// Create a resolver over `candidates`, tried first to last
    pub fn new(fetcher: Arc<dyn Fetcher>, candidates: Vec<String>) -> Self {
        Self {
            fetcher,
            candidates,
            manifest_name: MANIFEST_FILE.to_string(),
        }
    }

    /// Use a different manifest file name
    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    /// Candidate bases in priority order
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The base listings are located against
    pub fn primary(&self) -> &str {
        self.candidates.first().map(String::as_str).unwrap_or("")
    }

    /// Fetch `rel` from the first candidate answering with an OK status.
    ///
    /// `accept` turns the response into a value; returning `None` rejects it
    /// and moves on to the next candidate. Yields the location that
    /// succeeded together with the accepted value.
    async fn fetch_first<T, F>(&self, rel: &str, accept: F) -> Option<(String, T)>
    where
        F: Fn(Fetched) -> Option<T>,
    {
        for base in &self.candidates {
            let location = join_location(base, rel);
            match self.fetcher.fetch(&location).await {
                Ok(fetched) if fetched.is_ok() => match accept(fetched) {
                    Some(value) => {
                        tracing::debug!("Resolved {}", location);
                        return Some((location, value));
                    }
                    None => tracing::debug!("Rejected response from {}", location),
                },
                Ok(fetched) => {
                    tracing::debug!("{} answered with status {}", location, fetched.status);
                }
                Err(e) => {
                    tracing::debug!("Failed to fetch {}: {}", location, e);
                }
            }
        }
        None
    }

    /// Load the manifest, or an empty one if no candidate provides it
    pub async fn load_manifest(&self) -> Manifest {
        let parse = |fetched: Fetched| match serde_json::from_str::<Manifest>(&fetched.body) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::debug!("Malformed manifest: {}", e);
                None
            }
        };

        match self.fetch_first(&self.manifest_name, parse).await {
            Some((_, manifest)) => manifest,
            None => {
                tracing::warn!(
                    "Failed to load blog manifest {} from {:?}",
                    self.manifest_name,
                    self.candidates
                );
                Manifest::default()
            }
        }
    }

    /// List every post in manifest order, without content
    pub async fn list_posts(&self) -> Vec<Post> {
        let manifest = self.load_manifest().await;
        let base = self.primary();

        manifest
            .categories
            .iter()
            .flat_map(|category| {
                category
                    .posts
                    .iter()
                    .map(move |entry| Post::from_entry(base, &category.name, entry))
            })
            .collect()
    }

    /// Load a post including its markdown body.
    ///
    /// Manifest metadata is optional: a post missing from the manifest still
    /// resolves if its file exists. Returns `None` if no candidate serves the
    /// markdown file.
    pub async fn load_post_content(&self, category: &str, slug: &str) -> Option<Post> {
        let manifest = self.load_manifest().await;
        let entry = manifest.entry(category, slug);

        let rel = markdown_resource(category, slug);
        let Some((location, content)) = self.fetch_first(&rel, |f| Some(f.body)).await else {
            tracing::warn!("Error loading post {}/{}: no candidate served {}", category, slug, rel);
            return None;
        };

        let mut post = Post::assemble(
            category,
            slug,
            entry.and_then(|e| e.date.as_deref()),
            entry.map(|e| e.summary.as_str()).unwrap_or(""),
            location,
        );
        post.content = content;
        Some(post)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::source::SourceError;
    use crate::content::UNDATED;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory fetcher recording every location it was asked for
    #[derive(Default)]
    pub(crate) struct MemorySource {
        files: HashMap<String, Fetched>,
        broken: Vec<String>,
        pub(crate) requests: Mutex<Vec<String>>,
    }

    impl MemorySource {
        pub(crate) fn with(mut self, location: &str, body: &str) -> Self {
            self.files.insert(location.to_string(), Fetched::ok(body));
            self
        }

        pub(crate) fn with_status(mut self, location: &str, status: u16) -> Self {
            self.files.insert(
                location.to_string(),
                Fetched {
                    status,
                    body: "error page".to_string(),
                },
            );
            self
        }

        fn broken(mut self, location: &str) -> Self {
            self.broken.push(location.to_string());
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for MemorySource {
        async fn fetch(&self, location: &str) -> Result<Fetched, SourceError> {
            self.requests.lock().unwrap().push(location.to_string());
            if self.broken.iter().any(|b| b == location) {
                return Err(SourceError::InvalidLocation(location.to_string()));
            }
            Ok(self
                .files
                .get(location)
                .cloned()
                .unwrap_or_else(Fetched::not_found))
        }
    }

    pub(crate) const PHYSICS: &str = r#"{"categories":[{"name":"Physics","posts":[{"filename":"wave-equations","summary":"intro","date":"2024-01-01"}]}]}"#;

    fn resolver(source: MemorySource, candidates: &[&str]) -> (ContentResolver, Arc<MemorySource>) {
        let source = Arc::new(source);
        let resolver = ContentResolver::new(
            source.clone(),
            candidates.iter().map(|c| c.to_string()).collect(),
        );
        (resolver, source)
    }

    #[tokio::test]
    async fn test_list_posts_scenario() {
        let source = MemorySource::default().with("./myBlog/manifest.json", PHYSICS);
        let (resolver, _) = resolver(source, &["./myBlog"]);

        let posts = resolver.list_posts().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "wave equations");
        assert_eq!(posts[0].content, "");
        assert_eq!(posts[0].date, "2024-01-01");
        assert_eq!(posts[0].raw_url, "./myBlog/Physics/wave-equations.md");
    }

    #[tokio::test]
    async fn test_list_preserves_manifest_order() {
        let manifest = r#"{"categories":[
            {"name":"B","posts":[{"filename":"z","summary":""},{"filename":"a","summary":""}]},
            {"name":"A","posts":[]},
            {"name":"C","posts":[{"filename":"m","summary":""}]}
        ]}"#;
        let source = MemorySource::default().with("./myBlog/manifest.json", manifest);
        let (resolver, _) = resolver(source, &["./myBlog"]);

        let posts = resolver.list_posts().await;
        let keys: Vec<_> = posts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(keys, vec!["B/z.md", "B/a.md", "C/m.md"]);
        assert_eq!(posts.len(), resolver.load_manifest().await.post_count());
    }

    #[tokio::test]
    async fn test_unreachable_manifest_gives_empty_listing() {
        let source = MemorySource::default()
            .broken("./myBlog/manifest.json")
            .with_status("/myBlog/manifest.json", 500);
        let (resolver, source) = resolver(source, &["./myBlog", "/myBlog"]);

        assert!(resolver.list_posts().await.is_empty());
        assert_eq!(
            source.requested(),
            vec!["./myBlog/manifest.json", "/myBlog/manifest.json"]
        );
    }

    #[tokio::test]
    async fn test_candidates_tried_in_order_until_success() {
        let source = MemorySource::default()
            .with_status("./myBlog/manifest.json", 404)
            .with("/myBlog/manifest.json", PHYSICS)
            .with("./myblog/manifest.json", r#"{"categories":[]}"#);
        let (resolver, source) = resolver(source, &["./myBlog", "/myBlog", "./myblog"]);
        assert_eq!(resolver.candidates().len(), 3);
        assert_eq!(resolver.primary(), "./myBlog");

        let manifest = resolver.load_manifest().await;
        assert_eq!(manifest.post_count(), 1);
        assert_eq!(
            source.requested(),
            vec!["./myBlog/manifest.json", "/myBlog/manifest.json"]
        );
    }

    #[tokio::test]
    async fn test_malformed_manifest_falls_through() {
        let source = MemorySource::default()
            .with("./myBlog/manifest.json", "<html>SPA fallback</html>")
            .with("/myBlog/manifest.json", PHYSICS);
        let (resolver, _) = resolver(source, &["./myBlog", "/myBlog"]);

        assert_eq!(resolver.load_manifest().await.post_count(), 1);
    }

    #[tokio::test]
    async fn test_custom_manifest_name() {
        let source = MemorySource::default().with("./myBlog/index.json", PHYSICS);
        let (resolver, _) = resolver(source, &["./myBlog"]);
        let resolver = resolver.with_manifest_name("index.json");

        assert_eq!(resolver.list_posts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_load_post_content_scenario() {
        let source = MemorySource::default()
            .with("./myBlog/manifest.json", PHYSICS)
            .with("./myBlog/Physics/wave-equations.md", "# Hi");
        let (resolver, _) = resolver(source, &["./myBlog"]);

        let post = resolver
            .load_post_content("Physics", "wave-equations")
            .await
            .unwrap();
        assert_eq!(post.content, "# Hi");
        assert_eq!(post.date, "2024-01-01");
        assert_eq!(post.summary, "intro");
        assert_eq!(post.title, "wave equations");
        assert_eq!(post.path, "Physics/wave-equations.md");
    }

    #[tokio::test]
    async fn test_missing_file_gives_none() {
        let source = MemorySource::default().with("./myBlog/manifest.json", PHYSICS);
        let (resolver, source) = resolver(source, &["./myBlog", "/myBlog"]);

        assert!(resolver.load_post_content("Physics", "missing-file").await.is_none());
        let requested = source.requested();
        assert!(requested.contains(&"./myBlog/Physics/missing-file.md".to_string()));
        assert!(requested.contains(&"/myBlog/Physics/missing-file.md".to_string()));
    }

    #[tokio::test]
    async fn test_post_outside_manifest_uses_defaults() {
        let source = MemorySource::default()
            .with("./myBlog/manifest.json", PHYSICS)
            .with("./myBlog/Drafts/untracked-note.md", "body");
        let (resolver, _) = resolver(source, &["./myBlog"]);

        let post = resolver
            .load_post_content("Drafts", "untracked-note")
            .await
            .unwrap();
        assert_eq!(post.date, UNDATED);
        assert_eq!(post.summary, "");
        assert_eq!(post.content, "body");
    }

    #[tokio::test]
    async fn test_content_without_manifest() {
        let source = MemorySource::default().with("./myBlog/Physics/wave-equations.md", "# Hi");
        let (resolver, _) = resolver(source, &["./myBlog"]);

        let post = resolver
            .load_post_content("Physics", "wave-equations")
            .await
            .unwrap();
        assert_eq!(post.date, UNDATED);
        assert_eq!(post.content, "# Hi");
    }

    #[tokio::test]
    async fn test_raw_url_is_the_successful_location() {
        let source = MemorySource::default()
            .with("./myBlog/manifest.json", PHYSICS)
            .with("/blog/Deep%20Learning/a%2Fb.md", "x");
        let (resolver, _) = resolver(source, &["./myBlog", "/blog/"]);

        let post = resolver.load_post_content("Deep Learning", "a/b").await.unwrap();
        assert_eq!(post.raw_url, "/blog/Deep%20Learning/a%2Fb.md");
        assert_eq!(post.path, "Deep Learning/a/b.md");
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let (resolver, source) = resolver(MemorySource::default(), &[]);
        assert!(resolver.list_posts().await.is_empty());
        assert!(resolver.load_post_content("a", "b").await.is_none());
        assert!(source.requested().is_empty());
    }
}
