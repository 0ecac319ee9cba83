//! Local server for browsing a blog

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{ContentResolver, MarkdownRenderer};
use crate::helpers::{categories, filter_posts, recent, ArchiveQuery};
use crate::templates;
use crate::Folio;

/// Server state
struct ServerState {
    config: SiteConfig,
    resolver: ContentResolver,
    renderer: MarkdownRenderer,
}

/// Build the router for a site
pub fn router(config: SiteConfig, resolver: ContentResolver, renderer: MarkdownRenderer) -> Router {
    let state = Arc::new(ServerState {
        config,
        resolver,
        renderer,
    });

    Router::new()
        .route("/", get(home_handler))
        .route("/home", get(|| async { Redirect::permanent("/") }))
        .route("/posts", get(archive_handler))
        .route("/post/:category/:slug", get(post_handler))
        .route("/about", get(about_handler))
        .route("/api/posts", get(api_posts_handler))
        .route("/api/post/:category/:slug", get(api_post_handler))
        .fallback(|| async { Redirect::temporary("/") })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let resolver = folio.resolver()?;
    tracing::info!("Serving {:?} from {:?}", resolver.candidates(), folio.base_dir);
    let app = router(folio.config.clone(), resolver, folio.renderer());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    let posts = state.resolver.list_posts().await;
    Html(templates::home_page(
        &state.config,
        recent(&posts, state.config.home_limit),
        &categories(&posts),
    ))
}

async fn archive_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ArchiveQuery>,
) -> Html<String> {
    let posts = state.resolver.list_posts().await;
    let matching = filter_posts(&posts, &query);
    Html(templates::archive_page(
        &state.config,
        &matching,
        &categories(&posts),
        &query,
    ))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path((category, slug)): Path<(String, String)>,
) -> Response {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Html(templates::not_found_page(&state.config)),
        )
            .into_response()
    };

    let Some(post) = state.resolver.load_post_content(&category, &slug).await else {
        return not_found();
    };

    match state.renderer.render_with_toc(&post.content) {
        Ok(rendered) => Html(templates::post_page(&state.config, &post, &rendered)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", post.path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
        }
    }
}

async fn about_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(templates::about_page(&state.config))
}

async fn api_posts_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ArchiveQuery>,
) -> Response {
    let posts = state.resolver.list_posts().await;
    let matching = filter_posts(&posts, &query);
    Json(matching).into_response()
}

async fn api_post_handler(
    State(state): State<Arc<ServerState>>,
    Path((category, slug)): Path<(String, String)>,
) -> Response {
    match state.resolver.load_post_content(&category, &slug).await {
        Some(post) => Json(post).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::resolver::tests::{MemorySource, PHYSICS};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn app() -> Router {
        let source = MemorySource::default()
            .with("./myBlog/manifest.json", PHYSICS)
            .with(
                "./myBlog/Physics/wave-equations.md",
                "# Hi\n\n## Derivation\n\n```rust\nlet c = 1;\n```\n",
            );
        let resolver = ContentResolver::new(Arc::new(source), vec!["./myBlog".to_string()]);
        router(SiteConfig::default(), resolver, MarkdownRenderer::new())
    }

    async fn fetch_page(uri: &str) -> (StatusCode, String, Option<String>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap(), location)
    }

    #[tokio::test]
    async fn test_home_lists_recent_posts() {
        let (status, body, _) = fetch_page("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("wave equations"));
        assert!(body.contains(r#"href="/post/Physics/wave-equations""#));
    }

    #[tokio::test]
    async fn test_archive_filters() {
        let (_, body, _) = fetch_page("/posts?q=WAVE").await;
        assert!(body.contains("1 entries"));

        let (_, body, _) = fetch_page("/posts?q=nothing&category=Physics").await;
        assert!(body.contains("0 entries"));
    }

    #[tokio::test]
    async fn test_post_detail() {
        let (status, body, _) = fetch_page("/post/Physics/wave-equations").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<h2 id="marker-0">Derivation</h2>"#));
        assert!(body.contains("Document Map"));
        assert!(body.contains("2024-01-01"));
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let (status, body, _) = fetch_page("/post/Physics/missing-file").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("NULL_DATA"));

        let (status, _, _) = fetch_page("/api/post/Physics/missing-file").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_post() {
        let (status, body, _) = fetch_page("/api/post/Physics/wave-equations").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["title"], "wave equations");
        assert_eq!(value["rawUrl"], "./myBlog/Physics/wave-equations.md");
        assert!(value["content"].as_str().unwrap().starts_with("# Hi"));
    }

    #[tokio::test]
    async fn test_api_posts_listing_has_no_content() {
        let (_, body, _) = fetch_page("/api/posts?category=Physics").await;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["content"], "");
    }

    #[tokio::test]
    async fn test_redirects() {
        let (status, _, location) = fetch_page("/home").await;
        assert_eq!(status, StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location.as_deref(), Some("/"));

        let (status, _, location) = fetch_page("/no/such/page").await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location.as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_about() {
        let (status, body, _) = fetch_page("/about").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>About</h1>"));
    }
}
