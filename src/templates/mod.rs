//! HTML views for the local server
//!
//! Pages are assembled from plain strings; every piece of manifest or config
//! text is escaped before it is written out. Rendered markdown is inserted
//! as is.

use crate::config::SiteConfig;
use crate::content::{CategoryInfo, Post, RenderedPost};
use crate::helpers::{archive_url, escape_html, link_to, post_route, ArchiveQuery};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #0f172a; background: #f8fafc; }
header, main, footer { max-width: 72rem; margin: 0 auto; padding: 1rem 1.5rem; }
header { display: flex; gap: 1.5rem; align-items: center; justify-content: space-between; }
nav a { margin-right: 1rem; text-transform: uppercase; font-size: .75rem; color: #64748b; text-decoration: none; }
nav a.active { color: #2563eb; }
.post-card { padding: 1rem 0; border-bottom: 1px solid #e2e8f0; }
.category { font-size: .7rem; text-transform: uppercase; color: #2563eb; }
.date { font-size: .7rem; color: #94a3b8; margin-left: .75rem; }
.toc a.level-3 { padding-left: 1.25rem; font-size: .85em; }
.content pre { padding: 1rem; overflow-x: auto; border-radius: .5rem; }
"#;

/// Which navigation entry is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Archive,
    About,
    Other,
}

/// Wrap a page body in the site layout
pub fn layout(config: &SiteConfig, title: &str, section: Section, q: &str, body: &str) -> String {
    let nav_item = |href: &str, label: &str, this: Section| {
        let class = if this == section { r#" class="active""# } else { "" };
        format!(r#"<a href="{}"{}>{}</a>"#, href, class, label)
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
<style>{style}</style>
</head>
<body>
<header>
<a href="/" class="brand">{site}</a>
<nav>{home}{archive}{about}</nav>
<form action="/posts" method="get"><input type="search" name="q" value="{q}" placeholder="Search"></form>
</header>
<main>
{body}
</main>
<footer><small>&copy; {author}</small></footer>
</body>
</html>
"#,
        title = escape_html(title),
        site = escape_html(&config.title),
        style = STYLE,
        home = nav_item("/", "Home", Section::Home),
        archive = nav_item("/posts", "Archive", Section::Archive),
        about = nav_item("/about", "About", Section::About),
        q = escape_html(q),
        body = body,
        author = escape_html(&config.author),
    )
}

/// A post summary card
pub fn post_card(post: &Post) -> String {
    format!(
        r#"<article class="post-card"><div><a class="category" href="{cat_url}">{category}</a><span class="date">{date}</span></div><h3>{title}</h3><p>{summary}</p></article>"#,
        cat_url = archive_url(None, Some(&post.category)),
        category = escape_html(&post.category),
        date = escape_html(&post.date),
        title = link_to(&post_route(&post.category, &post.slug), &post.title, false),
        summary = escape_html(&post.summary),
    )
}

fn category_list(categories: &[CategoryInfo], active: Option<&str>) -> String {
    let items: String = categories
        .iter()
        .map(|c| {
            let class = if active == Some(c.name.as_str()) { " active" } else { "" };
            format!(
                r#"<li class="category-item{}"><a href="{}">{}</a> <span class="category-count">{}</span></li>"#,
                class,
                archive_url(None, Some(&c.name)),
                escape_html(&c.name),
                c.count
            )
        })
        .collect();
    format!(r#"<ul class="category-list">{}</ul>"#, items)
}

/// Home page: the latest entries and every category
pub fn home_page(config: &SiteConfig, recent: &[Post], categories: &[CategoryInfo]) -> String {
    let cards: String = recent.iter().map(post_card).collect();
    let portfolio = config
        .portfolio
        .as_deref()
        .map(|url| format!("<p>{}</p>", link_to(url, "Portfolio", true)))
        .unwrap_or_default();

    let body = format!(
        r#"<section class="hero"><h1>{title}</h1><p>{subtitle}</p><p><a href="/posts">Access Archive &rarr;</a></p>{portfolio}</section>
<section><h2>Recent Entries</h2>{cards}</section>
<section><h2>Categories</h2>{categories}</section>"#,
        title = escape_html(&config.title),
        subtitle = escape_html(&config.subtitle),
        portfolio = portfolio,
        cards = if cards.is_empty() { "<p>No entries yet.</p>".to_string() } else { cards },
        categories = category_list(categories, None),
    );
    layout(config, "Home", Section::Home, "", &body)
}

/// Archive page with the active filters applied by the caller
pub fn archive_page(
    config: &SiteConfig,
    posts: &[&Post],
    categories: &[CategoryInfo],
    query: &ArchiveQuery,
) -> String {
    let cards: String = posts.iter().map(|p| post_card(p)).collect();
    let heading = match (query.text(), query.category()) {
        (Some(q), _) => format!("Results for &ldquo;{}&rdquo;", escape_html(q)),
        (None, Some(c)) => escape_html(c),
        (None, None) => "Archive".to_string(),
    };

    let body = format!(
        r#"<h1>{heading}</h1><p class="count">{count} entries</p>{categories}<section>{cards}</section>"#,
        heading = heading,
        count = posts.len(),
        categories = category_list(categories, query.category()),
        cards = if cards.is_empty() { "<p>No matching entries.</p>".to_string() } else { cards },
    );
    layout(config, "Archive", Section::Archive, query.text().unwrap_or(""), &body)
}

/// Post detail page
pub fn post_page(config: &SiteConfig, post: &Post, rendered: &RenderedPost) -> String {
    let toc = if rendered.toc.is_empty() {
        String::new()
    } else {
        let links: String = rendered
            .toc
            .iter()
            .map(|item| {
                format!(
                    r##"<a class="level-{}" href="#{}">{}</a><br>"##,
                    item.level,
                    item.id,
                    escape_html(&item.text)
                )
            })
            .collect();
        format!(r#"<nav class="toc"><h3>Document Map</h3>{}</nav>"#, links)
    };

    let body = format!(
        r#"<nav class="breadcrumbs"><a href="/">Front</a> / <a href="/posts">Archive</a> / <span>{title}</span></nav>
<article>
<header><a class="category" href="{cat_url}">{category}</a><span class="date">{date}</span><h1>{title}</h1></header>
{toc}
<div class="content">{content}</div>
</article>"#,
        title = escape_html(&post.title),
        cat_url = archive_url(None, Some(&post.category)),
        category = escape_html(&post.category),
        date = escape_html(&post.date),
        toc = toc,
        content = rendered.html,
    );
    layout(config, &post.title, Section::Other, "", &body)
}

/// Static about page
pub fn about_page(config: &SiteConfig) -> String {
    let about = if config.about.is_empty() {
        format!("<p>{} writes about engineering and research.</p>", escape_html(&config.author))
    } else {
        config
            .about
            .split("\n\n")
            .map(|para| format!("<p>{}</p>", escape_html(para.trim())))
            .collect()
    };

    let body = format!(
        r#"<h1>About</h1><h2>{author}</h2>{about}"#,
        author = escape_html(&config.author),
        about = about,
    );
    layout(config, "About", Section::About, "", &body)
}

/// Shown when a post cannot be resolved
pub fn not_found_page(config: &SiteConfig) -> String {
    let body = r#"<h1>NULL_DATA</h1><p>This entry could not be found.</p><p><a href="/posts">Return to Archive</a></p>"#;
    layout(config, "Not Found", Section::Other, "", body)
}
