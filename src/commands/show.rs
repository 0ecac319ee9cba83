//! Show a single post

use anyhow::Result;

use crate::content::{Post, TocItem};
use crate::Folio;

/// How a post is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    Markdown,
    Html,
    Toc,
    Json,
}

/// Print a post's body, rendered HTML, outline, or JSON record
pub async fn run(folio: &Folio, category: &str, slug: &str, format: ShowFormat) -> Result<()> {
    let Some(post) = folio.resolver()?.load_post_content(category, slug).await else {
        anyhow::bail!("Post not found: {}/{}", category, slug);
    };

    match format {
        ShowFormat::Markdown => {
            println!("{}", header(&post));
            println!("{}", post.content);
        }
        ShowFormat::Html => {
            println!("{}", folio.renderer().render(&post.content)?);
        }
        ShowFormat::Toc => {
            let rendered = folio.renderer().render_with_toc(&post.content)?;
            print!("{}", format_toc(&rendered.toc));
        }
        ShowFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&post)?);
        }
    }

    Ok(())
}

fn header(post: &Post) -> String {
    format!(
        "{}\n{} | {} | {}\n",
        post.title, post.category, post.date, post.raw_url
    )
}

/// Indented outline, h3 entries nested under h2
pub fn format_toc(toc: &[TocItem]) -> String {
    toc.iter()
        .map(|item| {
            let indent = if item.level > 2 { "    " } else { "  " };
            format!("{}{} (#{})\n", indent, item.text, item.id)
        })
        .collect()
}
