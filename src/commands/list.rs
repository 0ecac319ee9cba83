//! List site content

use anyhow::Result;

use crate::content::Post;
use crate::helpers::categories;
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str, json: bool) -> Result<()> {
    let resolver = folio.resolver()?;

    match content_type {
        "post" | "posts" => {
            let posts = resolver.list_posts().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                print!("{}", format_posts(&posts));
            }
        }
        "category" | "categories" => {
            let posts = resolver.list_posts().await;
            let categories = categories(&posts);
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                println!("Categories ({}):", categories.len());
                for cat in categories {
                    println!("  {} ({})", cat.name, cat.count);
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

/// One line per post: date, title, logical path
pub fn format_posts<'a, I>(posts: I) -> String
where
    I: IntoIterator<Item = &'a Post>,
    I::IntoIter: ExactSizeIterator,
{
    let posts = posts.into_iter();
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        out.push_str(&format!("  {} - {} [{}]\n", post.date, post.title, post.path));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ManifestPost;

    #[test]
    fn test_format_posts() {
        let posts = vec![Post::from_entry(
            "./myBlog",
            "Physics",
            &ManifestPost {
                filename: "wave-equations".to_string(),
                summary: String::new(),
                date: Some("2024-01-01".to_string()),
            },
        )];
        assert_eq!(
            format_posts(&posts),
            "Posts (1):\n  2024-01-01 - wave equations [Physics/wave-equations.md]\n"
        );
        assert_eq!(format_posts(&Vec::<Post>::new()), "Posts (0):\n");
    }
}
