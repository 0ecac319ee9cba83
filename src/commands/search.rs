//! Search the archive

use anyhow::Result;

use super::list::format_posts;
use crate::helpers::{filter_posts, ArchiveQuery};
use crate::Folio;

/// Print posts matching a free-text query and/or category
pub async fn run(folio: &Folio, query: &ArchiveQuery, json: bool) -> Result<()> {
    let posts = folio.resolver()?.list_posts().await;
    let matching = filter_posts(&posts, query);
    tracing::debug!("{} of {} posts match {:?}", matching.len(), posts.len(), query);

    if json {
        println!("{}", serde_json::to_string_pretty(&matching)?);
    } else {
        print!("{}", format_posts(matching.iter().copied()));
    }

    Ok(())
}
