//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Folio Configuration

# Site
title: Folio
subtitle: Engineering notes
author: John Doe
about: ''
portfolio:

# Content
## Candidate locations of the blog directory, tried in order.
## Local paths are relative to this file; set `origin` to fetch over HTTP.
sources:
  - ./myBlog
origin:
manifest: manifest.json
request_timeout: 10

# Views
home_limit: 4
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const MANIFEST: &str = r#"{
  "categories": [
    {
      "name": "General",
      "posts": [
        { "filename": "hello-world", "summary": "Your very first post." }
      ]
    }
  ]
}
"#;

const SAMPLE_POST: &str = r#"# Hello World

Welcome! Posts live in `myBlog/<category>/<filename>.md` and are listed in
`myBlog/manifest.json`.

## Quick Start

### Add a post

Write the markdown file, then add an entry to the manifest:

```json
{ "filename": "my-new-post", "summary": "What it is about", "date": "2024-01-01" }
```

### Run server

```bash
$ folio-rs server
```
"#;

/// Initialize a new site in the given directory, keeping existing files
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("myBlog/General"))?;

    write_if_missing(&target_dir.join("_config.yml"), CONFIG)?;
    write_if_missing(&target_dir.join("myBlog/manifest.json"), MANIFEST)?;
    write_if_missing(&target_dir.join("myBlog/General/hello-world.md"), SAMPLE_POST)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}
