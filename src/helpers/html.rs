//! HTML helper functions

use super::url::encode_segment;

/// Escape text for HTML bodies and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate an anchor tag; `text` is escaped, `href` is used as is
///
/// # Examples
/// ```ignore
/// link_to("/about", "About", false) // -> <a href="/about">About</a>
/// ```
pub fn link_to(href: &str, text: &str, external: bool) -> String {
    if external || href.starts_with("http://") || href.starts_with("https://") {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            href,
            escape_html(text)
        )
    } else {
        format!(r#"<a href="{}">{}</a>"#, href, escape_html(text))
    }
}

/// Archive URL with optional query and category filters
pub fn archive_url(q: Option<&str>, category: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(q) = q.filter(|q| !q.trim().is_empty()) {
        params.push(format!("q={}", encode_segment(q)));
    }
    if let Some(category) = category.filter(|c| !c.is_empty()) {
        params.push(format!("category={}", encode_segment(category)));
    }

    if params.is_empty() {
        "/posts".to_string()
    } else {
        format!("/posts?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_link_to() {
        assert_eq!(link_to("/about", "About", false), r#"<a href="/about">About</a>"#);
        assert_eq!(
            link_to("https://example.com", "Site", false),
            r#"<a href="https://example.com" target="_blank" rel="noopener">Site</a>"#
        );
    }

    #[test]
    fn test_archive_url() {
        assert_eq!(archive_url(None, None), "/posts");
        assert_eq!(archive_url(Some(" "), Some("")), "/posts");
        assert_eq!(
            archive_url(Some("wave eq"), Some("Deep Learning")),
            "/posts?q=wave%20eq&category=Deep%20Learning"
        );
    }
}
