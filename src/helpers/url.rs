//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in a single path component.
///
/// Matches the unreserved set of `encodeURIComponent`, so `/` inside a
/// category or filename is escaped too.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode one path segment
///
/// # Examples
/// ```ignore
/// encode_segment("Deep Learning") // -> "Deep%20Learning"
/// ```
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

/// Decode a percent-encoded segment, `None` if it is not valid UTF-8
pub fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Join a base location and a relative resource path
///
/// # Examples
/// ```ignore
/// join_location("./myBlog/", "manifest.json") // -> "./myBlog/manifest.json"
/// join_location("/", "manifest.json")         // -> "/manifest.json"
/// ```
pub fn join_location(base: &str, rel: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    let rel = rel.trim_start_matches('/');

    if trimmed.is_empty() && !base.is_empty() {
        // The root keeps its leading slash
        format!("/{}", rel)
    } else if trimmed.is_empty() {
        rel.to_string()
    } else {
        format!("{}/{}", trimmed, rel)
    }
}

/// Resource path of a post's markdown file relative to a base
pub fn markdown_resource(category: &str, slug: &str) -> String {
    format!("{}/{}.md", encode_segment(category), encode_segment(slug))
}

/// Logical `category/slug.md` identifier, not encoded
pub fn logical_path(category: &str, slug: &str) -> String {
    format!("{}/{}.md", category, slug)
}

/// Route of a post's detail page
pub fn post_route(category: &str, slug: &str) -> String {
    format!("/post/{}/{}", encode_segment(category), encode_segment(slug))
}
