//! Anchor extraction from directory-listing HTML.
//!
//! Only `<a href>` targets are inspected. Character references in the
//! attribute value are decoded. Root-relative targets (site navigation) are
//! dropped; every other target is reduced to its last path segment.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn href_regex() -> &'static Regex {
    static HREF_REGEX: OnceLock<Regex> = OnceLock::new();
    HREF_REGEX.get_or_init(|| {
        // `href` must start an attribute, so `data-href` is skipped.
        Regex::new(r#"(?is)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
            .expect("href regex is valid")
    })
}

/// Every `href` value with entities decoded, in document order.
pub fn hrefs(html: &str) -> Vec<Cow<'_, str>> {
    href_regex()
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)).or_else(|| cap.get(3)))
        .map(|m| decode_entities(m.as_str()))
        .collect()
}

/// Decode the predefined character references of an attribute value.
fn decode_entities(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    // `&amp;` last so `&amp;lt;` stays `&lt;`.
    Cow::Owned(
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}

/// File name a listing link points at, if it is a file link.
///
/// Query and fragment are ignored. Returns `None` for root-relative targets
/// and for targets without a final segment (e.g. `../`).
pub fn file_name(href: &str) -> Option<&str> {
    if href.starts_with('/') {
        return None;
    }

    let path = href.split(['?', '#']).next().unwrap_or_default();
    let name = path.rsplit('/').next().unwrap_or_default();

    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Unique file names linked from a listing, in document order.
pub fn listed_file_names(html: &str) -> Vec<String> {
    let links = hrefs(html);
    let mut seen = HashSet::new();
    links
        .iter()
        .filter_map(|href| file_name(href))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
