//! HTML allowlist sanitization for rendered card fragments
//!
//! Names and descriptions may embed simple markup; everything emitted toward
//! the host screen is filtered against a small fixed tag/attribute allowlist
//! first. Disallowed tags are dropped while their inner text is kept.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Allowed tags and, per tag, allowed attributes.
static ALLOWED_TAGS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut map: HashMap<&str, &[&str]> = HashMap::new();
    map.insert("a", &["href", "title", "target"]);
    map.insert("abbr", &["title"]);
    map.insert("acronym", &["title"]);
    map.insert("code", &[]);
    map.insert("pre", &[]);
    map.insert("em", &[]);
    map.insert("strong", &[]);
    map.insert("ul", &[]);
    map.insert("ol", &[]);
    map.insert("li", &[]);
    map.insert("p", &[]);
    map.insert("br", &[]);
    map
});

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<\s*(/?)\s*([a-zA-Z0-9]+)([^>]*)>").unwrap());

static ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([a-zA-Z][a-zA-Z0-9_-]*)\s*=\s*"([^"]*)""#).unwrap());

/// Filter HTML against the allowlist.
///
/// Unknown tags are removed entirely (inner text survives); allowed tags are
/// rebuilt keeping only their allowed attributes.
pub fn sanitize(html: &str) -> String {
    TAG.replace_all(html, |caps: &Captures| {
        let closing = !caps[1].is_empty();
        let name = caps[2].to_lowercase();
        let attrs = &caps[3];

        let allowed_attrs = match ALLOWED_TAGS.get(name.as_str()) {
            Some(attrs) => *attrs,
            None => return String::new(),
        };

        if closing {
            return format!("</{}>", name);
        }

        let mut kept = String::new();
        for attr in ATTR.captures_iter(attrs) {
            let attr_name = attr[1].to_lowercase();
            if allowed_attrs.contains(&attr_name.as_str()) {
                kept.push_str(&format!(r#" {}="{}""#, attr_name, &attr[2]));
            }
        }

        format!("<{}{}>", name, kept)
    })
    .into_owned()
}

/// Remove every tag, keeping only text content.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Escape text for HTML element content.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for a double-quoted HTML attribute value.
pub fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;").replace('\'', "&#39;")
}
