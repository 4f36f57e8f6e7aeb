//! Lightweight markup helpers. Nothing here builds a DOM: the scorer's
//! counting rules are defined over raw markup, so extraction stays regex based.

use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title pattern"));
static BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("valid body pattern"));
static META: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\s[^>]*>").expect("valid meta pattern"));
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z][a-z0-9:_-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid attribute pattern")
});

/// Replace every tag with a space
pub fn strip_tags(markup: &str) -> String {
    TAG.replace_all(markup, " ").into_owned()
}

/// Whitespace-delimited non-empty tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Decode the handful of entities that show up in titles and descriptions
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn clean_text(raw: &str) -> String {
    decode_entities(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the `<title>` element
pub fn extract_title(document: &str) -> Option<String> {
    TITLE
        .captures(document)
        .map(|caps| clean_text(&strip_tags(&caps[1])))
}

/// `content` of the first `<meta name="{name}">` tag
pub fn extract_meta(document: &str, name: &str) -> Option<String> {
    META.find_iter(document).find_map(|tag| {
        let mut meta_name = None;
        let mut content = None;
        for caps in ATTRIBUTE.captures_iter(tag.as_str()) {
            let value = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "name" | "property" => meta_name = value,
                "content" => content = value,
                _ => {}
            }
        }
        match (meta_name, content) {
            (Some(n), Some(c)) if n.eq_ignore_ascii_case(name) => Some(clean_text(c)),
            _ => None,
        }
    })
}

/// Inner markup of `<body>`, or the whole document when there is none
pub fn extract_body(document: &str) -> &str {
    BODY.captures(document)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(document)
}
