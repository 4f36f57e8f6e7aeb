//! Minimal front matter: a `---` fenced block of `key: value` lines at the top
//! of a markdown file. Nested YAML is not supported; such lines are skipped.

use super::error::{DocumentError, Result};

const FENCE: &str = "---";

/// Front matter fields the scorer cares about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keyword: Option<String>,
    pub slug: Option<String>,
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Split a markdown source into its front matter and body
pub fn split(source: &str) -> Result<(FrontMatter, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = source.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == FENCE => {}
        _ => return Ok((FrontMatter::default(), source)),
    }

    let mut front = FrontMatter::default();
    let mut offset = source.split_inclusive('\n').next().map_or(0, str::len);

    for line in lines {
        offset += line.len();
        if line.trim_end() == FENCE {
            return Ok((front, &source[offset..]));
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value);
        if value.is_empty() {
            continue;
        }
        let value = Some(value.to_string());
        match key.trim() {
            "title" => front.title = value,
            "description" | "metaDescription" | "meta_description" => front.description = value,
            "keyword" | "primaryKeyword" | "primary_keyword" => front.keyword = value,
            "slug" => front.slug = value,
            _ => {}
        }
    }

    Err(DocumentError::UnterminatedFrontMatter)
}

/// First ATX `# ` heading in a markdown body
pub fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
}
