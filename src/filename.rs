//! Deriving a safe filesystem name for a scraped document.

use std::time::{SystemTime, UNIX_EPOCH};

const TITLE_MAX: usize = 200;
const NAME_MAX: usize = 255;

/// Derive a non-empty, bounded, filesystem-safe name (no extension) from the
/// scraped title, falling back to the source URL and finally to a
/// timestamp-based placeholder. Never fails.
pub fn derive(candidate_title: Option<&str>, source_url: &str) -> String {
    let name = from_title(candidate_title).unwrap_or_else(|| from_url(source_url));

    if name.is_empty() || name.len() > NAME_MAX {
        return placeholder();
    }
    name
}

fn from_title(candidate: Option<&str>) -> Option<String> {
    let title = candidate?.to_lowercase();
    let kept: String = title
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || c.is_whitespace())
        .collect();
    let slug = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() || slug.len() > TITLE_MAX {
        return None;
    }
    Some(slug)
}

fn from_url(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let segment = without_scheme
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let cleaned: String = segment
        .chars()
        .map(|c| match c {
            '?' | '&' | '=' | '.' | ':' | ';' | '%' | '/' | '\\' | '#' => '_',
            other => other,
        })
        .collect();
    let cleaned = cleaned.trim_matches('_');

    if cleaned.is_empty() {
        return placeholder();
    }
    cleaned.chars().take(TITLE_MAX).collect()
}

fn placeholder() -> String {
    let epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{}_recipe", epoch)
}
