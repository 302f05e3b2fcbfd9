//! Locating and rewriting the Ingredients section of a document.

use crate::document::{ingredient_payload, is_heading, INGREDIENTS_HEADING};
use crate::error::PipelineError;

/// The located Ingredients section of a document.
///
/// `start` and `end` are an inclusive line span, exclusive of the enclosing
/// heading lines. When the heading is the last line of the document the
/// section is empty and `start > end`; [`rewrite`] treats that span as an
/// insertion point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientsSection {
    pub start: usize,
    pub end: usize,
    /// Text of each ingredient line with the bullet marker stripped, in
    /// document order. Non-bullet lines inside the span are not extracted.
    pub payloads: Vec<String>,
}

/// Scan `lines` for the Ingredients section.
///
/// The section opens on the line after the first exact match of the
/// Ingredients heading and closes on the line before the next heading of any
/// level, or at end of document if no further heading exists.
pub fn locate(lines: &[String]) -> Result<IngredientsSection, PipelineError> {
    let heading_at = lines
        .iter()
        .position(|line| line == INGREDIENTS_HEADING)
        .ok_or_else(|| PipelineError::StructureNotFound(INGREDIENTS_HEADING.to_string()))?;

    // When the heading is the last line, start > end and the section is an
    // empty insertion point.
    let start = heading_at + 1;
    let mut end = lines.len().saturating_sub(1);
    let mut payloads = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(start) {
        if is_heading(line) {
            end = index - 1;
            break;
        }
        if let Some(payload) = ingredient_payload(line) {
            payloads.push(payload.to_string());
        }
    }

    Ok(IngredientsSection { start, end, payloads })
}

/// Render payloads as ingredient lines, one bullet per payload.
pub fn bullet_lines(payloads: &[String]) -> Vec<String> {
    payloads
        .iter()
        .map(|payload| format!("{}{}", crate::document::BULLET_MARKER, payload))
        .collect()
}

/// Replace the inclusive span `[start, end]` with one bullet line per payload.
///
/// Lines outside the span are untouched; the replacement may be shorter or
/// longer than the span it covers. A `start > end` span inserts at `start`
/// without removing anything.
pub fn rewrite(lines: &[String], start: usize, end: usize, payloads: &[String]) -> Vec<String> {
    let tail_from = if start > end { start } else { end + 1 };
    let mut result = Vec::with_capacity(lines.len());
    result.extend_from_slice(&lines[..start.min(lines.len())]);
    result.extend(bullet_lines(payloads));
    if tail_from < lines.len() {
        result.extend_from_slice(&lines[tail_from..]);
    }
    result
}
