//! The fixed structural contract of a recipe document.
//!
//! A document is an ordered sequence of lines: an optional `# ` title on the
//! first heading line, and at most one Ingredients section delimited by
//! [`INGREDIENTS_HEADING`] and the next heading (or end of document).
//! Ingredient lines inside the section start with [`BULLET_MARKER`].

/// Exact heading emitted by the external scraper for the ingredients section.
pub const INGREDIENTS_HEADING: &str = "## Ingredients 🧂";

/// Marker prefixing each ingredient line.
pub const BULLET_MARKER: &str = "* ";

/// Editor filetype expected for recipe documents.
pub const DOCUMENT_FILETYPE: &str = "markdown";

/// Whether a line is a heading of any level.
pub fn is_heading(line: &str) -> bool {
    line.starts_with('#')
}

/// Extract the display title: the content of the first top-level heading line.
pub fn title(lines: &[String]) -> Option<&str> {
    lines.iter().find_map(|line| {
        let rest = line.strip_prefix("# ")?;
        let rest = rest.trim();
        (!rest.is_empty()).then_some(rest)
    })
}

/// Payload of an ingredient line, if the line is one.
pub fn ingredient_payload(line: &str) -> Option<&str> {
    line.strip_prefix(BULLET_MARKER)
}
