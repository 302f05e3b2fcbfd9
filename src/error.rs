use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scraping or converting a recipe document
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Bad user input, caught before any subprocess is launched
    #[error("{0}")]
    Validation(String),

    /// The external scraper script is not where the configuration says it is
    #[error("Scraper script not found: {}", .0.display())]
    ExecutableMissing(PathBuf),

    /// The configured runtime could not be resolved
    #[error("Runtime '{0}' not found on PATH")]
    RuntimeMissing(String),

    /// The external service exited non-zero or could not be launched;
    /// carries its combined stdout/stderr verbatim
    #[error("External service failed: {0}")]
    ProcessFailure(String),

    /// The service replied, but not with a JSON array of strings
    #[error("Malformed response from external service: {0}")]
    MalformedResponse(String),

    /// The document has no Ingredients section to rewrite
    #[error("No '{0}' section found in this document")]
    StructureNotFound(String),

    /// Directory or file creation/write failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PipelineError {
    /// Validation failures are surfaced as warnings; everything else is an error.
    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}
