//! Orchestration of the scrape, convert and find operations.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::config::Settings;
use crate::document::{self, DOCUMENT_FILETYPE};
use crate::editor::{EditorPort, NotifyLevel};
use crate::error::PipelineError;
use crate::filename;
use crate::section;
use crate::service::{ExternalService, UnitSystem};

/// Sequences the pipeline operations over an injected external service and
/// editor port. One instance per host; operations are synchronous and
/// independent.
pub struct Pipeline<S: ExternalService> {
    settings: Settings,
    service: S,
}

impl<S: ExternalService> Pipeline<S> {
    pub fn new(settings: Settings, service: S) -> Self {
        Self { settings, service }
    }

    /// Scrape `url` into a new stored document and open it in the editor.
    ///
    /// Returns the path of the stored document. The file becomes visible only
    /// after its full content is written; a failed write leaves nothing
    /// behind at the target path.
    pub fn scrape(
        &self,
        editor: &mut dyn EditorPort,
        url: &str,
    ) -> Result<PathBuf, PipelineError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(PipelineError::Validation("A recipe URL is required".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PipelineError::Validation(format!(
                "'{}' does not look like a web address",
                url
            )));
        }

        let payload = self.service.scrape(url)?;
        let lines: Vec<String> = payload.lines().map(str::to_string).collect();

        let stem = filename::derive(document::title(&lines), url);
        fs::create_dir_all(&self.settings.recipes_dir)?;
        let path = self.settings.document_path(&stem);

        // Write-then-rename so an interrupted write is never visible as a
        // complete document.
        let mut temp = NamedTempFile::new_in(&self.settings.recipes_dir)?;
        temp.write_all(payload.as_bytes())?;
        temp.persist(&path).map_err(|e| e.error)?;
        debug!("stored scraped recipe at {}", path.display());

        editor.open(&path);
        editor.notify(
            NotifyLevel::Info,
            &format!("Recipe saved to {}", path.display()),
        );
        Ok(path)
    }

    /// Rewrite the open document's Ingredients section for `system_tag`.
    ///
    /// Operates on a snapshot of the editor's lines and re-validates the
    /// section span against a fresh read before writing, so a document that
    /// shifted mid-operation is left untouched.
    pub fn convert(
        &self,
        editor: &mut dyn EditorPort,
        system_tag: &str,
    ) -> Result<UnitSystem, PipelineError> {
        let system: UnitSystem = system_tag.parse()?;

        let filetype = editor.filetype();
        if filetype.as_deref() != Some(DOCUMENT_FILETYPE) {
            return Err(PipelineError::Validation(format!(
                "Not a recipe document (filetype '{}', expected '{}')",
                filetype.as_deref().unwrap_or("none"),
                DOCUMENT_FILETYPE
            )));
        }

        let snapshot = editor.read_lines();
        let located = section::locate(&snapshot)?;
        debug!(
            "converting {} ingredient lines at [{}, {}] to {}",
            located.payloads.len(),
            located.start,
            located.end,
            system
        );

        let converted = self.service.convert(system, &located.payloads)?;

        // Optimistic-concurrency guard: only write if the section still sits
        // where the snapshot said it was.
        let current = editor.read_lines();
        let revalidated = section::locate(&current)?;
        if revalidated.start != located.start || revalidated.end != located.end {
            warn!("ingredients section moved during conversion, aborting");
            return Err(PipelineError::Validation(
                "Document changed during conversion; no changes applied".into(),
            ));
        }

        editor.replace_lines(located.start, located.end, &section::bullet_lines(&converted));
        editor.notify(
            NotifyLevel::Info,
            &format!("Ingredients converted to {}", system),
        );
        Ok(system)
    }

    /// List stored recipe documents and, when the host has a picker, let the
    /// user open one. Without a picker the command degrades to reporting the
    /// listing as unavailable for browsing.
    pub fn find(&self, editor: &mut dyn EditorPort) -> Result<Vec<PathBuf>, PipelineError> {
        let mut documents = Vec::new();
        match fs::read_dir(&self.settings.recipes_dir) {
            Ok(entries) => {
                for entry in entries {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str())
                        == Some(self.settings.extension.as_str())
                    {
                        documents.push(path);
                    }
                }
            }
            // A missing directory just means nothing has been scraped yet.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        documents.sort();

        if documents.is_empty() {
            editor.notify(NotifyLevel::Info, "No stored recipes found");
        } else if editor.has_picker() {
            if let Some(choice) = editor.pick(&documents) {
                editor.open(&choice);
            }
        } else {
            editor.notify(
                NotifyLevel::Warn,
                "Recipe browser unavailable; listing stored recipes only",
            );
        }
        Ok(documents)
    }

    /// Run `scrape` and fold any failure into a single notification.
    pub fn run_scrape(&self, editor: &mut dyn EditorPort, url: &str) -> bool {
        match self.scrape(editor, url) {
            Ok(_) => true,
            Err(e) => {
                notify_failure(editor, &e);
                false
            }
        }
    }

    /// Run `convert` and fold any failure into a single notification.
    pub fn run_convert(&self, editor: &mut dyn EditorPort, system_tag: &str) -> bool {
        match self.convert(editor, system_tag) {
            Ok(_) => true,
            Err(e) => {
                notify_failure(editor, &e);
                false
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

fn notify_failure(editor: &mut dyn EditorPort, error: &PipelineError) {
    let level = if error.is_validation() {
        NotifyLevel::Warn
    } else {
        NotifyLevel::Error
    };
    editor.notify(level, &error.to_string());
}
