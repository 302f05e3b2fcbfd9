//! Capability port for the hosting editor.
//!
//! The pipeline never talks to a host application directly; it goes through
//! [`EditorPort`]. [`MemoryEditor`] backs unit tests and embedders that hold
//! the document in memory, [`FileEditor`] backs the CLI by treating a file on
//! disk as the open document.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

/// Everything the pipeline needs from the hosting editor.
pub trait EditorPort {
    /// Snapshot of the current document's lines.
    fn read_lines(&self) -> Vec<String>;

    /// Replace the inclusive line span `[start, end]` with `lines`. A span
    /// with `start > end` inserts before `start` without removing anything.
    fn replace_lines(&mut self, start: usize, end: usize, lines: &[String]);

    /// Surface a message to the user.
    fn notify(&mut self, level: NotifyLevel, message: &str);

    /// Show the document at `path` to the user.
    fn open(&mut self, path: &Path);

    /// Host-reported type of the current document, e.g. `"markdown"`.
    fn filetype(&self) -> Option<String>;

    /// Whether the host offers a file picker for browsing recipes.
    fn has_picker(&self) -> bool {
        false
    }

    /// Let the user choose one of `files`; `None` when nothing was picked.
    fn pick(&mut self, _files: &[PathBuf]) -> Option<PathBuf> {
        None
    }
}

fn splice(lines: &mut Vec<String>, start: usize, end: usize, replacement: &[String]) {
    let tail_from = if start > end { start } else { end + 1 };
    let mut result = Vec::with_capacity(lines.len());
    result.extend_from_slice(&lines[..start.min(lines.len())]);
    result.extend_from_slice(replacement);
    if tail_from < lines.len() {
        result.extend_from_slice(&lines[tail_from..]);
    }
    *lines = result;
}

/// In-memory editor holding one document; records notifications and opened
/// paths so callers can assert on them.
#[derive(Debug, Default)]
pub struct MemoryEditor {
    pub lines: Vec<String>,
    pub filetype: Option<String>,
    pub notifications: Vec<(NotifyLevel, String)>,
    pub opened: Vec<PathBuf>,
    /// When set, `pick` selects the file at this index.
    pub picks: Option<usize>,
}

impl MemoryEditor {
    pub fn markdown(lines: Vec<String>) -> Self {
        Self {
            lines,
            filetype: Some("markdown".to_string()),
            ..Default::default()
        }
    }
}

impl EditorPort for MemoryEditor {
    fn read_lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn replace_lines(&mut self, start: usize, end: usize, lines: &[String]) {
        splice(&mut self.lines, start, end, lines);
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        self.notifications.push((level, message.to_string()));
    }

    fn open(&mut self, path: &Path) {
        self.opened.push(path.to_path_buf());
    }

    fn filetype(&self) -> Option<String> {
        self.filetype.clone()
    }

    fn has_picker(&self) -> bool {
        self.picks.is_some()
    }

    fn pick(&mut self, files: &[PathBuf]) -> Option<PathBuf> {
        self.picks.and_then(|index| files.get(index).cloned())
    }
}

/// Editor over a single file on disk, used by the CLI. Lines are loaded once;
/// `save` writes them back.
#[derive(Debug)]
pub struct FileEditor {
    path: PathBuf,
    lines: Vec<String>,
}

impl FileEditor {
    /// Editor with no open document, for operations that only notify or open.
    pub fn detached() -> Self {
        Self {
            path: PathBuf::new(),
            lines: Vec::new(),
        }
    }

    pub fn open_file(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        let lines = content.lines().map(str::to_string).collect();
        Ok(Self { path, lines })
    }

    pub fn save(&self) -> io::Result<()> {
        let mut content = self.lines.join("\n");
        content.push('\n');
        fs::write(&self.path, content)
    }
}

impl EditorPort for FileEditor {
    fn read_lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    fn replace_lines(&mut self, start: usize, end: usize, lines: &[String]) {
        splice(&mut self.lines, start, end, lines);
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        match level {
            NotifyLevel::Info => info!("{}", message),
            NotifyLevel::Warn => warn!("{}", message),
            NotifyLevel::Error => error!("{}", message),
        }
    }

    fn open(&mut self, path: &Path) {
        println!("{}", path.display());
    }

    fn filetype(&self) -> Option<String> {
        match self.path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => Some("markdown".to_string()),
            other => other.map(str::to_string),
        }
    }
}
