pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod filename;
pub mod pipeline;
pub mod section;
pub mod service;

pub use config::Settings;
pub use editor::{EditorPort, FileEditor, MemoryEditor, NotifyLevel};
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use section::IngredientsSection;
pub use service::{ExternalService, SubprocessService, UnitSystem};

/// Build a pipeline backed by the subprocess transport described in the
/// settings.
pub fn subprocess_pipeline(settings: Settings) -> Pipeline<SubprocessService> {
    let service = SubprocessService::from_settings(&settings);
    Pipeline::new(settings, service)
}
