//! The external scrape/convert service and its subprocess transport.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use log::debug;

use crate::config::Settings;
use crate::error::PipelineError;

/// Target measurement system for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(PipelineError::Validation(format!(
                "Unsupported unit system '{}'. Use 'metric' or 'imperial'.",
                other
            ))),
        }
    }
}

/// Narrow interface to the out-of-process scraper/converter, so the transport
/// is swappable without touching the pipeline logic.
pub trait ExternalService {
    /// Fetch a URL and return the full recipe document text.
    fn scrape(&self, url: &str) -> Result<String, PipelineError>;

    /// Rewrite ingredient payloads for the target system. The returned list
    /// may differ in length from the input.
    fn convert(
        &self,
        system: UnitSystem,
        payloads: &[String],
    ) -> Result<Vec<String>, PipelineError>;
}

/// Transport that launches the external service as a blocking subprocess:
/// `<runtime> <script> <mode> <args...>`.
///
/// stdout and stderr are captured and combined; the exit code alone decides
/// whether the combined text is the payload or a diagnostic.
#[derive(Debug, Clone)]
pub struct SubprocessService {
    runtime: String,
    script: PathBuf,
}

impl SubprocessService {
    pub fn new(runtime: impl Into<String>, script: impl Into<PathBuf>) -> Self {
        Self {
            runtime: runtime.into(),
            script: script.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.runtime.clone(), settings.script.clone())
    }

    /// Verify the script and runtime exist before launching anything, so the
    /// two missing-dependency cases get distinct diagnostics.
    fn check_dependencies(&self) -> Result<(), PipelineError> {
        if !self.script.is_file() {
            return Err(PipelineError::ExecutableMissing(self.script.clone()));
        }
        if !runtime_available(&self.runtime) {
            return Err(PipelineError::RuntimeMissing(self.runtime.clone()));
        }
        Ok(())
    }

    fn invoke(&self, mode: &str, args: &[&str]) -> Result<String, PipelineError> {
        self.check_dependencies()?;

        debug!("invoking {} {:?} {} {:?}", self.runtime, self.script, mode, args);
        let output = Command::new(&self.runtime)
            .arg(&self.script)
            .arg(mode)
            .args(args)
            .output()
            .map_err(|e| PipelineError::ProcessFailure(e.to_string()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            Err(PipelineError::ProcessFailure(combined.trim().to_string()))
        }
    }
}

impl ExternalService for SubprocessService {
    fn scrape(&self, url: &str) -> Result<String, PipelineError> {
        self.invoke("scrape", &[url])
    }

    fn convert(
        &self,
        system: UnitSystem,
        payloads: &[String],
    ) -> Result<Vec<String>, PipelineError> {
        let request = serde_json::to_string(payloads)
            .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
        let response = self.invoke("convert", &[system.as_str(), &request])?;

        serde_json::from_str::<Vec<String>>(response.trim()).map_err(|_| {
            PipelineError::MalformedResponse(format!(
                "expected a JSON array of strings, got: {}",
                response.trim()
            ))
        })
    }
}

/// Resolve a runtime the way the OS would: paths are checked directly,
/// bare names are searched on PATH.
fn runtime_available(runtime: &str) -> bool {
    let as_path = Path::new(runtime);
    if as_path.components().count() > 1 {
        return as_path.is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| dir.join(runtime).is_file())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_system_parses_case_insensitively() {
        assert_eq!("metric".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert_eq!(
            "IMPERIAL".parse::<UnitSystem>().unwrap(),
            UnitSystem::Imperial
        );
        assert_eq!(
            " Metric ".parse::<UnitSystem>().unwrap(),
            UnitSystem::Metric
        );
    }

    #[test]
    fn test_unit_system_rejects_unknown_tags() {
        let err = "stone".parse::<UnitSystem>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("stone"));
    }

    #[test]
    fn test_missing_script_reported_before_launch() {
        let service = SubprocessService::new("python3", "/nonexistent/tempura_cli.py");
        let err = service.scrape("https://example.com").unwrap_err();
        assert!(matches!(err, PipelineError::ExecutableMissing(_)));
    }
}
