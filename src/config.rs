use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Runtime settings for the recipe pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Flat directory where scraped recipe documents are stored
    #[serde(default = "default_recipes_dir")]
    pub recipes_dir: PathBuf,
    /// Runtime used to launch the external service (resolved on PATH)
    #[serde(default = "default_runtime")]
    pub runtime: String,
    /// Path to the external scrape/convert script
    #[serde(default = "default_script")]
    pub script: PathBuf,
    /// File extension for stored documents, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recipes_dir: default_recipes_dir(),
            runtime: default_runtime(),
            script: default_script(),
            extension: default_extension(),
        }
    }
}

fn default_recipes_dir() -> PathBuf {
    PathBuf::from("recipes")
}

fn default_runtime() -> String {
    "python3".to_string()
}

fn default_script() -> PathBuf {
    PathBuf::from("tempura_cli.py")
}

fn default_extension() -> String {
    "md".to_string()
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with TEMPURA__ prefix
    /// 2. tempura.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: TEMPURA__RECIPES_DIR
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("tempura").required(false))
            .add_source(
                Environment::with_prefix("TEMPURA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Full path for a stored document with the given filename stem.
    pub fn document_path(&self, stem: &str) -> PathBuf {
        self.recipes_dir
            .join(format!("{}.{}", stem, self.extension))
    }
}
