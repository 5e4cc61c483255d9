pub mod generator;
pub mod log;
pub mod output;

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, FileSourceFile};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::generator::{ConfigurationError, CrossReferencePolicy, GeneratorConfig};
use crate::{log::LoggingConfig, output::OutputConfig};

#[derive(Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(skip)]
    root_directory: PathBuf,

    /// Path of the GraphQL schema (SDL) the documents are generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,

    /// The logger configuration. By default, only notices, warnings and errors are printed (`info` level).
    #[serde(default)]
    pub log: LoggingConfig,

    /// Where and how generated documents are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Options of the selection set synthesis.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl AppConfig {
    /// Resolves a path relative to the directory of the loaded configuration file.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_directory.join(path)
        }
    }

    pub fn validate(&self) -> Result<(), AppConfigError> {
        self.generator.validate()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("Failed to load configuration: {0}")]
    ConfigLoadError(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("Failed to get the current directory: {0}")]
    CurrentDirError(std::io::Error),
}

static DEFAULT_FILE_NAMES: &[&str] = &[
    "gqlg.config.yaml",
    "gqlg.config.yml",
    "gqlg.config.json",
    "gqlg.config.json5",
];

static ENV_PREFIX: &str = "GQLG";

fn get_current_dir() -> Result<PathBuf, AppConfigError> {
    std::env::current_dir().map_err(AppConfigError::CurrentDirError)
}

pub fn load_config(override_config_path: Option<PathBuf>) -> Result<AppConfig, AppConfigError> {
    let mut config = Config::builder();
    let mut config_root_path = get_current_dir()?;

    if let Some(path_buf) = override_config_path {
        debug!("loading configuration from {}", path_buf.display());

        if let Some(parent_dir) = path_buf.parent() {
            config_root_path = config_root_path.join(parent_dir);
        }
        let as_file: File<FileSourceFile, _> = path_buf.into();
        config = config.add_source(as_file.required(true));
    } else {
        for name in DEFAULT_FILE_NAMES {
            config = config.add_source(File::with_name(name).required(false));
        }
    }

    config = config.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let mut base_cfg = config.build()?.try_deserialize::<AppConfig>()?;
    base_cfg.root_directory = config_root_path;
    base_cfg.validate()?;

    Ok(base_cfg)
}

pub fn parse_yaml_config(config_raw: &str) -> Result<AppConfig, AppConfigError> {
    let mut base_cfg = Config::builder()
        .add_source(File::from_str(config_raw, FileFormat::Yaml))
        .build()?
        .try_deserialize::<AppConfig>()?;
    base_cfg.root_directory = get_current_dir()?;
    base_cfg.validate()?;

    Ok(base_cfg)
}
