use std::path::PathBuf;

use gql_generator_config::AppConfigError;
use gql_generator_core::{ConfigurationError, SchemaBuildError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    ConfigError(#[from] AppConfigError),
    #[error(transparent)]
    InvalidGeneratorOptions(#[from] ConfigurationError),
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("No schema file was provided, use --schema-file-path or set `schema_path` in the configuration")]
    MissingSchemaPath,
    #[error("Failed to read schema file '{path}': {source}")]
    SchemaReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to load schema: {0}")]
    SchemaBuildError(#[from] SchemaBuildError),
    #[error("Invalid path template '{0}': unknown placeholder '{{{1}}}'")]
    InvalidPathTemplate(String, String),
    #[error("Invalid path template '{0}': unclosed placeholder")]
    UnclosedPlaceholder(String),
    #[error("Failed to resolve path '{path}': {source}")]
    PathResolveError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write document to '{path}': {source}")]
    DocumentWriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}
