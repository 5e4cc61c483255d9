use std::path::{Path, PathBuf};

use clap::Parser;
use gql_generator_config::{log::LogFormat, AppConfig, CrossReferencePolicy};

use crate::{error::CliError, filters::FieldCoordinate};

/// Generate GraphQL query, mutation and subscription documents from a schema.
///
/// Flags take precedence over the configuration file and `GQLG__*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "gqlg", version)]
pub struct CommandLineInterface {
    /// Configuration file (yaml, json or json5). Defaults to `gqlg.config.*` in the working directory.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Path of your GraphQL schema file
    #[arg(long)]
    pub schema_file_path: Option<PathBuf>,

    /// Directory the generated documents are written into
    #[arg(long)]
    pub dest_dir_path: Option<PathBuf>,

    /// Destination of each document inside the destination directory,
    /// supports {kind}, {Kind}, {field} and {type}
    #[arg(long)]
    pub path_template: Option<String>,

    /// Query depth you want to limit (the default is 100)
    #[arg(long)]
    pub depth_limit: Option<usize>,

    /// Fields deeper than this are selected without arguments
    #[arg(long)]
    pub vars_depth_limit: Option<usize>,

    /// Include deprecated fields and arguments
    #[arg(long, short = 'C')]
    pub include_deprecated_fields: bool,

    /// Expand fields that were already expanded on the current path, up to the depth limit
    #[arg(long)]
    pub include_cross_references: bool,

    /// Do not select `__typename` on unions and expanded interfaces
    #[arg(long)]
    pub no_typename: bool,

    /// Add a `... on Type` branch for every implementation of an interface
    #[arg(long)]
    pub expand_interfaces: bool,

    /// Never select this field, e.g. `User.password` (can be repeated)
    #[arg(long, short = 'x', value_name = "TYPE.FIELD")]
    pub exclude: Vec<FieldCoordinate>,

    /// Print the documents instead of writing them to files
    #[arg(long)]
    pub stdout: bool,

    /// Log level, or an `EnvFilter` directive
    #[arg(long)]
    pub log_level: Option<String>,

    /// One of `pretty_compact`, `pretty_tree`, `json`
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl CommandLineInterface {
    /// Loads the configuration and applies the flags on top of it.
    pub fn load_config(&self) -> Result<AppConfig, CliError> {
        let mut config = gql_generator_config::load_config(self.config.clone())?;
        self.apply_to(&mut config)?;
        config.validate()?;

        Ok(config)
    }

    fn apply_to(&self, config: &mut AppConfig) -> Result<(), CliError> {
        // Paths given as flags are relative to the working directory, not to the config file.
        if let Some(path) = &self.schema_file_path {
            config.schema_path = Some(absolute(path)?);
        }
        if let Some(path) = &self.dest_dir_path {
            config.output.dest_dir = absolute(path)?;
        }
        if let Some(path_template) = &self.path_template {
            config.output.path_template = path_template.clone();
        }

        let generator = &mut config.generator;
        if let Some(depth_limit) = self.depth_limit {
            generator.depth_limit = depth_limit;
        }
        if let Some(vars_depth_limit) = self.vars_depth_limit {
            generator.variables_depth_limit = Some(vars_depth_limit);
        }
        if self.include_deprecated_fields {
            generator.include_deprecated_fields = true;
        }
        if self.include_cross_references {
            generator.cross_reference_policy = CrossReferencePolicy::AllowRepeats;
        }
        if self.no_typename {
            generator.emit_union_discriminator = false;
        }
        if self.expand_interfaces {
            generator.expand_interfaces = true;
        }

        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }

        Ok(())
    }
}

fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    std::path::absolute(path).map_err(|source| CliError::PathResolveError {
        path: path.to_path_buf(),
        source,
    })
}
