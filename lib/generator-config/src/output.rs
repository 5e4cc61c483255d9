use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// The directory generated documents are written into.
    #[serde(default = "default_dest_dir")]
    pub dest_dir: PathBuf,

    /// The destination of each document, relative to `dest_dir`.
    ///
    /// Supported placeholders: `{kind}` (`query`, `mutation`, `subscription`), `{Kind}` (`Query`, `Mutation`, `Subscription`),
    /// `{field}` (the root field name) and `{type}` (the named return type of the root field).
    #[serde(default = "default_path_template")]
    pub path_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dest_dir: default_dest_dir(),
            path_template: default_path_template(),
        }
    }
}

fn default_dest_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_path_template() -> String {
    "{kind}/{field}.gql".to_string()
}
