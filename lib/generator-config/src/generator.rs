use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Global ceiling on the recursion depth of generated selection sets.
    /// The root field of an operation is at depth `1`.
    ///
    /// Default: `100`.
    #[serde(default = "default_depth_limit")]
    pub depth_limit: usize,

    /// Tighter depth ceilings for specific types, keyed by type name.
    /// The smaller of this value and `depth_limit` applies when a field of that type is reached.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_depth_overrides: BTreeMap<String, usize>,

    /// Whether fields and arguments marked with `@deprecated` are selected.
    #[serde(default)]
    pub include_deprecated_fields: bool,

    /// How repeated visits of the same field along one traversal path are handled.
    #[serde(default)]
    pub cross_reference_policy: CrossReferencePolicy,

    /// Restricts the fields selected on a type when it is reached below the root field.
    /// A key may name an object, an interface, or a union (which restricts every branch of it).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub leaf_overrides: BTreeMap<String, BTreeSet<String>>,

    /// Whether `__typename` is selected on union (and expanded interface) fields.
    ///
    /// Default: `true`.
    #[serde(default = "default_emit_union_discriminator")]
    pub emit_union_discriminator: bool,

    /// Fields deeper than this render without their argument list.
    /// If not specified, arguments are bound at every depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_depth_limit: Option<usize>,

    /// Adds a `... on Type` branch for every implementation of an interface-typed field,
    /// selecting the fields the interface itself does not declare.
    #[serde(default)]
    pub expand_interfaces: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CrossReferencePolicy {
    /// A field already open on the current path is not expanded again.
    #[default]
    BlockRepeats,
    /// Repeated expansion is allowed and only the depth limit stops the recursion.
    AllowRepeats,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("depth_limit must be a positive integer, got {0}")]
    InvalidDepthLimit(usize),
    #[error("depth override for type '{0}' must be a positive integer, got {1}")]
    InvalidTypeDepthOverride(String, usize),
    #[error("variables_depth_limit must be a positive integer, got {0}")]
    InvalidVariablesDepthLimit(usize),
    #[error("leaf override for type '{0}' does not allow any field")]
    EmptyLeafOverride(String),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            depth_limit: default_depth_limit(),
            type_depth_overrides: BTreeMap::new(),
            include_deprecated_fields: false,
            cross_reference_policy: CrossReferencePolicy::default(),
            leaf_overrides: BTreeMap::new(),
            emit_union_discriminator: default_emit_union_discriminator(),
            variables_depth_limit: None,
            expand_interfaces: false,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.depth_limit == 0 {
            return Err(ConfigurationError::InvalidDepthLimit(self.depth_limit));
        }

        if let Some((type_name, limit)) = self
            .type_depth_overrides
            .iter()
            .find(|(_, limit)| **limit == 0)
        {
            return Err(ConfigurationError::InvalidTypeDepthOverride(
                type_name.clone(),
                *limit,
            ));
        }

        if self.variables_depth_limit == Some(0) {
            return Err(ConfigurationError::InvalidVariablesDepthLimit(0));
        }

        if let Some((type_name, _)) = self
            .leaf_overrides
            .iter()
            .find(|(_, fields)| fields.is_empty())
        {
            return Err(ConfigurationError::EmptyLeafOverride(type_name.clone()));
        }

        Ok(())
    }

    /// The depth ceiling in effect for fields returning `type_name`.
    pub fn depth_limit_for(&self, type_name: &str) -> usize {
        self.type_depth_overrides
            .get(type_name)
            .map_or(self.depth_limit, |limit| (*limit).min(self.depth_limit))
    }

    pub fn binds_variables_at(&self, depth: usize) -> bool {
        self.variables_depth_limit
            .is_none_or(|limit| depth <= limit)
    }

    pub fn blocks_cross_references(&self) -> bool {
        self.cross_reference_policy == CrossReferencePolicy::BlockRepeats
    }
}

fn default_depth_limit() -> usize {
    100
}

fn default_emit_union_discriminator() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = GeneratorConfig::default();

        assert_eq!(config.depth_limit, 100);
        assert!(!config.include_deprecated_fields);
        assert!(config.emit_union_discriminator);
        assert!(config.blocks_cross_references());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_depth_limit() {
        let config = GeneratorConfig {
            depth_limit: 0,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidDepthLimit(0))
        );
    }

    #[test]
    fn rejects_zero_type_override_and_empty_leaf_set() {
        let mut config = GeneratorConfig::default();
        config.type_depth_overrides.insert("User".to_string(), 0);
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::InvalidTypeDepthOverride(
                "User".to_string(),
                0
            ))
        );

        let mut config = GeneratorConfig::default();
        config
            .leaf_overrides
            .insert("User".to_string(), BTreeSet::new());
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::EmptyLeafOverride("User".to_string()))
        );
    }

    #[test]
    fn type_override_only_tightens() {
        let mut config = GeneratorConfig {
            depth_limit: 5,
            ..Default::default()
        };
        config.type_depth_overrides.insert("User".to_string(), 2);
        config.type_depth_overrides.insert("Post".to_string(), 9);

        assert_eq!(config.depth_limit_for("User"), 2);
        assert_eq!(config.depth_limit_for("Post"), 5);
        assert_eq!(config.depth_limit_for("Comment"), 5);
    }

    #[test]
    fn variables_depth_limit() {
        let mut config = GeneratorConfig::default();
        assert!(config.binds_variables_at(42));

        config.variables_depth_limit = Some(1);
        assert!(config.binds_variables_at(1));
        assert!(!config.binds_variables_at(2));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{
                "depth_limit": 3,
                "cross_reference_policy": "allow_repeats",
                "leaf_overrides": { "User": ["id", "name"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.depth_limit, 3);
        assert_eq!(
            config.cross_reference_policy,
            CrossReferencePolicy::AllowRepeats
        );
        assert!(config.emit_union_discriminator);
        assert_eq!(
            config.leaf_overrides["User"],
            BTreeSet::from(["id".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<GeneratorConfig>(r#"{ "depthLimit": 3 }"#);

        assert!(result.is_err());
    }
}
