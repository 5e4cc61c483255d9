use std::collections::{BTreeMap, BTreeSet};

use gql_generator_config::GeneratorConfig;
use tracing::trace;

use crate::{
    context::CrossReferenceKey,
    schema::{ArgumentDefinition, FieldDefinition, OperationKind, TypeDefinition},
};

/// Everything known about a field at the moment it is considered for selection.
#[derive(Debug, Clone, Copy)]
pub struct FieldCandidate<'a> {
    pub operation_kind: OperationKind,
    pub root_field_name: &'a str,
    pub parent_type: &'a TypeDefinition,
    /// `None` for the root field of the document.
    pub parent_field_name: Option<&'a str>,
    /// The union or interface whose inline fragment the field is selected in, if any.
    pub enclosing_type: Option<&'a TypeDefinition>,
    pub field: &'a FieldDefinition,
    /// `None` when the type the field returns is not defined in the schema.
    pub field_type: Option<&'a TypeDefinition>,
    pub depth: usize,
    /// The fields open above this one, starting with the root field.
    pub path: &'a [CrossReferenceKey<'a>],
}

impl FieldCandidate<'_> {
    pub fn is_root_field(&self) -> bool {
        self.parent_field_name.is_none()
    }

    /// Field names from the root field down to (and including) this field.
    pub fn field_path(&self) -> Vec<&str> {
        self.path
            .iter()
            .map(|key| key.field_name)
            .chain(std::iter::once(self.field.name.as_str()))
            .collect()
    }
}

/// A caller-supplied rule deciding whether a field takes part in the generated documents.
pub trait FieldFilter: Send + Sync {
    fn include(&self, candidate: &FieldCandidate<'_>) -> bool;
}

impl<F> FieldFilter for F
where
    F: Fn(&FieldCandidate<'_>) -> bool + Send + Sync,
{
    fn include(&self, candidate: &FieldCandidate<'_>) -> bool {
        self(candidate)
    }
}

pub struct IncludeAllFields;

impl FieldFilter for IncludeAllFields {
    fn include(&self, _candidate: &FieldCandidate<'_>) -> bool {
        true
    }
}

/// The built-in rules (deprecation, leaf overrides) combined with a custom [`FieldFilter`].
pub struct FieldFilterPolicy<'c> {
    include_deprecated: bool,
    leaf_overrides: &'c BTreeMap<String, BTreeSet<String>>,
    custom: &'c dyn FieldFilter,
}

impl<'c> FieldFilterPolicy<'c> {
    pub fn new(config: &'c GeneratorConfig, custom: &'c dyn FieldFilter) -> Self {
        Self {
            include_deprecated: config.include_deprecated_fields,
            leaf_overrides: &config.leaf_overrides,
            custom,
        }
    }

    pub fn admits(&self, candidate: &FieldCandidate<'_>) -> bool {
        if candidate.field.deprecated && !self.include_deprecated {
            trace!("field '{}' is deprecated", candidate.field.name);
            return false;
        }

        if !candidate.is_root_field() {
            let field_name = candidate.field.name.as_str();
            let restricted_by_parent = !self.leaf_allows(candidate.parent_type.name(), field_name);
            let restricted_by_enclosing = candidate
                .enclosing_type
                .is_some_and(|enclosing| !self.leaf_allows(enclosing.name(), field_name));

            if restricted_by_parent || restricted_by_enclosing {
                trace!("field '{}' is not listed in leaf overrides", field_name);
                return false;
            }
        }

        self.custom.include(candidate)
    }

    pub fn admits_argument(&self, argument: &ArgumentDefinition) -> bool {
        self.include_deprecated || !argument.deprecated
    }

    fn leaf_allows(&self, type_name: &str, field_name: &str) -> bool {
        self.leaf_overrides
            .get(type_name)
            .is_none_or(|allowed| allowed.contains(field_name))
    }
}
