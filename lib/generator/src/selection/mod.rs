mod polymorphic;

use gql_generator_config::GeneratorConfig;
use tracing::{debug, instrument, trace};

use crate::{
    context::{CrossReferenceKey, TraversalContext},
    filter::{FieldCandidate, FieldFilter, FieldFilterPolicy},
    schema::{
        ArgumentDefinition, FieldDefinition, OperationKind, SchemaLookupError, SchemaModel,
        TypeDefinition,
    },
    utils::get_indent,
};

/// The rendered lines of one field, or nothing when the field is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    pub text: String,
    pub contributes_variables: bool,
}

impl SelectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Where a field is being selected from.
#[derive(Debug, Clone, Copy)]
struct FieldScope<'s> {
    parent_type: &'s TypeDefinition,
    parent_field_name: Option<&'s str>,
    enclosing_type: Option<&'s TypeDefinition>,
    depth: usize,
}

/// Recursively selects fields of a schema down to leaf types, for a single root field.
pub struct SelectionSetBuilder<'s> {
    schema: &'s SchemaModel,
    config: &'s GeneratorConfig,
    policy: FieldFilterPolicy<'s>,
    operation_kind: OperationKind,
    root_field_name: &'s str,
}

impl<'s> SelectionSetBuilder<'s> {
    pub fn new(
        schema: &'s SchemaModel,
        config: &'s GeneratorConfig,
        filter: &'s dyn FieldFilter,
        operation_kind: OperationKind,
        root_field_name: &'s str,
    ) -> Self {
        Self {
            schema,
            config,
            policy: FieldFilterPolicy::new(config, filter),
            operation_kind,
            root_field_name,
        }
    }

    /// Builds the selection of `field_name` on `parent_type`, including the field line itself.
    /// `depth` is `1` for a root field.
    pub fn build(
        &self,
        field_name: &str,
        parent_type: &'s TypeDefinition,
        parent_field_name: Option<&'s str>,
        context: &mut TraversalContext<'s>,
        depth: usize,
    ) -> Result<SelectionResult, SchemaLookupError> {
        self.build_field(
            field_name,
            FieldScope {
                parent_type,
                parent_field_name,
                enclosing_type: None,
                depth,
            },
            context,
        )
    }

    #[instrument(level = "trace", skip(self, scope, context), fields(
        parent_type = scope.parent_type.name(),
        depth = scope.depth
    ))]
    fn build_field(
        &self,
        field_name: &str,
        scope: FieldScope<'s>,
        context: &mut TraversalContext<'s>,
    ) -> Result<SelectionResult, SchemaLookupError> {
        let field = scope.parent_type.field(field_name)?;
        let field_type = self.schema.field_type(field);

        let candidate = FieldCandidate {
            operation_kind: self.operation_kind,
            root_field_name: self.root_field_name,
            parent_type: scope.parent_type,
            parent_field_name: scope.parent_field_name,
            enclosing_type: scope.enclosing_type,
            field,
            field_type: field_type.as_ref().ok().copied(),
            depth: scope.depth,
            path: context.path(),
        };

        if !self.policy.admits(&candidate) {
            return Ok(SelectionResult::empty());
        }

        // An undefined return type only fails the document once the field is selected.
        let field_type = field_type?;

        let variables_before = context.variables().len();

        let selection_set = if field_type.is_composite_type() {
            match self.build_selection_set(field, field_type, &scope, context)? {
                Some(selection_set) => Some(selection_set),
                // A composite field without any selectable child is never rendered.
                None => return Ok(SelectionResult::empty()),
            }
        } else {
            None
        };

        let indent = get_indent(scope.depth);
        let mut text = format!("{}{}", indent, field.name);

        if !field.arguments.is_empty() && self.config.binds_variables_at(scope.depth) {
            let bindings = context.bind_variables(
                field
                    .arguments
                    .iter()
                    .filter(|argument| self.policy.admits_argument(argument)),
            );

            if !bindings.is_empty() {
                text.push_str(&format!("({})", render_arguments(&bindings)));
            }
        }

        if let Some(selection_set) = selection_set {
            text.push_str(&format!("{{\n{}\n{}}}", selection_set, indent));
        }

        Ok(SelectionResult {
            text,
            contributes_variables: context.variables().len() > variables_before,
        })
    }

    /// The lines between the braces of a composite field, or `None` if the field must be omitted.
    fn build_selection_set(
        &self,
        field: &'s FieldDefinition,
        field_type: &'s TypeDefinition,
        scope: &FieldScope<'s>,
        context: &mut TraversalContext<'s>,
    ) -> Result<Option<String>, SchemaLookupError> {
        let depth_limit = self.config.depth_limit_for(field_type.name());
        if scope.depth > depth_limit {
            debug!(
                "field '{}' exceeds the depth limit of {} for type '{}'",
                field.name,
                depth_limit,
                field_type.name()
            );
            return Ok(None);
        }

        let key = CrossReferenceKey::new(scope.parent_field_name, &field.name);
        if self.config.blocks_cross_references() && context.is_open(&key) {
            debug!("cross reference '{}' is already open, skipping", key);
            return Ok(None);
        }

        let lines = context.within(key, |context| match field_type {
            TypeDefinition::Union(union_type) => {
                self.expand_union(union_type, field_type, &field.name, context, scope.depth)
            }
            TypeDefinition::Interface(_) => {
                self.expand_interface(field_type, &field.name, context, scope.depth)
            }
            _ => self.build_fields_of(
                field_type,
                field_type.fields().into_iter().flat_map(|fields| fields.keys()),
                &field.name,
                None,
                context,
                scope.depth + 1,
            ),
        })?;

        if lines.is_empty() {
            trace!("no selectable fields left under '{}'", field.name);
            return Ok(None);
        }

        Ok(Some(lines.join("\n")))
    }

    /// Builds the given fields of `parent_type` and keeps the non-empty ones, in order.
    fn build_fields_of<I>(
        &self,
        parent_type: &'s TypeDefinition,
        field_names: I,
        parent_field_name: &'s str,
        enclosing_type: Option<&'s TypeDefinition>,
        context: &mut TraversalContext<'s>,
        depth: usize,
    ) -> Result<Vec<String>, SchemaLookupError>
    where
        I: IntoIterator<Item = &'s String>,
    {
        let scope = FieldScope {
            parent_type,
            parent_field_name: Some(parent_field_name),
            enclosing_type,
            depth,
        };
        let mut lines = Vec::new();

        for field_name in field_names {
            let result = self.build_field(field_name, scope, context)?;

            if !result.is_empty() {
                lines.push(result.text);
            }
        }

        Ok(lines)
    }
}

fn render_arguments(bindings: &[(String, &ArgumentDefinition)]) -> String {
    bindings
        .iter()
        .map(|(variable_name, argument)| format!("{}: ${}", argument.name, variable_name))
        .collect::<Vec<_>>()
        .join(", ")
}
