use std::fmt::Display;

use gql_generator_config::{ConfigurationError, GeneratorConfig};
use rayon::prelude::*;
use tracing::{error, instrument, warn};

use crate::{
    context::TraversalContext,
    document::{assemble_document, collect_variable_definitions, VariableDefinition},
    filter::FieldFilter,
    schema::{FieldDefinition, OperationKind, SchemaLookupError, SchemaModel, TypeDefinition},
    selection::SelectionSetBuilder,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub operation_kind: OperationKind,
    pub field_name: String,
    /// The named type returned by the root field.
    pub return_type_name: String,
    pub variables: Vec<VariableDefinition>,
    pub text: String,
}

impl Display for GeneratedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Conditions that are reported to the caller but never fail a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    MissingRootType(OperationKind),
    EmptyRootType(OperationKind, String),
    DeprecatedRootField(OperationKind, String),
    EmptySelection(OperationKind, String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::MissingRootType(kind) => {
                write!(f, "No {} type found in your schema", kind.default_type_name())
            }
            Notice::EmptyRootType(kind, type_name) => {
                write!(f, "Root {} type '{}' has no fields", kind, type_name)
            }
            Notice::DeprecatedRootField(kind, field_name) => {
                write!(f, "Skipping deprecated {} field '{}'", kind, field_name)
            }
            Notice::EmptySelection(kind, field_name) => write!(
                f,
                "Every field under {} '{}' was filtered out, no document generated",
                kind, field_name
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentFailure {
    pub operation_kind: OperationKind,
    pub field_name: String,
    pub error: SchemaLookupError,
}

#[derive(Debug, Default)]
pub struct GenerationReport {
    pub documents: Vec<GeneratedDocument>,
    pub failures: Vec<DocumentFailure>,
    pub notices: Vec<Notice>,
}

impl GenerationReport {
    pub fn document(&self, kind: OperationKind, field_name: &str) -> Option<&GeneratedDocument> {
        self.documents
            .iter()
            .find(|document| document.operation_kind == kind && document.field_name == field_name)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Generates documents for the root fields of a schema.
///
/// The configuration is validated once, when the generator is created. Every document gets a
/// fresh [`TraversalContext`], so documents are generated independently (and in parallel by
/// [`DocumentGenerator::generate_all`]).
pub struct DocumentGenerator<'s> {
    schema: &'s SchemaModel,
    config: &'s GeneratorConfig,
    filter: &'s dyn FieldFilter,
}

impl<'s> DocumentGenerator<'s> {
    pub fn new(
        schema: &'s SchemaModel,
        config: &'s GeneratorConfig,
        filter: &'s dyn FieldFilter,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;

        Ok(Self {
            schema,
            config,
            filter,
        })
    }

    /// Generates the document of a single root field. `Ok(None)` means every field of its
    /// selection was filtered out.
    #[instrument(level = "debug", skip(self))]
    pub fn generate(
        &self,
        operation_kind: OperationKind,
        field_name: &str,
    ) -> Result<Option<GeneratedDocument>, SchemaLookupError> {
        let root_type = self.schema.root_type(operation_kind).ok_or_else(|| {
            SchemaLookupError::DefinitionNotFound(operation_kind.default_type_name().to_string())
        })?;
        let field = root_type.field(field_name)?;

        self.generate_for_field(operation_kind, root_type, field)
    }

    fn generate_for_field(
        &self,
        operation_kind: OperationKind,
        root_type: &'s TypeDefinition,
        field: &'s FieldDefinition,
    ) -> Result<Option<GeneratedDocument>, SchemaLookupError> {
        let builder = SelectionSetBuilder::new(
            self.schema,
            self.config,
            self.filter,
            operation_kind,
            &field.name,
        );
        let mut context = TraversalContext::new();
        let selection = builder.build(&field.name, root_type, None, &mut context, 1)?;

        if selection.is_empty() {
            return Ok(None);
        }

        let variables = collect_variable_definitions(context.variables());
        let text = assemble_document(operation_kind, &field.name, &selection, &variables);

        Ok(Some(GeneratedDocument {
            operation_kind,
            field_name: field.name.clone(),
            return_type_name: field.field_type.inner_type().to_string(),
            variables,
            text,
        }))
    }

    /// Generates a document for every root field of every root type present in the schema.
    ///
    /// A lookup failure only affects the document it happened in; it is recorded in the
    /// report next to the documents that were generated.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_all(&self) -> GenerationReport {
        let mut report = GenerationReport::default();
        let mut root_fields = Vec::new();

        for operation_kind in OperationKind::ALL {
            let Some(root_type) = self.schema.root_type(operation_kind) else {
                report
                    .notices
                    .push(Notice::MissingRootType(operation_kind));
                continue;
            };

            let fields = root_type.fields().into_iter().flat_map(|fields| fields.values());
            let mut found_any = false;

            for field in fields {
                found_any = true;

                if field.deprecated && !self.config.include_deprecated_fields {
                    report.notices.push(Notice::DeprecatedRootField(
                        operation_kind,
                        field.name.clone(),
                    ));
                    continue;
                }

                root_fields.push((operation_kind, root_type, field));
            }

            if !found_any {
                report.notices.push(Notice::EmptyRootType(
                    operation_kind,
                    root_type.name().to_string(),
                ));
            }
        }

        let outcomes = root_fields
            .par_iter()
            .map(|&(operation_kind, root_type, field)| {
                (
                    operation_kind,
                    field,
                    self.generate_for_field(operation_kind, root_type, field),
                )
            })
            .collect::<Vec<_>>();

        for (operation_kind, field, outcome) in outcomes {
            match outcome {
                Ok(Some(document)) => report.documents.push(document),
                Ok(None) => report
                    .notices
                    .push(Notice::EmptySelection(operation_kind, field.name.clone())),
                Err(error) => {
                    error!(
                        "failed to generate {} '{}': {}",
                        operation_kind, field.name, error
                    );
                    report.failures.push(DocumentFailure {
                        operation_kind,
                        field_name: field.name.clone(),
                        error,
                    });
                }
            }
        }

        for notice in report.notices.iter() {
            warn!("{}", notice);
        }

        report
    }
}

/// Validates `config` and generates every root field document of `schema`.
pub fn generate_documents(
    schema: &SchemaModel,
    config: &GeneratorConfig,
    filter: &dyn FieldFilter,
) -> Result<GenerationReport, ConfigurationError> {
    Ok(DocumentGenerator::new(schema, config, filter)?.generate_all())
}
