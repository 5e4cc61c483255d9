use super::{OperationKind, TypeKind};

#[derive(Debug, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("Failed to parse schema: {0}")]
    ParseError(#[from] graphql_parser::schema::ParseError),
    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),
    #[error("Root {0} type '{1}' is not defined in the schema")]
    UnknownRootType(OperationKind, String),
    #[error("Root {0} type '{1}' must be an object type")]
    InvalidRootType(OperationKind, String),
    #[error("Cannot extend undefined type '{0}'")]
    UnknownExtendedType(String),
    #[error("Cannot apply a {1} extension to type '{0}'")]
    ExtensionKindMismatch(String, TypeKind),
    #[error("Field '{1}' is defined more than once on type '{0}'")]
    DuplicateField(String, String),
}

/// The schema model is internally inconsistent: a referenced type or field does not exist.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SchemaLookupError {
    #[error("Definition with name '{0}' was not found")]
    DefinitionNotFound(String),
    #[error("Field named '{0}' was not found in definition name '{1}'")]
    FieldDefinitionNotFound(String, String),
    #[error("Definition '{0}' is a {1} and has no fields to select")]
    NotComposite(String, TypeKind),
}
