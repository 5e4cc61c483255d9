mod utils;

pub mod context;
pub mod document;
pub mod filter;
pub mod generator;
pub mod schema;
pub mod selection;

#[cfg(test)]
mod tests;

pub use gql_generator_config::{ConfigurationError, CrossReferencePolicy, GeneratorConfig};

pub use document::VariableDefinition;
pub use filter::{FieldCandidate, FieldFilter, IncludeAllFields};
pub use generator::{
    generate_documents, DocumentFailure, DocumentGenerator, GeneratedDocument, GenerationReport,
    Notice,
};
pub use schema::{OperationKind, SchemaBuildError, SchemaLookupError, SchemaModel};
