mod builder;
pub mod error;

use std::fmt::{Debug, Display};

use graphql_parser::schema as input;
use indexmap::IndexMap;

pub use error::{SchemaBuildError, SchemaLookupError};

pub type SchemaDocument<'a> = input::Document<'a, String>;
pub type FieldMap = IndexMap<String, FieldDefinition>;

pub static BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    /// The conventional name of the root type for this kind, also its role in the schema.
    pub fn default_type_name(&self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
            OperationKind::Subscription => "Subscription",
        }
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Enum,
    Object,
    Interface,
    Union,
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Scalar => write!(f, "scalar"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Object => write!(f, "object"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Union => write!(f, "union"),
        }
    }
}

/// A read-only view of the output types of a schema.
///
/// Definitions and fields keep the order they are declared in the SDL, so the documents
/// generated from the model are reproducible.
#[derive(Debug)]
pub struct SchemaModel {
    definitions: IndexMap<String, TypeDefinition>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl SchemaModel {
    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.values()
    }

    pub fn type_by_name(&self, type_name: &str) -> Result<&TypeDefinition, SchemaLookupError> {
        self.definitions
            .get(type_name)
            .ok_or_else(|| SchemaLookupError::DefinitionNotFound(type_name.to_string()))
    }

    /// Resolves the named type a field returns, ignoring list and non-null wrappers.
    pub fn field_type(&self, field: &FieldDefinition) -> Result<&TypeDefinition, SchemaLookupError> {
        self.type_by_name(field.field_type.inner_type())
    }

    pub fn root_type_name(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    pub fn root_type(&self, kind: OperationKind) -> Option<&TypeDefinition> {
        self.root_type_name(kind)
            .and_then(|name| self.definitions.get(name))
            .filter(|definition| matches!(definition, TypeDefinition::Object(_)))
    }

    /// Object types implementing `interface_name`, in declaration order.
    pub fn implementations_of<'a>(
        &'a self,
        interface_name: &'a str,
    ) -> impl Iterator<Item = &'a TypeDefinition> + 'a {
        self.definitions
            .values()
            .filter(move |definition| match definition {
                TypeDefinition::Object(object_type) => object_type
                    .implements_interfaces
                    .iter()
                    .any(|name| name == interface_name),
                _ => false,
            })
    }
}

#[derive(Debug)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Enum(EnumType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(scalar_type) => &scalar_type.name,
            TypeDefinition::Enum(enum_type) => &enum_type.name,
            TypeDefinition::Object(object_type) => &object_type.name,
            TypeDefinition::Interface(interface_type) => &interface_type.name,
            TypeDefinition::Union(union_type) => &union_type.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Scalar(_) => TypeKind::Scalar,
            TypeDefinition::Enum(_) => TypeKind::Enum,
            TypeDefinition::Object(_) => TypeKind::Object,
            TypeDefinition::Interface(_) => TypeKind::Interface,
            TypeDefinition::Union(_) => TypeKind::Union,
        }
    }

    pub fn is_composite_type(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Object(_) | TypeDefinition::Interface(_) | TypeDefinition::Union(_)
        )
    }

    pub fn fields(&self) -> Option<&FieldMap> {
        match self {
            TypeDefinition::Object(object_type) => Some(&object_type.fields),
            TypeDefinition::Interface(interface_type) => Some(&interface_type.fields),
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) | TypeDefinition::Union(_) => {
                None
            }
        }
    }

    pub fn field(&self, field_name: &str) -> Result<&FieldDefinition, SchemaLookupError> {
        self.fields()
            .ok_or_else(|| SchemaLookupError::NotComposite(self.name().to_string(), self.kind()))?
            .get(field_name)
            .ok_or_else(|| {
                SchemaLookupError::FieldDefinitionNotFound(
                    field_name.to_string(),
                    self.name().to_string(),
                )
            })
    }
}

#[derive(Debug)]
pub struct ScalarType {
    pub name: String,
}

#[derive(Debug)]
pub struct EnumType {
    pub name: String,
}

#[derive(Debug)]
pub struct ObjectType {
    pub name: String,
    pub fields: FieldMap,
    pub implements_interfaces: Vec<String>,
}

#[derive(Debug)]
pub struct InterfaceType {
    pub name: String,
    pub fields: FieldMap,
}

#[derive(Debug)]
pub struct UnionType {
    pub name: String,
    pub types: Vec<String>,
}

#[derive(Debug)]
pub struct FieldDefinition {
    pub name: String,
    pub field_type: TypeNode,
    pub arguments: Vec<ArgumentDefinition>,
    pub deprecated: bool,
}

#[derive(Debug)]
pub struct ArgumentDefinition {
    pub name: String,
    pub value_type: TypeNode,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeNode {
    List(Box<TypeNode>),
    NonNull(Box<TypeNode>),
    Named(String),
}

impl TypeNode {
    pub fn inner_type(&self) -> &str {
        match self {
            TypeNode::List(inner) => inner.as_ref().inner_type(),
            TypeNode::NonNull(inner) => inner.as_ref().inner_type(),
            TypeNode::Named(name) => name,
        }
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeNode::List(inner) => write!(f, "[{}]", inner),
            TypeNode::NonNull(inner) => write!(f, "{}!", inner),
            TypeNode::Named(name) => write!(f, "{}", name),
        }
    }
}

impl<'a, T: input::Text<'a>> From<&input::Type<'a, T>> for TypeNode {
    fn from(input_type: &input::Type<'a, T>) -> Self {
        match input_type {
            input::Type::ListType(inner) => TypeNode::List(Box::new(inner.as_ref().into())),
            input::Type::NonNullType(inner) => TypeNode::NonNull(Box::new(inner.as_ref().into())),
            input::Type::NamedType(name) => TypeNode::Named(name.as_ref().to_string()),
        }
    }
}
