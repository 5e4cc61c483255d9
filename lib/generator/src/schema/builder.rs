use graphql_parser::schema as input;
use indexmap::IndexMap;
use tracing::{instrument, trace};

use super::{
    ArgumentDefinition, EnumType, FieldDefinition, FieldMap, InterfaceType, ObjectType,
    OperationKind, ScalarType, SchemaBuildError, SchemaDocument, SchemaModel, TypeDefinition,
    TypeKind, UnionType, BUILTIN_SCALARS,
};

type DefinitionMap = IndexMap<String, TypeDefinition>;

static DEPRECATED_DIRECTIVE: &str = "deprecated";

impl SchemaModel {
    pub fn parse(sdl: &str) -> Result<Self, SchemaBuildError> {
        let document = graphql_parser::parse_schema::<String>(sdl)?;

        Self::from_document(&document)
    }

    #[instrument(level = "trace", skip(document), name = "new_schema_model")]
    pub fn from_document(document: &SchemaDocument<'_>) -> Result<Self, SchemaBuildError> {
        let mut definitions = Self::build_map(document)?;

        for definition in document.definitions.iter() {
            if let input::Definition::TypeExtension(extension) = definition {
                Self::apply_extension(&mut definitions, extension)?;
            }
        }

        let schema_definition = document.definitions.iter().find_map(|d| match d {
            input::Definition::SchemaDefinition(schema_definition) => Some(schema_definition),
            _ => None,
        });

        let mut instance = Self {
            definitions,
            query_type: None,
            mutation_type: None,
            subscription_type: None,
        };

        for kind in OperationKind::ALL {
            let root_type_name = match schema_definition {
                Some(schema_definition) => {
                    let declared = match kind {
                        OperationKind::Query => &schema_definition.query,
                        OperationKind::Mutation => &schema_definition.mutation,
                        OperationKind::Subscription => &schema_definition.subscription,
                    };
                    declared
                        .as_ref()
                        .map(|name| instance.validate_root_type(kind, name))
                        .transpose()?
                }
                None => instance
                    .definitions
                    .get(kind.default_type_name())
                    .filter(|definition| matches!(definition, TypeDefinition::Object(_)))
                    .map(|definition| definition.name().to_string()),
            };

            trace!("root {} type resolved to {:?}", kind, root_type_name);

            match kind {
                OperationKind::Query => instance.query_type = root_type_name,
                OperationKind::Mutation => instance.mutation_type = root_type_name,
                OperationKind::Subscription => instance.subscription_type = root_type_name,
            }
        }

        Ok(instance)
    }

    fn validate_root_type(
        &self,
        kind: OperationKind,
        type_name: &str,
    ) -> Result<String, SchemaBuildError> {
        match self.definitions.get(type_name) {
            Some(TypeDefinition::Object(object_type)) => Ok(object_type.name.to_string()),
            Some(_) => Err(SchemaBuildError::InvalidRootType(
                kind,
                type_name.to_string(),
            )),
            None => Err(SchemaBuildError::UnknownRootType(
                kind,
                type_name.to_string(),
            )),
        }
    }

    fn build_map(schema: &SchemaDocument<'_>) -> Result<DefinitionMap, SchemaBuildError> {
        let mut definitions = DefinitionMap::new();

        for builtin in BUILTIN_SCALARS {
            definitions.insert(
                builtin.to_string(),
                TypeDefinition::Scalar(ScalarType {
                    name: builtin.to_string(),
                }),
            );
        }

        for definition in schema.definitions.iter() {
            let built = match definition {
                input::Definition::TypeDefinition(type_definition) => {
                    Self::build_type_definition(type_definition)
                }
                _ => None,
            };

            let Some(built) = built else {
                continue;
            };

            match definitions.get(built.name()) {
                // Re-declaring a built-in scalar is tolerated.
                Some(TypeDefinition::Scalar(_))
                    if matches!(built, TypeDefinition::Scalar(_))
                        && BUILTIN_SCALARS.contains(&built.name()) =>
                {
                    continue;
                }
                Some(_) => return Err(SchemaBuildError::DuplicateType(built.name().to_string())),
                None => {
                    definitions.insert(built.name().to_string(), built);
                }
            }
        }

        Ok(definitions)
    }

    fn build_type_definition(
        type_definition: &input::TypeDefinition<'_, String>,
    ) -> Option<TypeDefinition> {
        match type_definition {
            input::TypeDefinition::Scalar(scalar_type) => {
                Some(TypeDefinition::Scalar(ScalarType {
                    name: scalar_type.name.to_string(),
                }))
            }
            input::TypeDefinition::Enum(enum_type) => Some(TypeDefinition::Enum(EnumType {
                name: enum_type.name.to_string(),
            })),
            input::TypeDefinition::Object(object_type) => {
                Some(TypeDefinition::Object(ObjectType {
                    name: object_type.name.to_string(),
                    fields: Self::build_fields(&object_type.fields),
                    implements_interfaces: object_type.implements_interfaces.clone(),
                }))
            }
            input::TypeDefinition::Interface(interface_type) => {
                Some(TypeDefinition::Interface(InterfaceType {
                    name: interface_type.name.to_string(),
                    fields: Self::build_fields(&interface_type.fields),
                }))
            }
            input::TypeDefinition::Union(union_type) => Some(TypeDefinition::Union(UnionType {
                name: union_type.name.to_string(),
                types: union_type.types.clone(),
            })),
            // Input objects only appear as argument types, which are rendered verbatim.
            input::TypeDefinition::InputObject(_) => None,
        }
    }

    fn apply_extension(
        definitions: &mut DefinitionMap,
        extension: &input::TypeExtension<'_, String>,
    ) -> Result<(), SchemaBuildError> {
        let (type_name, kind) = match extension {
            input::TypeExtension::Object(ext) => (&ext.name, TypeKind::Object),
            input::TypeExtension::Interface(ext) => (&ext.name, TypeKind::Interface),
            input::TypeExtension::Union(ext) => (&ext.name, TypeKind::Union),
            input::TypeExtension::Enum(ext) => (&ext.name, TypeKind::Enum),
            input::TypeExtension::Scalar(_) | input::TypeExtension::InputObject(_) => {
                return Ok(())
            }
        };

        let definition = definitions
            .get_mut(type_name.as_str())
            .ok_or_else(|| SchemaBuildError::UnknownExtendedType(type_name.to_string()))?;

        match (definition, extension) {
            (TypeDefinition::Object(object_type), input::TypeExtension::Object(ext)) => {
                Self::extend_fields(&object_type.name, &mut object_type.fields, &ext.fields)?;
                object_type
                    .implements_interfaces
                    .extend(ext.implements_interfaces.iter().cloned());
            }
            (TypeDefinition::Interface(interface_type), input::TypeExtension::Interface(ext)) => {
                Self::extend_fields(
                    &interface_type.name,
                    &mut interface_type.fields,
                    &ext.fields,
                )?;
            }
            (TypeDefinition::Union(union_type), input::TypeExtension::Union(ext)) => {
                union_type.types.extend(ext.types.iter().cloned());
            }
            // Enum values are never selected, only the extension kind is checked.
            (TypeDefinition::Enum(_), input::TypeExtension::Enum(_)) => {}
            _ => {
                return Err(SchemaBuildError::ExtensionKindMismatch(
                    type_name.to_string(),
                    kind,
                ))
            }
        }

        Ok(())
    }

    fn extend_fields(
        type_name: &str,
        fields: &mut FieldMap,
        extension_fields: &[input::Field<'_, String>],
    ) -> Result<(), SchemaBuildError> {
        for (field_name, field) in Self::build_fields(extension_fields) {
            if fields.contains_key(&field_name) {
                return Err(SchemaBuildError::DuplicateField(type_name.to_string(), field_name));
            }

            trace!("extending type '{}' with field '{}'", type_name, field_name);
            fields.insert(field_name, field);
        }

        Ok(())
    }

    fn build_fields(fields: &[input::Field<'_, String>]) -> FieldMap {
        fields
            .iter()
            .map(|field| {
                (
                    field.name.to_string(),
                    FieldDefinition {
                        name: field.name.to_string(),
                        field_type: (&field.field_type).into(),
                        arguments: field
                            .arguments
                            .iter()
                            .map(|argument| ArgumentDefinition {
                                name: argument.name.to_string(),
                                value_type: (&argument.value_type).into(),
                                deprecated: Self::is_deprecated(&argument.directives),
                            })
                            .collect(),
                        deprecated: Self::is_deprecated(&field.directives),
                    },
                )
            })
            .collect()
    }

    fn is_deprecated(directives: &[input::Directive<'_, String>]) -> bool {
        directives
            .iter()
            .any(|directive| directive.name == DEPRECATED_DIRECTIVE)
    }
}
