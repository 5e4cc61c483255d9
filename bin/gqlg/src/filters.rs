use std::fmt::Display;
use std::str::FromStr;

use gql_generator_core::{FieldCandidate, FieldFilter};

/// A `Type.field` reference given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCoordinate {
    pub type_name: String,
    pub field_name: String,
}

impl FromStr for FieldCoordinate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((type_name, field_name))
                if !type_name.is_empty() && !field_name.is_empty() && !field_name.contains('.') =>
            {
                Ok(FieldCoordinate {
                    type_name: type_name.to_string(),
                    field_name: field_name.to_string(),
                })
            }
            _ => Err(format!("Expected a field coordinate like 'User.email', got '{}'", s)),
        }
    }
}

impl Display for FieldCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

/// Drops the listed fields wherever they are reached. A coordinate naming a union or an
/// interface drops the field from every branch selected under it.
pub struct ExcludedFields {
    coordinates: Vec<FieldCoordinate>,
}

impl ExcludedFields {
    pub fn new(coordinates: Vec<FieldCoordinate>) -> Self {
        Self { coordinates }
    }
}

impl FieldFilter for ExcludedFields {
    fn include(&self, candidate: &FieldCandidate<'_>) -> bool {
        !self.coordinates.iter().any(|coordinate| {
            coordinate.field_name == candidate.field.name
                && (coordinate.type_name == candidate.parent_type.name()
                    || candidate
                        .enclosing_type
                        .is_some_and(|enclosing| coordinate.type_name == enclosing.name()))
        })
    }
}
