use std::fmt::Display;

use crate::{context::VariableMap, schema::OperationKind, selection::SelectionResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub type_signature: String,
}

impl Display for VariableDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}: {}", self.name, self.type_signature)
    }
}

pub fn collect_variable_definitions(variables: &VariableMap<'_>) -> Vec<VariableDefinition> {
    variables
        .iter()
        .map(|(name, argument)| VariableDefinition {
            name: name.clone(),
            type_signature: argument.value_type.to_string(),
        })
        .collect()
}

/// Wraps the selection of a root field in an operation header declaring its variables,
/// in the order they were discovered. Without variables, the parentheses are left out.
pub fn assemble_document(
    operation_kind: OperationKind,
    root_field_name: &str,
    selection: &SelectionResult,
    variables: &[VariableDefinition],
) -> String {
    let signature = if variables.is_empty() {
        String::new()
    } else {
        format!(
            "({})",
            variables
                .iter()
                .map(|variable| variable.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    format!(
        "{} {}{}{{\n{}\n}}",
        operation_kind, root_field_name, signature, selection.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_empty_variable_list() {
        let selection = SelectionResult {
            text: "  ping".to_string(),
            contributes_variables: false,
        };

        insta::assert_snapshot!(assemble_document(OperationKind::Query, "ping", &selection, &[]), @r"
        query ping{
          ping
        }
        ");
    }

    #[test]
    fn declares_variables_in_order() {
        let selection = SelectionResult {
            text: "  createPost(title: $title, tags: $tags)".to_string(),
            contributes_variables: true,
        };
        let variables = vec![
            VariableDefinition {
                name: "title".to_string(),
                type_signature: "String!".to_string(),
            },
            VariableDefinition {
                name: "tags".to_string(),
                type_signature: "[String!]".to_string(),
            },
        ];

        insta::assert_snapshot!(
            assemble_document(OperationKind::Mutation, "createPost", &selection, &variables),
            @r"
        mutation createPost($title: String!, $tags: [String!]){
          createPost(title: $title, tags: $tags)
        }
        "
        );
    }
}
