use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

use gql_generator_config::GeneratorConfig;

use crate::{
    schema::{OperationKind, SchemaModel},
    tests::testkit::{generate_document, generate_report, init_logger, parse_schema, read_schema},
};

fn leaf_overrides(entries: &[(&str, &[&str])]) -> BTreeMap<String, BTreeSet<String>> {
    entries
        .iter()
        .map(|(type_name, fields)| {
            (
                type_name.to_string(),
                fields.iter().map(|field| field.to_string()).collect(),
            )
        })
        .collect()
}

fn directory_schema() -> SchemaModel {
    parse_schema(
        r#"
        type Query {
          user: User
          users: [User]
        }

        type User {
          id: ID
          name: String
          email: String
          best: User
        }
        "#,
    )
}

#[test]
fn restricted_type_selects_listed_fields_only() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = directory_schema();
    let config = GeneratorConfig {
        leaf_overrides: leaf_overrides(&[("User", &["id", "best"])]),
        ..Default::default()
    };

    let document = generate_document(&schema, &config, OperationKind::Query, "user")?;

    insta::assert_snapshot!(document, @r"
    query user{
      user{
        id
        best{
          id
          best{
            id
          }
        }
      }
    }
    ");

    Ok(())
}

#[test]
fn root_type_is_never_restricted() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = directory_schema();
    let config = GeneratorConfig {
        leaf_overrides: leaf_overrides(&[("Query", &["users"])]),
        ..Default::default()
    };

    let report = generate_report(&schema, &config)?;

    assert!(report.document(OperationKind::Query, "user").is_some());
    assert!(report.document(OperationKind::Query, "users").is_some());

    Ok(())
}

#[test]
fn union_and_member_restrictions_both_apply() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = read_schema("fixture/tests/search.graphql");
    let config = GeneratorConfig {
        leaf_overrides: leaf_overrides(&[
            ("SearchResult", &["title", "name"]),
            ("Movie", &["director"]),
        ]),
        ..Default::default()
    };

    let document = generate_document(&schema, &config, OperationKind::Query, "search")?;

    insta::assert_snapshot!(document, @r"
    query search($term: String!){
      search(term: $term){
        __typename
        ... on Book {
          title
        }
        ... on Author {
          name
        }
      }
    }
    ");

    Ok(())
}
