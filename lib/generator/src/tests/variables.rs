use std::collections::HashSet;
use std::error::Error;

use gql_generator_config::{CrossReferencePolicy, GeneratorConfig};
use pretty_assertions::assert_eq;

use crate::{
    context::TraversalContext,
    filter::IncludeAllFields,
    schema::{OperationKind, SchemaModel},
    selection::SelectionSetBuilder,
    tests::testkit::{generate_document, generate_report, init_logger, parse_schema, read_schema},
};

fn paginated_schema() -> SchemaModel {
    parse_schema(
        r#"
        type Query {
          user(id: ID!): User
        }

        type User {
          id: ID!
          posts(first: Int, after: String): [Post!]!
        }

        type Post {
          title: String
          comments(first: Int): [Comment!]!
        }

        type Comment {
          body: String
        }
        "#,
    )
}

#[test]
fn colliding_argument_names_get_suffixes() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = paginated_schema();

    let document = generate_document(
        &schema,
        &GeneratorConfig::default(),
        OperationKind::Query,
        "user",
    )?;

    insta::assert_snapshot!(document, @r"
    query user($first: Int, $first1: Int, $after: String, $id: ID!){
      user(id: $id){
        id
        posts(first: $first1, after: $after){
          title
          comments(first: $first){
            body
          }
        }
      }
    }
    ");

    Ok(())
}

#[test]
fn arguments_below_variables_depth_limit_are_dropped() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = paginated_schema();
    let config = GeneratorConfig {
        variables_depth_limit: Some(1),
        ..Default::default()
    };

    let document = generate_document(&schema, &config, OperationKind::Query, "user")?;

    insta::assert_snapshot!(document, @r"
    query user($id: ID!){
      user(id: $id){
        id
        posts{
          title
          comments{
            body
          }
        }
      }
    }
    ");

    Ok(())
}

#[test]
fn repeated_occurrences_bind_fresh_variables() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = parse_schema(
        r#"
        type Query {
          user(id: ID!): User
        }

        type User {
          id: ID!
          friend(id: ID): User
        }
        "#,
    );
    let config = GeneratorConfig {
        depth_limit: 4,
        cross_reference_policy: CrossReferencePolicy::AllowRepeats,
        ..Default::default()
    };

    let document = generate_document(&schema, &config, OperationKind::Query, "user")?;

    insta::assert_snapshot!(document, @r"
    query user($id: ID, $id1: ID, $id2: ID, $id3: ID!){
      user(id: $id3){
        id
        friend(id: $id2){
          id
          friend(id: $id1){
            id
            friend(id: $id){
              id
            }
          }
        }
      }
    }
    ");

    Ok(())
}

#[test]
fn declared_variables_match_used_variables() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = read_schema("fixture/tests/social.graphql");
    let report = generate_report(&schema, &GeneratorConfig::default())?;

    assert!(!report.documents.is_empty());

    for document in report.documents.iter() {
        let declared = document
            .variables
            .iter()
            .map(|variable| variable.name.clone())
            .collect::<Vec<_>>();
        let unique = declared.iter().cloned().collect::<HashSet<_>>();
        assert_eq!(declared.len(), unique.len(), "{}", document.text);

        let body = document
            .text
            .split_once('\n')
            .map(|(_, body)| body)
            .unwrap_or_default();
        let used = body
            .split('$')
            .skip(1)
            .map(|token| {
                token
                    .chars()
                    .take_while(|character| character.is_alphanumeric() || *character == '_')
                    .collect::<String>()
            })
            .collect::<HashSet<_>>();

        assert_eq!(unique, used, "{}", document.text);
    }

    Ok(())
}

#[test]
fn builder_reports_contributed_variables() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = read_schema("fixture/tests/users.graphql");
    let config = GeneratorConfig::default();
    let query_type = schema
        .root_type(OperationKind::Query)
        .ok_or("missing query type")?;
    let builder = SelectionSetBuilder::new(
        &schema,
        &config,
        &IncludeAllFields,
        OperationKind::Query,
        "user",
    );
    let mut context = TraversalContext::new();

    let user = builder.build("user", query_type, None, &mut context, 1)?;
    assert!(user.contributes_variables);
    assert_eq!(context.variables().keys().collect::<Vec<_>>(), vec!["id"]);

    let friend = builder.build(
        "friend",
        schema.type_by_name("User")?,
        Some("user"),
        &mut context,
        2,
    )?;
    assert!(!friend.contributes_variables);
    assert!(context.path().is_empty());

    Ok(())
}
