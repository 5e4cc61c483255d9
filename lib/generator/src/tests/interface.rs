use std::error::Error;

use gql_generator_config::GeneratorConfig;

use crate::{
    schema::OperationKind,
    tests::testkit::{generate_document, init_logger, read_schema},
};

#[test]
fn interface_selects_its_own_fields() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = read_schema("fixture/tests/nodes.graphql");

    let document = generate_document(
        &schema,
        &GeneratorConfig::default(),
        OperationKind::Query,
        "node",
    )?;

    insta::assert_snapshot!(document, @r"
    query node($id: ID!){
      node(id: $id){
        id
      }
    }
    ");

    Ok(())
}

#[test]
fn expanded_interface_adds_implementation_branches() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = read_schema("fixture/tests/nodes.graphql");
    let config = GeneratorConfig {
        expand_interfaces: true,
        ..Default::default()
    };

    let document = generate_document(&schema, &config, OperationKind::Query, "node")?;

    // `Tag` declares nothing beyond `Node`, so its branch is elided.
    insta::assert_snapshot!(document, @r"
    query node($id: ID!){
      node(id: $id){
        __typename
        id
        ... on User {
          name
        }
        ... on Post {
          title
        }
      }
    }
    ");

    Ok(())
}
