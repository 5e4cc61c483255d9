use std::error::Error;

use gql_generator_config::GeneratorConfig;

use crate::{
    schema::{OperationKind, SchemaModel},
    tests::testkit::{generate_document, init_logger, parse_schema},
};

fn blog_schema() -> SchemaModel {
    parse_schema(
        r#"
        type Query {
          user: User
        }

        type User {
          name: String
          posts: [Post]
          profile: Profile
        }

        type Post {
          title: String
          comments: [Comment]
        }

        type Comment {
          body: String
        }

        type Profile {
          bio: String
        }
        "#,
    )
}

#[test]
fn scalars_below_the_limit_are_kept() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = blog_schema();
    let config = GeneratorConfig {
        depth_limit: 1,
        ..Default::default()
    };

    let document = generate_document(&schema, &config, OperationKind::Query, "user")?;

    insta::assert_snapshot!(document, @r"
    query user{
      user{
        name
      }
    }
    ");

    Ok(())
}

#[test]
fn type_override_tightens_one_type() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = blog_schema();
    let mut config = GeneratorConfig::default();
    config.type_depth_overrides.insert("Comment".to_string(), 2);

    let document = generate_document(&schema, &config, OperationKind::Query, "user")?;

    insta::assert_snapshot!(document, @r"
    query user{
      user{
        name
        posts{
          title
        }
        profile{
          bio
        }
      }
    }
    ");

    Ok(())
}

#[test]
fn type_override_never_loosens_global_limit() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = blog_schema();
    let mut config = GeneratorConfig {
        depth_limit: 1,
        ..Default::default()
    };
    config.type_depth_overrides.insert("Post".to_string(), 5);

    let document = generate_document(&schema, &config, OperationKind::Query, "user")?;

    assert_eq!(document, "query user{\n  user{\n    name\n  }\n}");

    Ok(())
}

#[test]
fn nesting_never_exceeds_the_limit() -> Result<(), Box<dyn Error>> {
    init_logger();
    let schema = blog_schema();

    for depth_limit in 1..=4 {
        let config = GeneratorConfig {
            depth_limit,
            ..Default::default()
        };
        let document = generate_document(&schema, &config, OperationKind::Query, "user")?;

        // Every opened selection set is a composite field, so at most `depth_limit` of them nest.
        let mut open_sets = 0usize;
        let mut deepest = 0usize;
        for character in document.chars() {
            match character {
                '{' => {
                    open_sets += 1;
                    deepest = deepest.max(open_sets);
                }
                '}' => open_sets -= 1,
                _ => {}
            }
        }

        // The operation body adds one level on top of the fields.
        assert!(
            deepest <= depth_limit + 1,
            "depth limit {} produced {} nested sets:\n{}",
            depth_limit,
            deepest,
            document
        );
    }

    Ok(())
}
