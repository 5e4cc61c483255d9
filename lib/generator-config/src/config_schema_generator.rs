use gql_generator_config::AppConfig;

fn main() {
    let schema = schemars::schema_for!(AppConfig);

    match serde_json::to_string_pretty(&schema) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize the configuration schema: {}", e);
            std::process::exit(1);
        }
    }
}
