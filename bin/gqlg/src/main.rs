mod cli;
mod error;
mod filters;
mod logger;
mod output;

use std::process::ExitCode;

use clap::Parser;
use gql_generator_config::AppConfig;
use gql_generator_core::{generate_documents, GenerationReport, SchemaModel};
use tracing::{error, info};

use crate::{
    cli::CommandLineInterface, error::CliError, filters::ExcludedFields, logger::configure_logging,
    output::DocumentWriter,
};

fn main() -> ExitCode {
    let cli = CommandLineInterface::parse();
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("[gqlg error]: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = configure_logging(&config.log) {
        eprintln!("[gqlg error]: {}", err);
        return ExitCode::FAILURE;
    }

    exit_code(&run(&cli, &config))
}

fn exit_code(outcome: &Result<GenerationReport, CliError>) -> ExitCode {
    match outcome {
        Ok(report) if !report.has_failures() => ExitCode::SUCCESS,
        Ok(report) => {
            error!(
                "{} document(s) could not be generated",
                report.failures.len()
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

/// Every document of the report, separated by a blank line.
fn render_documents(report: &GenerationReport) -> String {
    report
        .documents
        .iter()
        .map(|document| document.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn run(cli: &CommandLineInterface, config: &AppConfig) -> Result<GenerationReport, CliError> {
    let schema_path = config
        .schema_path
        .as_deref()
        .map(|path| config.resolve_path(path))
        .ok_or(CliError::MissingSchemaPath)?;

    let sdl = std::fs::read_to_string(&schema_path).map_err(|source| CliError::SchemaReadError {
        path: schema_path.clone(),
        source,
    })?;
    let schema = SchemaModel::parse(&sdl)?;
    info!("loaded schema from {}", schema_path.display());

    let filter = ExcludedFields::new(cli.exclude.clone());
    let report = generate_documents(&schema, &config.generator, &filter)?;

    if cli.stdout {
        println!("{}", render_documents(&report));
    } else {
        let dest_dir = config.resolve_path(&config.output.dest_dir);
        let writer = DocumentWriter::new(dest_dir.clone(), config.output.path_template.clone())?;

        for document in report.documents.iter() {
            writer.write(document)?;
        }

        info!(
            "wrote {} document(s) to {}",
            report.documents.len(),
            dest_dir.display()
        );
    }

    Ok(report)
}
