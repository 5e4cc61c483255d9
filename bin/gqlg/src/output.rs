use std::fs;
use std::path::{Path, PathBuf};

use gql_generator_core::GeneratedDocument;
use tracing::debug;

use crate::error::CliError;

/// Writes every document to `dest_dir`, at the path computed from the path template.
pub struct DocumentWriter {
    dest_dir: PathBuf,
    path_template: String,
}

impl DocumentWriter {
    pub fn new(dest_dir: PathBuf, path_template: String) -> Result<Self, CliError> {
        parse_template(&path_template)?;

        Ok(Self {
            dest_dir,
            path_template,
        })
    }

    pub fn destination(&self, document: &GeneratedDocument) -> Result<PathBuf, CliError> {
        Ok(self
            .dest_dir
            .join(render_path_template(&self.path_template, document)?))
    }

    pub fn write(&self, document: &GeneratedDocument) -> Result<PathBuf, CliError> {
        let path = self.destination(document)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| write_error(parent, source))?;
        }
        fs::write(&path, format!("{}\n", document.text))
            .map_err(|source| write_error(&path, source))?;
        debug!(
            "wrote {} '{}' to {}",
            document.operation_kind,
            document.field_name,
            path.display()
        );

        Ok(path)
    }
}

fn write_error(path: &Path, source: std::io::Error) -> CliError {
    CliError::DocumentWriteError {
        path: path.to_path_buf(),
        source,
    }
}

enum Segment<'t> {
    Literal(&'t str),
    Placeholder(Placeholder),
}

#[derive(Clone, Copy)]
enum Placeholder {
    Kind,
    KindTypeName,
    Field,
    ReturnType,
}

fn parse_template(template: &str) -> Result<Vec<Segment<'_>>, CliError> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        if start > 0 {
            segments.push(Segment::Literal(&rest[..start]));
        }

        let after_brace = &rest[start + 1..];
        let end = after_brace
            .find('}')
            .ok_or_else(|| CliError::UnclosedPlaceholder(template.to_string()))?;

        let placeholder = match &after_brace[..end] {
            "kind" => Placeholder::Kind,
            "Kind" => Placeholder::KindTypeName,
            "field" => Placeholder::Field,
            "type" => Placeholder::ReturnType,
            other => {
                return Err(CliError::InvalidPathTemplate(
                    template.to_string(),
                    other.to_string(),
                ))
            }
        };
        segments.push(Segment::Placeholder(placeholder));
        rest = &after_brace[end + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }

    Ok(segments)
}

pub fn render_path_template(
    template: &str,
    document: &GeneratedDocument,
) -> Result<String, CliError> {
    let rendered = parse_template(template)?
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Placeholder(Placeholder::Kind) => document.operation_kind.as_str(),
            Segment::Placeholder(Placeholder::KindTypeName) => {
                document.operation_kind.default_type_name()
            }
            Segment::Placeholder(Placeholder::Field) => document.field_name.as_str(),
            Segment::Placeholder(Placeholder::ReturnType) => document.return_type_name.as_str(),
        })
        .collect::<String>();

    Ok(rendered)
}
