use tracing::debug;

use super::SelectionSetBuilder;
use crate::{
    context::TraversalContext,
    schema::{SchemaLookupError, TypeDefinition, UnionType},
    utils::{get_indent, TYPENAME_FIELD},
};

impl<'s> SelectionSetBuilder<'s> {
    /// One inline fragment per member of the union, in declaration order.
    ///
    /// Members are nested one level deeper than object fields (`depth + 2`) to make room for
    /// the `... on Member` wrapper. A branch without any selectable field is elided, while the
    /// `__typename` discriminator (when enabled) is always kept, so a union whose branches are
    /// all empty still renders as a valid selection.
    pub(crate) fn expand_union(
        &self,
        union_type: &'s UnionType,
        union_definition: &'s TypeDefinition,
        parent_field_name: &'s str,
        context: &mut TraversalContext<'s>,
        depth: usize,
    ) -> Result<Vec<String>, SchemaLookupError> {
        let mut lines = Vec::new();

        if self.config.emit_union_discriminator {
            lines.push(format!("{}{}", get_indent(depth + 1), TYPENAME_FIELD));
        }

        for member_name in union_type.types.iter() {
            let member = self.schema.type_by_name(member_name)?;
            let member_fields = member.fields().ok_or_else(|| {
                SchemaLookupError::NotComposite(member.name().to_string(), member.kind())
            })?;

            let branch = self.build_fields_of(
                member,
                member_fields.keys(),
                parent_field_name,
                Some(union_definition),
                context,
                depth + 2,
            )?;

            if branch.is_empty() {
                debug!(
                    "eliding empty branch '{}' of union '{}'",
                    member_name, union_type.name
                );
                continue;
            }

            lines.push(render_inline_fragment(member.name(), &branch, depth + 1));
        }

        Ok(lines)
    }

    /// The interface's own fields, plus a branch per implementation when interfaces are expanded.
    /// Branches only select what the interface does not already declare.
    pub(crate) fn expand_interface(
        &self,
        interface_definition: &'s TypeDefinition,
        parent_field_name: &'s str,
        context: &mut TraversalContext<'s>,
        depth: usize,
    ) -> Result<Vec<String>, SchemaLookupError> {
        let interface_fields = interface_definition.fields().ok_or_else(|| {
            SchemaLookupError::NotComposite(
                interface_definition.name().to_string(),
                interface_definition.kind(),
            )
        })?;

        let mut lines = self.build_fields_of(
            interface_definition,
            interface_fields.keys(),
            parent_field_name,
            None,
            context,
            depth + 1,
        )?;

        if !self.config.expand_interfaces {
            return Ok(lines);
        }

        let mut fragments = Vec::new();

        for implementation in self.schema.implementations_of(interface_definition.name()) {
            let own_fields = implementation
                .fields()
                .into_iter()
                .flat_map(|fields| fields.keys())
                .filter(|field_name| !interface_fields.contains_key(field_name.as_str()));

            let branch = self.build_fields_of(
                implementation,
                own_fields,
                parent_field_name,
                Some(interface_definition),
                context,
                depth + 2,
            )?;

            if branch.is_empty() {
                debug!(
                    "eliding empty branch '{}' of interface '{}'",
                    implementation.name(),
                    interface_definition.name()
                );
                continue;
            }

            fragments.push(render_inline_fragment(
                implementation.name(),
                &branch,
                depth + 1,
            ));
        }

        if fragments.is_empty() {
            return Ok(lines);
        }

        if self.config.emit_union_discriminator {
            lines.insert(0, format!("{}{}", get_indent(depth + 1), TYPENAME_FIELD));
        }
        lines.extend(fragments);

        Ok(lines)
    }
}

fn render_inline_fragment(type_name: &str, lines: &[String], depth: usize) -> String {
    let indent = get_indent(depth);

    format!(
        "{}... on {} {{\n{}\n{}}}",
        indent,
        type_name,
        lines.join("\n"),
        indent
    )
}
