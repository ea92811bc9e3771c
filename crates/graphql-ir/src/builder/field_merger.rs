use crate::ast;
use crate::builder::build_pass::BuildPass;
use crate::builder::build_pass::SelectionSite;
use crate::builder::directives;
use crate::builder::directives::Inclusion;
use crate::builder::fragment_splitter::SplitSite;
use crate::builder::generic_fragment;
use crate::builder::naming;
use crate::builder::IrBuildError;
use crate::ir::Field;
use crate::ir::Fragment;
use crate::ir::FragmentInterface;
use crate::ir::SelectionKey;
use crate::loc;
use crate::types::TypeAnnotation;
use indexmap::map::Entry;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::path::Path;

type Result<T> = std::result::Result<T, IrBuildError>;

impl<'a> BuildPass<'a> {
    /// Merge sibling field selections into one [`Field`] per response name,
    /// in order of each response name's first occurrence.
    ///
    /// Selections ruled out by a literal `@skip`/`@include` are dropped
    /// before merging; a response name left with no selections produces no
    /// field at all.
    pub(crate) fn merge_field_selections(
        &self,
        selections: &[&ast::operation::Field],
        parent_type: &str,
        parent_keys: &IndexSet<SelectionKey>,
        file_path: Option<&Path>,
    ) -> Result<Vec<Field>> {
        let mut groups: IndexMap<&str, Vec<&ast::operation::Field>> = IndexMap::new();
        for selection in selections {
            let response_name = selection.alias.as_deref()
                .unwrap_or(selection.name.as_str());
            groups.entry(response_name).or_default().push(*selection);
        }

        let mut fields = vec![];
        for (response_name, group) in groups {
            if let Some(field) = self.merge_field_group(
                response_name,
                &group,
                parent_type,
                parent_keys,
                file_path,
            )? {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    fn merge_field_group(
        &self,
        response_name: &str,
        group: &[&ast::operation::Field],
        parent_type: &str,
        parent_keys: &IndexSet<SelectionKey>,
        file_path: Option<&Path>,
    ) -> Result<Option<Field>> {
        let mut conditions = vec![];
        let mut included = vec![];
        for selection in group {
            let location = loc::SourceLocation::from_execdoc_ast_position(
                file_path,
                &selection.position,
            );
            match directives::inclusion(&selection.directives, &location)? {
                Inclusion::Never => (),
                Inclusion::When(selection_conditions) => {
                    directives::extend_conditions(&mut conditions, selection_conditions);
                    included.push(*selection);
                },
            }
        }

        let Some(first) = included.first() else {
            log::trace!(
                "Dropping `{parent_type}.{response_name}`: every selection is \
                excluded by a literal condition",
            );
            return Ok(None);
        };

        let def_location = loc::SourceLocation::from_execdoc_ast_position(
            file_path,
            &first.position,
        );
        let field_def = self.schema.field_definition(parent_type, &first.name)
            .ok_or_else(|| IrBuildError::UndefinedField {
                field_name: first.name.to_owned(),
                location: def_location.to_owned(),
                type_name: parent_type.to_string(),
            })?;

        // Validation guarantees every selection of one response name carries
        // the same arguments, so the first one speaks for the group.
        let arguments = self.coerce_arguments(first, field_def, &def_location)?;
        let type_annotation = TypeAnnotation::from_ast_type(&field_def.field_type);

        let model_name = naming::capitalize(response_name);
        let selection_keys: IndexSet<SelectionKey> = parent_keys.iter()
            .map(|key| key.with_segment(model_name.as_str()))
            .collect();

        let sub_selections: Vec<&ast::operation::Selection> = included.iter()
            .flat_map(|selection| selection.selection_set.items.iter())
            .collect();
        let (fields, fragments) = if sub_selections.is_empty() {
            (vec![], vec![])
        } else {
            self.build_selections(&sub_selections, &SelectionSite {
                file_path,
                implementation_suffix: model_name.as_str(),
                parent_type: type_annotation.innermost_type_name(),
                selection_keys: &selection_keys,
            })?
        };

        Ok(Some(Field {
            alias: first.alias.to_owned(),
            arguments,
            conditions,
            def_location,
            deprecation_reason: self.schema.deprecation_reason(field_def),
            description: field_def.description.to_owned(),
            fields,
            fragments,
            name: first.name.to_owned(),
            selection_keys,
            type_annotation,
        }))
    }

    /// Merge already-built fields by response name, in order of each
    /// response name's first occurrence.
    ///
    /// Merging unions keys and conditions, merges child fields and
    /// interfaces recursively and recomputes implementations from the
    /// merged result.
    pub(crate) fn merge_fields(&self, fields: impl IntoIterator<Item = Field>) -> Vec<Field> {
        let mut merged: IndexMap<String, Field> = IndexMap::new();
        for field in fields {
            match merged.entry(field.response_name().to_string()) {
                Entry::Occupied(mut entry) => {
                    let merged_field = self.merge_field_pair(entry.get(), field);
                    entry.insert(merged_field);
                },
                Entry::Vacant(entry) => {
                    entry.insert(field);
                },
            }
        }
        merged.into_values().collect()
    }

    fn merge_field_pair(&self, first: &Field, second: Field) -> Field {
        let Field {
            conditions: second_conditions,
            fields: second_fields,
            fragments: second_fragments,
            selection_keys: second_keys,
            ..
        } = second;

        let mut selection_keys = first.selection_keys.to_owned();
        selection_keys.extend(second_keys);

        let mut conditions = first.conditions.to_owned();
        directives::extend_conditions(&mut conditions, second_conditions);

        let fields = self.merge_fields(
            first.fields.iter().cloned().chain(second_fields)
        );

        let interfaces = self.merge_interfaces(
            first.fragments.iter().cloned()
                .chain(second_fragments)
                .filter_map(|fragment| match fragment {
                    Fragment::Interface(interface) => Some(interface),
                    Fragment::Implementation(_) => None,
                })
        );

        // Each copy's interfaces only inherited that copy's fields. Every
        // interface must cover the whole merged selection.
        let interfaces: Vec<FragmentInterface> = interfaces.into_iter()
            .map(|mut interface| {
                let rebased_keys = generic_fragment::rebase_keys(
                    &selection_keys,
                    &interface.type_condition,
                );
                let own_fields = std::mem::take(&mut interface.fields);
                interface.fields = self.merge_fields(
                    generic_fragment::inherit_fields(&fields, &rebased_keys).chain(own_fields)
                );
                interface
            })
            .collect();

        let implementation_suffix = naming::capitalize(first.response_name());
        let fragments = self.assemble_fragments(interfaces, &SplitSite {
            fields: &fields,
            implementation_suffix: implementation_suffix.as_str(),
            possible_types: self.schema.possible_types(
                first.type_annotation.innermost_type_name(),
            ),
            selection_keys: &selection_keys,
        });

        Field {
            alias: first.alias.to_owned(),
            arguments: first.arguments.to_owned(),
            conditions,
            def_location: first.def_location.to_owned(),
            deprecation_reason: first.deprecation_reason.to_owned(),
            description: first.description.to_owned(),
            fields,
            fragments,
            name: first.name.to_owned(),
            selection_keys,
            type_annotation: first.type_annotation.to_owned(),
        }
    }
}
