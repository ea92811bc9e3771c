use crate::ast;
use crate::builder::build_pass::BuildPass;
use crate::builder::directives;
use crate::builder::directives::Inclusion;
use crate::builder::naming;
use crate::builder::IrBuildError;
use crate::ir::Condition;
use crate::ir::Field;
use crate::ir::SelectionKey;
use crate::ir::SelectionKeyType;
use crate::loc;
use indexmap::IndexSet;
use std::path::Path;

type Result<T> = std::result::Result<T, IrBuildError>;

/// A type-conditioned selection (inline fragment or fragment spread) before
/// it is split into interfaces and implementations.
///
/// `fields` always includes the fields of the enclosing selection, so each
/// generic fragment describes everything selected on objects matching its
/// type condition.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GenericFragment {
    pub(crate) conditions: Vec<Condition>,
    pub(crate) fields: Vec<Field>,
    pub(crate) fragment_name: Option<String>,
    pub(crate) nested_fragments: Vec<GenericFragment>,
    pub(crate) possible_types: IndexSet<String>,
    pub(crate) selection_keys: IndexSet<SelectionKey>,
    pub(crate) type_condition: String,
}
impl GenericFragment {
    /// This fragment followed by all of its (transitively) nested fragments,
    /// pre-order.
    pub(crate) fn flatten(mut self) -> Vec<GenericFragment> {
        let nested_fragments = std::mem::take(&mut self.nested_fragments);
        let mut flattened = vec![self];
        for nested_fragment in nested_fragments {
            flattened.extend(nested_fragment.flatten());
        }
        flattened
    }
}

/// The selection a generic fragment is nested in.
pub(crate) struct FragmentParent<'p> {
    pub(crate) fields: &'p [Field],
    pub(crate) possible_types: &'p IndexSet<String>,
    pub(crate) selection_keys: &'p IndexSet<SelectionKey>,
    pub(crate) type_name: &'p str,
}

struct FragmentSource<'s> {
    conditions: Vec<Condition>,
    file_path: Option<&'s Path>,
    fragment_name: Option<&'s str>,
    location: loc::SourceLocation,
    selections: Vec<&'s ast::operation::Selection>,
    type_condition: &'s str,
}

impl<'a> BuildPass<'a> {
    /// Lower every inline fragment and fragment spread among `selections`,
    /// in document order. Field selections are skipped.
    pub(crate) fn build_generic_fragments(
        &self,
        selections: &[&ast::operation::Selection],
        parent: &FragmentParent<'_>,
        file_path: Option<&Path>,
    ) -> Result<Vec<GenericFragment>> {
        let mut generic_fragments = vec![];
        for selection in selections {
            let generic_fragment = match selection {
                ast::operation::Selection::Field(_) => continue,

                ast::operation::Selection::FragmentSpread(spread) =>
                    self.build_fragment_spread(spread, parent, file_path)?,

                ast::operation::Selection::InlineFragment(inline_fragment) =>
                    self.build_inline_fragment(inline_fragment, parent, file_path)?,
            };
            generic_fragments.extend(generic_fragment);
        }
        Ok(generic_fragments)
    }

    fn build_fragment_spread(
        &self,
        spread: &ast::operation::FragmentSpread,
        parent: &FragmentParent<'_>,
        file_path: Option<&Path>,
    ) -> Result<Option<GenericFragment>> {
        let location = loc::SourceLocation::from_execdoc_ast_position(
            file_path,
            &spread.position,
        );
        let Inclusion::When(conditions) = directives::inclusion(&spread.directives, &location)? else {
            return Ok(None);
        };

        let fragment = self.fragment_registry.get(&spread.fragment_name)
            .ok_or_else(|| IrBuildError::UndefinedFragment {
                fragment_name: spread.fragment_name.to_owned(),
                location: location.to_owned(),
            })?;

        self.build_generic_fragment(FragmentSource {
            conditions,
            file_path: fragment.file_path(),
            fragment_name: Some(fragment.name()),
            location: fragment.def_location(),
            selections: fragment.definition().selection_set.items.iter().collect(),
            type_condition: fragment.type_condition(),
        }, parent).map(Some)
    }

    fn build_inline_fragment(
        &self,
        inline_fragment: &ast::operation::InlineFragment,
        parent: &FragmentParent<'_>,
        file_path: Option<&Path>,
    ) -> Result<Option<GenericFragment>> {
        let location = loc::SourceLocation::from_execdoc_ast_position(
            file_path,
            &inline_fragment.position,
        );
        let Inclusion::When(conditions) = directives::inclusion(&inline_fragment.directives, &location)? else {
            return Ok(None);
        };

        // `... @include(if: $foo) { ... }` applies to the enclosing type.
        let type_condition = match &inline_fragment.type_condition {
            Some(ast::operation::TypeCondition::On(type_name)) => type_name.as_str(),
            None => parent.type_name,
        };

        self.build_generic_fragment(FragmentSource {
            conditions,
            file_path,
            fragment_name: None,
            location,
            selections: inline_fragment.selection_set.items.iter().collect(),
            type_condition,
        }, parent).map(Some)
    }

    fn build_generic_fragment(
        &self,
        source: FragmentSource<'_>,
        parent: &FragmentParent<'_>,
    ) -> Result<GenericFragment> {
        if self.schema.type_definition(source.type_condition).is_none() {
            return Err(IrBuildError::UndefinedType {
                location: source.location,
                type_name: source.type_condition.to_string(),
            });
        }

        // Each path the parent is reachable through extends by one segment
        // named after the type condition.
        let rebased_parent_keys = rebase_keys(parent.selection_keys, source.type_condition);

        let mut selection_keys: IndexSet<SelectionKey> = rebased_parent_keys.iter()
            .map(|(_, fragment_key)| fragment_key.to_owned())
            .collect();
        if let Some(fragment_name) = source.fragment_name {
            selection_keys.insert(SelectionKey::new(
                naming::capitalize(fragment_name),
                SelectionKeyType::Fragment,
            ));
        }

        let possible_types: IndexSet<String> = self.schema
            .possible_types(source.type_condition)
            .intersection(parent.possible_types)
            .cloned()
            .collect();

        let field_selections: Vec<&ast::operation::Field> = source.selections.iter()
            .filter_map(|selection| match selection {
                ast::operation::Selection::Field(field) => Some(field),
                _ => None,
            })
            .collect();
        let own_fields = self.merge_field_selections(
            &field_selections,
            source.type_condition,
            &selection_keys,
            source.file_path,
        )?;

        // The parent's fields are selected on this type too.
        let fields = self.merge_fields(
            inherit_fields(parent.fields, &rebased_parent_keys).chain(own_fields)
        );

        let nested_fragments = self.build_generic_fragments(
            &source.selections,
            &FragmentParent {
                fields: &fields,
                possible_types: &possible_types,
                selection_keys: &selection_keys,
                type_name: source.type_condition,
            },
            source.file_path,
        )?;

        Ok(GenericFragment {
            conditions: source.conditions,
            fields,
            fragment_name: source.fragment_name.map(str::to_string),
            nested_fragments,
            possible_types,
            selection_keys,
            type_condition: source.type_condition.to_string(),
        })
    }
}

/// Pairs each parent key with the key of a fragment on `type_condition`
/// nested directly under it.
pub(crate) fn rebase_keys<'k>(
    parent_keys: &'k IndexSet<SelectionKey>,
    type_condition: &str,
) -> Vec<(&'k SelectionKey, SelectionKey)> {
    let type_segment = naming::capitalize(type_condition);
    parent_keys.iter()
        .map(|parent_key| (parent_key, parent_key.with_segment(type_segment.as_str())))
        .collect()
}

/// Copies of `parent_fields` whose keys are additionally re-rooted from
/// each parent key onto its paired fragment key.
pub(crate) fn inherit_fields<'f>(
    parent_fields: &'f [Field],
    rebased_keys: &'f [(&'f SelectionKey, SelectionKey)],
) -> impl Iterator<Item = Field> + 'f {
    parent_fields.iter().map(move |field| {
        field.with_derived_keys(&|key: &SelectionKey| -> Vec<SelectionKey> {
            rebased_keys.iter()
                .filter_map(|(parent_key, fragment_key)| {
                    key.with_prefix_replaced(parent_key, fragment_key)
                })
                .collect()
        })
    })
}
