use crate::ast;
use crate::builder::fragment_splitter::SplitSite;
use crate::builder::generic_fragment::FragmentParent;
use crate::builder::IrBuildError;
use crate::document::FragmentRegistry;
use crate::ir::Field;
use crate::ir::Fragment;
use crate::ir::SelectionKey;
use crate::schema::Schema;
use indexmap::IndexSet;
use std::path::Path;

type Result<T> = std::result::Result<T, IrBuildError>;

/// Everything one lowering pass reads from.
///
/// Operations are lowered with `with_implementations` on. Named fragments
/// are lowered twice: once without implementations (their interface view)
/// and once with (their default implementation).
#[derive(Clone, Copy, Debug)]
pub(crate) struct BuildPass<'a> {
    pub(crate) fragment_registry: &'a FragmentRegistry,
    pub(crate) schema: &'a Schema,
    pub(crate) with_implementations: bool,
}

/// A selection set about to be lowered, along with where it sits.
pub(crate) struct SelectionSite<'s> {
    pub(crate) file_path: Option<&'s Path>,
    /// Appended to implementation names produced at this site.
    pub(crate) implementation_suffix: &'s str,
    pub(crate) parent_type: &'s str,
    pub(crate) selection_keys: &'s IndexSet<SelectionKey>,
}

impl<'a> BuildPass<'a> {
    /// Lower the selections of one site into its merged fields and its
    /// fragments (interfaces first, then implementations).
    pub(crate) fn build_selections(
        &self,
        selections: &[&ast::operation::Selection],
        site: &SelectionSite<'_>,
    ) -> Result<(Vec<Field>, Vec<Fragment>)> {
        let field_selections: Vec<&ast::operation::Field> = selections.iter()
            .filter_map(|selection| match selection {
                ast::operation::Selection::Field(field) => Some(field),
                _ => None,
            })
            .collect();

        let fields = self.merge_field_selections(
            &field_selections,
            site.parent_type,
            site.selection_keys,
            site.file_path,
        )?;

        let possible_types = self.schema.possible_types(site.parent_type);
        let generic_fragments = self.build_generic_fragments(
            selections,
            &FragmentParent {
                fields: &fields,
                possible_types,
                selection_keys: site.selection_keys,
                type_name: site.parent_type,
            },
            site.file_path,
        )?;

        let fragments = self.split_fragments(generic_fragments, &SplitSite {
            fields: &fields,
            implementation_suffix: site.implementation_suffix,
            possible_types,
            selection_keys: site.selection_keys,
        });

        Ok((fields, fragments))
    }
}
