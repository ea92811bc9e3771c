use crate::builder::build_pass::BuildPass;
use crate::builder::directives;
use crate::builder::generic_fragment::GenericFragment;
use crate::builder::naming;
use crate::ir::Field;
use crate::ir::Fragment;
use crate::ir::FragmentImplementation;
use crate::ir::FragmentInterface;
use crate::ir::SelectionKey;
use indexmap::map::Entry;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// The selection site whose fragments are being split.
pub(crate) struct SplitSite<'s> {
    pub(crate) fields: &'s [Field],
    pub(crate) implementation_suffix: &'s str,
    pub(crate) possible_types: &'s IndexSet<String>,
    pub(crate) selection_keys: &'s IndexSet<SelectionKey>,
}

impl<'a> BuildPass<'a> {
    /// Split the generic fragments of one site into one interface per
    /// distinct type condition, followed (when this pass builds them) by the
    /// site's implementations.
    pub(crate) fn split_fragments(
        &self,
        generic_fragments: Vec<GenericFragment>,
        site: &SplitSite<'_>,
    ) -> Vec<Fragment> {
        let interfaces = self.merge_interfaces(
            generic_fragments.into_iter()
                .flat_map(GenericFragment::flatten)
                .map(|generic_fragment| self.interface_from_generic(generic_fragment, site))
        );
        self.assemble_fragments(interfaces, site)
    }

    /// Interfaces followed by implementations computed from them.
    pub(crate) fn assemble_fragments(
        &self,
        interfaces: Vec<FragmentInterface>,
        site: &SplitSite<'_>,
    ) -> Vec<Fragment> {
        let implementations = if self.with_implementations {
            self.build_implementations(&interfaces, site)
        } else {
            vec![]
        };

        interfaces.into_iter()
            .map(Fragment::Interface)
            .chain(implementations.into_iter().map(Fragment::Implementation))
            .collect()
    }

    /// Merge interfaces sharing a type condition, in order of each type
    /// condition's first occurrence.
    pub(crate) fn merge_interfaces(
        &self,
        interfaces: impl IntoIterator<Item = FragmentInterface>,
    ) -> Vec<FragmentInterface> {
        let mut merged: IndexMap<String, FragmentInterface> = IndexMap::new();
        for interface in interfaces {
            match merged.entry(interface.type_condition.to_owned()) {
                Entry::Occupied(mut entry) => {
                    let existing = entry.get_mut();
                    let fields = std::mem::take(&mut existing.fields);
                    existing.fields = self.merge_fields(fields.into_iter().chain(interface.fields));
                    directives::extend_conditions(&mut existing.conditions, interface.conditions);
                    existing.possible_types.extend(interface.possible_types);
                    existing.selection_keys.extend(interface.selection_keys);
                    if existing.description.is_none() {
                        existing.description = interface.description;
                    }
                },
                Entry::Vacant(entry) => {
                    entry.insert(interface);
                },
            }
        }
        merged.into_values().collect()
    }

    fn interface_from_generic(
        &self,
        generic_fragment: GenericFragment,
        site: &SplitSite<'_>,
    ) -> FragmentInterface {
        let possible_types = generic_fragment.possible_types.iter()
            .filter(|type_name| site.possible_types.contains(*type_name))
            .cloned()
            .collect();

        FragmentInterface {
            conditions: generic_fragment.conditions,
            description: self.schema.type_description(&generic_fragment.type_condition)
                .map(str::to_string),
            fields: generic_fragment.fields,
            possible_types,
            selection_keys: generic_fragment.selection_keys,
            type_condition: generic_fragment.type_condition,
        }
    }

    /// Partition the site's possible types by the exact set of interfaces
    /// each type satisfies and produce one implementation per partition.
    ///
    /// Types satisfying no interface are grouped into an `Other<Suffix>`
    /// implementation carrying only the site's own fields. A site without
    /// any interfaces has no implementations.
    fn build_implementations(
        &self,
        interfaces: &[FragmentInterface],
        site: &SplitSite<'_>,
    ) -> Vec<FragmentImplementation> {
        if interfaces.is_empty() {
            return vec![];
        }

        let mut partitions: IndexMap<Vec<usize>, IndexSet<String>> = IndexMap::new();
        for concrete_type in site.possible_types {
            let satisfied_interfaces: Vec<usize> = interfaces.iter()
                .enumerate()
                .filter(|(_, interface)| interface.possible_types.contains(concrete_type))
                .map(|(idx, _)| idx)
                .collect();
            partitions.entry(satisfied_interfaces)
                .or_default()
                .insert(concrete_type.to_owned());
        }

        partitions.into_iter().map(|(interface_indices, possible_types)| {
            let members: Vec<&FragmentInterface> = interface_indices.iter()
                .map(|idx| &interfaces[*idx])
                .collect();
            let type_conditions: Vec<String> = members.iter()
                .map(|interface| interface.type_condition.to_owned())
                .collect();

            let name_prefix = if type_conditions.is_empty() {
                "Other".to_string()
            } else {
                type_conditions.iter()
                    .map(|type_condition| naming::capitalize(type_condition))
                    .collect::<String>()
            };
            let name = format!("{name_prefix}{}", site.implementation_suffix);

            let fields = self.merge_fields(
                site.fields.iter().cloned().chain(
                    members.iter().flat_map(|interface| interface.fields.iter().cloned())
                )
            );

            let mut selection_keys = site.selection_keys.to_owned();
            let mut conditions = vec![];
            for member in &members {
                selection_keys.extend(member.selection_keys.iter().cloned());
                directives::extend_conditions(&mut conditions, member.conditions.iter().cloned());
            }

            log::trace!(
                "Implementation `{name}` covers {} possible type(s)",
                possible_types.len(),
            );

            FragmentImplementation {
                conditions,
                description: members.first().and_then(|interface| interface.description.to_owned()),
                fields,
                name,
                possible_types,
                selection_keys,
                type_conditions,
            }
        }).collect()
    }
}
