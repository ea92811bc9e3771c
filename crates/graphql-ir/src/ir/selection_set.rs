use crate::ir::field::derive_keys;
use crate::ir::Field;
use crate::ir::Fragment;
use crate::ir::SelectionKey;
use indexmap::IndexSet;

/// The root selection of a [`NamedFragment`](crate::ir::NamedFragment).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSet {
    pub(crate) fields: Vec<Field>,
    pub(crate) fragments: Vec<Fragment>,
    pub(crate) possible_types: IndexSet<String>,
    pub(crate) selection_keys: IndexSet<SelectionKey>,
    pub(crate) type_condition: String,
}
impl SelectionSet {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn possible_types(&self) -> &IndexSet<String> {
        &self.possible_types
    }

    pub fn selection_keys(&self) -> &IndexSet<SelectionKey> {
        &self.selection_keys
    }

    pub fn type_condition(&self) -> &str {
        self.type_condition.as_str()
    }

    pub(crate) fn with_derived_keys<F>(&self, derive: &F) -> Self
    where
        F: Fn(&SelectionKey) -> Vec<SelectionKey>,
    {
        Self {
            fields: self.fields.iter()
                .map(|field| field.with_derived_keys(derive))
                .collect(),
            fragments: self.fragments.iter()
                .map(|fragment| fragment.with_derived_keys(derive))
                .collect(),
            possible_types: self.possible_types.clone(),
            selection_keys: derive_keys(&self.selection_keys, derive),
            type_condition: self.type_condition.clone(),
        }
    }
}
