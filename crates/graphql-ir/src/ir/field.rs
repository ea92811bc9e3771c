use crate::ir::Argument;
use crate::ir::Condition;
use crate::ir::Fragment;
use crate::ir::SelectionKey;
use crate::loc;
use crate::types::TypeAnnotation;
use indexmap::IndexSet;

/// A selected field, merged across every sibling selection sharing its
/// response name.
///
/// Within one field's [`fields()`](Field::fields), response names are
/// unique.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub(crate) alias: Option<String>,
    pub(crate) arguments: Vec<Argument>,
    pub(crate) conditions: Vec<Condition>,
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) deprecation_reason: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) fields: Vec<Field>,
    pub(crate) fragments: Vec<Fragment>,
    pub(crate) name: String,
    pub(crate) selection_keys: IndexSet<SelectionKey>,
    pub(crate) type_annotation: TypeAnnotation,
}
impl Field {
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Runtime conditions from `@skip`/`@include` with variable arguments.
    ///
    /// When several selections of this field were merged, this is the
    /// concatenation of every selection's conditions (duplicates removed),
    /// not their logical OR. A field selected once unconditionally and once
    /// under `@skip(if: $foo)` therefore still reports the `$foo` condition.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn deprecation_reason(&self) -> Option<&str> {
        self.deprecation_reason.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecation_reason.is_some()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /**
     * The key of this field in a response: its alias if it has one,
     * otherwise its name.
     */
    pub fn response_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn selection_keys(&self) -> &IndexSet<SelectionKey> {
        &self.selection_keys
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }

    /// A copy of this field where every node in the tree additionally holds
    /// the keys `derive` produces from each of its existing keys.
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
            selection_keys: derive_keys(&self.selection_keys, derive),
            ..self.clone()
        }
    }
}

pub(crate) fn derive_keys<F>(keys: &IndexSet<SelectionKey>, derive: &F) -> IndexSet<SelectionKey>
where
    F: Fn(&SelectionKey) -> Vec<SelectionKey>,
{
    let mut derived = keys.clone();
    for key in keys {
        derived.extend(derive(key));
    }
    derived
}
