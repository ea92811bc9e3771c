use crate::ir::SelectionSet;
use crate::loc;

/// The IR for one fragment definition.
///
/// A named fragment is built twice: [`selection_set()`](Self::selection_set)
/// is the interface-only view (no [`FragmentImplementation`](crate::ir::FragmentImplementation)s
/// anywhere in the tree) and [`default_selection_set()`](Self::default_selection_set)
/// carries implementations for the generated default model, with every key
/// rooted at the fragment also present under
/// [`default_implementation_name()`](Self::default_implementation_name).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedFragment {
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) default_implementation_name: String,
    pub(crate) default_selection_set: SelectionSet,
    pub(crate) description: Option<String>,
    pub(crate) name: String,
    pub(crate) selection_set: SelectionSet,
    pub(crate) source_text: String,
}
impl NamedFragment {
    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn default_implementation_name(&self) -> &str {
        self.default_implementation_name.as_str()
    }

    pub fn default_selection_set(&self) -> &SelectionSet {
        &self.default_selection_set
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }

    pub fn source_text(&self) -> &str {
        self.source_text.as_str()
    }
}
