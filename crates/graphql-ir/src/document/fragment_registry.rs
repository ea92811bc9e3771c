use crate::ast;
use crate::loc;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;

/// A fragment definition together with the context the IR builder needs to
/// lower it anywhere it is spread: its exact source text and the file it
/// came from.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredFragment {
    pub(crate) definition: ast::operation::FragmentDefinition,
    pub(crate) file_path: Option<PathBuf>,
    pub(crate) source_text: String,
}
impl RegisteredFragment {
    pub fn def_location(&self) -> loc::SourceLocation {
        loc::SourceLocation::from_execdoc_ast_position(
            self.file_path(),
            &self.definition.position,
        )
    }

    pub fn definition(&self) -> &ast::operation::FragmentDefinition {
        &self.definition
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn name(&self) -> &str {
        self.definition.name.as_str()
    }

    pub fn source_text(&self) -> &str {
        self.source_text.as_str()
    }

    pub fn type_condition(&self) -> &str {
        let ast::operation::TypeCondition::On(type_name) = &self.definition.type_condition;
        type_name.as_str()
    }
}

/// Read-only map from fragment name to its [`RegisteredFragment`], shared by
/// reference across every operation and fragment build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FragmentRegistry {
    pub(crate) fragments: IndexMap<String, RegisteredFragment>,
}
impl FragmentRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fragments(&self) -> &IndexMap<String, RegisteredFragment> {
        &self.fragments
    }

    pub fn get(&self, fragment_name: &str) -> Option<&RegisteredFragment> {
        self.fragments.get(fragment_name)
    }
}
