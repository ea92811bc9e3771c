use crate::document::ExecutableDocument;
use crate::document::FragmentRegistry;
use crate::document::RegisteredFragment;
use crate::loc;
use indexmap::IndexMap;
use thiserror::Error;

type Result<T> = std::result::Result<T, FragmentRegistryBuildError>;

/// Builder for constructing a [`FragmentRegistry`] from every fragment
/// definition found across a set of [`ExecutableDocument`]s.
///
/// Fragment spreads are not checked for cycles or dangling references here;
/// the documents are expected to have been validated already.
#[derive(Debug, Default)]
pub struct FragmentRegistryBuilder {
    fragments: IndexMap<String, RegisteredFragment>,
}

impl FragmentRegistryBuilder {
    /// Add every fragment definition in `document`.
    pub fn add_document(&mut self, document: &ExecutableDocument) -> Result<()> {
        for frag_def in document.fragments() {
            let source_text = document.definition_source(&frag_def.position)
                .ok_or_else(|| FragmentRegistryBuildError::SourceTextUnavailable {
                    fragment_name: frag_def.name.to_owned(),
                    location: loc::SourceLocation::from_execdoc_ast_position(
                        document.file_path(),
                        &frag_def.position,
                    ),
                })?;

            self.add_fragment(RegisteredFragment {
                definition: frag_def.to_owned(),
                file_path: document.file_path.to_owned(),
                source_text: source_text.to_string(),
            })?;
        }
        Ok(())
    }

    /// Add a single fragment.
    ///
    /// Returns an error if a fragment with the same name already exists.
    pub fn add_fragment(&mut self, fragment: RegisteredFragment) -> Result<()> {
        if let Some(existing) = self.fragments.get(fragment.name()) {
            return Err(FragmentRegistryBuildError::DuplicateFragmentDefinition {
                fragment_name: fragment.name().to_string(),
                first_def_location: existing.def_location(),
                second_def_location: fragment.def_location(),
            });
        }

        log::trace!("Registered fragment `{}`.", fragment.name());
        self.fragments.insert(fragment.name().to_string(), fragment);
        Ok(())
    }

    pub fn build(self) -> FragmentRegistry {
        FragmentRegistry {
            fragments: self.fragments,
        }
    }

    /// Shorthand for adding every document in `documents` and building.
    pub fn from_documents(documents: &[&ExecutableDocument]) -> Result<FragmentRegistry> {
        let mut builder = Self::new();
        for document in documents {
            builder.add_document(document)?;
        }
        Ok(builder.build())
    }

    /// Create a new empty `FragmentRegistryBuilder`.
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FragmentRegistryBuildError {
    #[error("Duplicate fragment definition: '{fragment_name}'")]
    DuplicateFragmentDefinition {
        fragment_name: String,
        first_def_location: loc::SourceLocation,
        second_def_location: loc::SourceLocation,
    },

    #[error("Could not locate the source text of fragment '{fragment_name}'")]
    SourceTextUnavailable {
        fragment_name: String,
        location: loc::SourceLocation,
    },
}
