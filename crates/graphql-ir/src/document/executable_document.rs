use crate::ast;
use crate::document::source_text;
use crate::document::source_text::LineIndex;
use crate::file_reader;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, DocumentLoadError>;

/// A parsed [executable document](https://spec.graphql.org/October2021/#ExecutableDocument)
/// together with the exact text it was parsed from.
///
/// The original text is retained so that the IR can carry each operation's
/// and fragment's source byte-for-byte.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutableDocument {
    pub(crate) ast: ast::operation::Document,
    pub(crate) content: String,
    pub(crate) file_path: Option<PathBuf>,
    line_index: LineIndex,
}
impl ExecutableDocument {
    pub fn ast(&self) -> &ast::operation::Document {
        &self.ast
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// The exact source text of the definition (operation or fragment) whose
    /// first token sits at `pos`.
    pub fn definition_source(&self, pos: &ast::AstPos) -> Option<&str> {
        let start = self.line_index.offset_of(&self.content, pos.line, pos.column)?;
        source_text::definition_text(&self.content, start)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn fragments(&self) -> impl Iterator<Item = &ast::operation::FragmentDefinition> {
        self.ast.definitions.iter().filter_map(|def| match def {
            ast::operation::Definition::Fragment(frag_def) => Some(frag_def),
            ast::operation::Definition::Operation(_) => None,
        })
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = file_reader::read_content(file_path)
            .map_err(|e| DocumentLoadError::FileReadError(Box::new(e)))?;
        Self::from_str(content, Some(file_path.to_path_buf()))
    }

    pub fn from_str(
        content: impl Into<String>,
        file_path: Option<PathBuf>,
    ) -> Result<Self> {
        let content = content.into();
        let ast = ast::operation::parse(content.as_str())
            .map_err(|err| DocumentLoadError::ParseError {
                file: file_path.to_owned(),
                err: Arc::new(err),
            })?;
        let line_index = LineIndex::new(content.as_str());

        Ok(Self {
            ast,
            content,
            file_path,
            line_index,
        })
    }

    pub fn operations(&self) -> impl Iterator<Item = &ast::operation::OperationDefinition> {
        self.ast.definitions.iter().filter_map(|def| match def {
            ast::operation::Definition::Operation(op_def) => Some(op_def),
            ast::operation::Definition::Fragment(_) => None,
        })
    }
}

#[derive(Debug, Error)]
pub enum DocumentLoadError {
    #[error("Failure while trying to read an executable document from disk: {0}")]
    FileReadError(Box<file_reader::ReadContentError>),

    #[error("Error parsing executable document {file:?}: {err}")]
    ParseError {
        file: Option<PathBuf>,
        err: Arc<ast::operation::ParseError>,
    },
}
