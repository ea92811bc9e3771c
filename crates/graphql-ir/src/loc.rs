use crate::ast;
use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes a PathBuf to the file.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos(file: Option<&Path>, pos: ast::AstPos) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.to_path_buf()),
            line: pos.line,
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "<str>:{}:{}", self.line, self.col),
        }
    }
}

/// Where something referenced by the IR (or by an error) was defined.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum SourceLocation {
    /// Defined within an executable (operation/fragment) document.
    ExecutableDocument(FilePosition),

    /// Implicitly defined by GraphQL itself (e.g. `__typename`, `Int`).
    GraphQLBuiltIn,

    /// Defined within a schema document.
    Schema(FilePosition),
}
impl SourceLocation {
    pub(crate) fn from_execdoc_ast_position(
        file_path: Option<&Path>,
        pos: &ast::AstPos,
    ) -> Self {
        Self::ExecutableDocument(FilePosition::from_pos(file_path, *pos))
    }

    pub(crate) fn from_schema_ast_position(
        file_path: Option<&Path>,
        pos: &ast::AstPos,
    ) -> Self {
        Self::Schema(FilePosition::from_pos(file_path, *pos))
    }

    /// Produce a new [`SourceLocation`] in the same file, but at a different
    /// position.
    pub(crate) fn with_ast_position(&self, pos: &ast::AstPos) -> Self {
        match self {
            Self::ExecutableDocument(file_pos) => Self::ExecutableDocument(
                FilePosition::from_pos(file_pos.file.as_deref(), *pos),
            ),
            Self::GraphQLBuiltIn => Self::GraphQLBuiltIn,
            Self::Schema(file_pos) => Self::Schema(
                FilePosition::from_pos(file_pos.file.as_deref(), *pos),
            ),
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExecutableDocument(file_pos) | Self::Schema(file_pos) =>
                file_pos.fmt(f),
            Self::GraphQLBuiltIn => write!(f, "<builtin>"),
        }
    }
}
